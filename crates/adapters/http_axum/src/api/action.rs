//! The action endpoint remote notifiers post to.
//!
//! Acknowledges `{"action": "<key>"}` without acting on it; the local
//! dispatcher has already done the work by the time a notification arrives.

use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::Value;

use scenepad_domain::action_key::ActionKey;
use scenepad_domain::notification::NotifyResponse;

/// `POST /api/action`
pub async fn receive(body: Bytes) -> (StatusCode, Json<NotifyResponse>) {
    match action_of(&body) {
        Some(action) => {
            tracing::info!(%action, "action received");
            (StatusCode::OK, Json(NotifyResponse::received(&action)))
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(NotifyResponse::missing_action()),
        ),
    }
}

/// Any other method on `/api/action`.
pub async fn method_not_allowed() -> (StatusCode, Json<NotifyResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(NotifyResponse::method_not_allowed()),
    )
}

/// The `action` member of a JSON object body. Scalars other than strings are
/// accepted in their JSON spelling; `null` counts as missing.
fn action_of(body: &[u8]) -> Option<ActionKey> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("action")? {
        Value::Null => None,
        Value::String(action) => Some(ActionKey::new(action.as_str())),
        other => Some(ActionKey::new(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_string_action() {
        assert_eq!(action_of(br#"{"action":"goodnight"}"#), Some(ActionKey::new("goodnight")));
    }

    #[test]
    fn should_treat_missing_null_and_garbage_as_missing() {
        assert_eq!(action_of(br#"{"other":"x"}"#), None);
        assert_eq!(action_of(br#"{"action":null}"#), None);
        assert_eq!(action_of(b"action=goodnight"), None);
        assert_eq!(action_of(b""), None);
    }

    #[test]
    fn should_accept_empty_string_action() {
        assert_eq!(action_of(br#"{"action":""}"#), Some(ActionKey::new("")));
    }

    #[tokio::test]
    async fn should_acknowledge_action() {
        let (status, Json(body)) = receive(Bytes::from_static(br#"{"action":"movieTime"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.message, "Action 'movieTime' received by the server.");
    }

    #[tokio::test]
    async fn should_reject_body_without_action() {
        let (status, Json(body)) = receive(Bytes::from_static(b"{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, NotifyResponse::missing_action());
    }
}
