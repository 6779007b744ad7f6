//! Wire types of the action notification endpoint.
//!
//! Request: `{"action": "<key>"}`. Response: `{"status": "success"|"error",
//! "message": "..."}`.

use serde::{Deserialize, Serialize};

use crate::action_key::ActionKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub action: ActionKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub status: NotifyStatus,
    pub message: String,
}

impl NotifyResponse {
    /// Acknowledgement for a received action.
    #[must_use]
    pub fn received(action: &ActionKey) -> Self {
        Self {
            status: NotifyStatus::Success,
            message: format!("Action '{action}' received by the server."),
        }
    }

    #[must_use]
    pub fn missing_action() -> Self {
        Self::error("Missing action parameter.")
    }

    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::error("Only POST requests are allowed.")
    }

    /// Local acknowledgement used when remote notification is turned off.
    #[must_use]
    pub fn skipped(action: &ActionKey) -> Self {
        Self {
            status: NotifyStatus::Success,
            message: format!("Action '{action}' not forwarded: notifications disabled."),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: NotifyStatus::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == NotifyStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_received_message() {
        let response = NotifyResponse::received(&ActionKey::new("movieTime"));
        assert!(response.is_success());
        assert_eq!(response.message, "Action 'movieTime' received by the server.");
    }

    #[test]
    fn should_serialize_status_lowercase() {
        let json = serde_json::to_value(NotifyResponse::missing_action()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "Missing action parameter."})
        );
    }

    #[test]
    fn should_serialize_request_with_plain_action_string() {
        let request = NotifyRequest {
            action: ActionKey::new("allLightsOff"),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"action":"allLightsOff"}"#);
    }
}
