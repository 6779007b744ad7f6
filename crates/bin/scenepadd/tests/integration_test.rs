//! End-to-end tests for the full scenepadd stack.
//!
//! Each test wires the complete application (real light store, scene engine,
//! dispatcher, press service and axum router) and exercises it over HTTP,
//! either via `tower::ServiceExt::oneshot` or, where a remote notification
//! endpoint is involved, over a real loopback TCP listener.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::post;
use http_body_util::BodyExt;
use scenepad_adapter_http_axum::router;
use scenepad_adapter_http_axum::state::AppState;
use scenepad_adapter_notify_http::HttpActionNotifier;
use scenepad_app::ports::ActionNotifier;
use scenepad_domain::action_key::ActionKey;
use scenepad_domain::catalog::Catalog;
use scenepad_domain::configuration::Configuration;
use scenepad_domain::notification::{NotifyRequest, NotifyResponse};
use scenepad_domain::press::PressTimings;
use scenepad_domain::scene::OverlapPolicy;
use tower::ServiceExt;

/// Build a fully-wired router on the demo catalog, with its press service
/// running.
fn app<N>(notifier: N) -> Router
where
    N: ActionNotifier + Send + Sync + 'static,
{
    let (state, press_service) = AppState::build(
        Catalog::demo(),
        Configuration::demo(),
        notifier,
        PressTimings::default(),
        OverlapPolicy::default(),
    );
    tokio::spawn(press_service.run());
    router::build(state)
}

fn offline_app() -> Router {
    app(None::<HttpActionNotifier>)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn press(app: &Router, button: &str, phase: &str) {
    let (status, _) = call(
        app,
        Method::POST,
        &format!("/api/buttons/{button}/press"),
        Some(&format!(r#"{{"phase":"{phase}"}}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

async fn light(app: &Router, id: &str) -> serde_json::Value {
    let (status, light) = call(app, Method::GET, &format!("/api/lights/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    light
}

/// Poll `light` until `predicate` holds, for at most two seconds.
async fn eventually(app: &Router, id: &str, predicate: impl Fn(&serde_json::Value) -> bool) -> serde_json::Value {
    for _ in 0..40 {
        let current = light(app, id).await;
        if predicate(&current) {
            return current;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("light {id} never reached the expected state");
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = offline_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Raw presses through the classifier
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_play_scene_on_single_press() {
    let app = offline_app();

    press(&app, "btn2", "start").await;
    press(&app, "btn2", "end").await;

    let lamp = eventually(&app, "light2", |light| light["is_on"] == true).await;
    assert_eq!(lamp["brightness"], 20);
    assert_eq!(lamp["color"], "#4a0080");
}

#[tokio::test]
async fn should_switch_all_lights_on_double_press() {
    let app = offline_app();

    press(&app, "btn2", "start").await;
    press(&app, "btn2", "end").await;
    press(&app, "btn2", "start").await;
    press(&app, "btn2", "end").await;

    eventually(&app, "light1", |light| light["is_on"] == true).await;
    let (_, lights) = call(&app, Method::GET, "/api/lights", None).await;
    assert!(lights.as_array().unwrap().iter().all(|light| light["is_on"] == true));
    // The double press never played the single-press scene.
    assert_eq!(light(&app, "light2").await["brightness"], 100);
}

#[tokio::test]
async fn should_ignore_cancelled_press() {
    let app = offline_app();

    // Held long enough, btn1 would switch the hallway light on.
    press(&app, "btn1", "start").await;
    press(&app, "btn1", "cancel").await;
    tokio::time::sleep(Duration::from_millis(700)).await;

    assert_eq!(light(&app, "light3").await["is_on"], false);
}

// ---------------------------------------------------------------------------
// Configuration editing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_use_replaced_configuration_for_next_gesture() {
    let app = offline_app();

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/configuration",
        Some(r#"{"btn1":{"single":"allLightsOn"}}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, outcome) = call(&app, Method::POST, "/api/buttons/btn1/gestures/single", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["outcome"], "all_lights");
    assert_eq!(light(&app, "light3").await["is_on"], true);
}

// ---------------------------------------------------------------------------
// Remote notification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_acknowledge_notifier_posting_to_action_endpoint() {
    let base = serve(offline_app()).await;
    let notifier =
        HttpActionNotifier::new(&format!("{base}/api/action"), Duration::from_secs(2)).unwrap();

    let response = notifier.notify(&ActionKey::new("goodnight")).await.unwrap();

    assert_eq!(response, NotifyResponse::received(&ActionKey::new("goodnight")));
}

#[tokio::test]
async fn should_forward_triggered_action_to_remote_endpoint() {
    let received = Arc::new(Mutex::new(Vec::<ActionKey>::new()));
    let recorder = {
        let received = Arc::clone(&received);
        Router::new().route(
            "/api/action",
            post(move |Json(request): Json<NotifyRequest>| {
                let received = Arc::clone(&received);
                async move {
                    received.lock().unwrap().push(request.action.clone());
                    Json(NotifyResponse::received(&request.action))
                }
            }),
        )
    };
    let base = serve(recorder).await;
    let notifier =
        HttpActionNotifier::new(&format!("{base}/api/action"), Duration::from_secs(2)).unwrap();
    let app = app(Some(notifier));

    let (status, _) = call(&app, Method::POST, "/api/buttons/btn1/gestures/double", None).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..40 {
        if !received.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(*received.lock().unwrap(), vec![ActionKey::new("movieTime")]);
}

#[tokio::test]
async fn should_apply_locally_when_remote_endpoint_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let notifier =
        HttpActionNotifier::new(&format!("http://{addr}/api/action"), Duration::from_millis(200))
            .unwrap();
    let app = app(Some(notifier));

    let (status, outcome) = call(&app, Method::POST, "/api/buttons/btn2/gestures/double", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["outcome"], "all_lights");
    assert_eq!(light(&app, "light1").await["is_on"], true);
}
