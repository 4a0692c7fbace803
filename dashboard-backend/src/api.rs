//! API module
//!
//! REST and WebSocket surface of the control store for the dashboard UI.

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use control::{ControlSnapshot, NotificationDraft, User};
use control_core::event_bus::SnapshotBus;
use control_core::ControlStore;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;

use crate::ws;

// App State to share with routes
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ControlStore>>,
    pub bus: SnapshotBus,
}

impl AppState {
    pub fn new(store: ControlStore, bus: SnapshotBus) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            bus,
        }
    }

    /// Locks the store. Every mutator is total, so a poisoned lock still
    /// guards a consistent state and is recovered.
    pub fn store(&self) -> MutexGuard<'_, ControlStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate<F>(&self, f: F) -> ControlSnapshot
    where
        F: FnOnce(&mut ControlStore),
    {
        let mut store = self.store();
        f(&mut store);
        store.snapshot()
    }
}

pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws_handler))
        .route("/state", get(get_state))
        .route("/system/running", post(set_running))
        .route("/system/emergency-stop", post(emergency_stop))
        .route("/user", axum::routing::put(login).delete(logout))
        .route(
            "/notifications",
            get(list_notifications)
                .post(add_notification)
                .delete(clear_notifications),
        )
        .route("/notifications/:id/read", post(mark_read))
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn state_envelope(snapshot: ControlSnapshot) -> Json<serde_json::Value> {
    Json(json!({"status": "OK", "state": snapshot}))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| ws::handle_socket(socket, state))
}

async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    state_envelope(state.store().snapshot())
}

// System Handlers
#[derive(Deserialize)]
struct RunningRequest {
    running: bool,
}

async fn set_running(
    State(state): State<AppState>,
    Json(payload): Json<RunningRequest>,
) -> impl IntoResponse {
    state_envelope(state.mutate(|store| store.set_system_running(payload.running)))
}

async fn emergency_stop(State(state): State<AppState>) -> impl IntoResponse {
    state_envelope(state.mutate(|store| store.trigger_emergency_stop()))
}

// User Handlers
async fn login(State(state): State<AppState>, Json(user): Json<User>) -> impl IntoResponse {
    state_envelope(state.mutate(|store| store.set_current_user(Some(user))))
}

async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state_envelope(state.mutate(|store| store.set_current_user(None)))
}

// Notification Handlers
async fn list_notifications(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store();
    Json(json!({
        "status": "OK",
        "notifications": store.notifications(),
        "unread": store.unread_count(),
    }))
}

async fn add_notification(
    State(state): State<AppState>,
    Json(draft): Json<NotificationDraft>,
) -> impl IntoResponse {
    let notification = state.store().add_notification(draft);
    Json(json!({"status": "OK", "notification": notification}))
}

async fn mark_read(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let updated = state.store().mark_notification_read(&id);
    Json(json!({"status": "OK", "updated": updated}))
}

async fn clear_notifications(State(state): State<AppState>) -> impl IntoResponse {
    state_envelope(state.mutate(|store| store.clear_notifications()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let mut store = ControlStore::new();
        let bus = SnapshotBus::new(16);
        bus.attach(&mut store);
        AppState::new(store, bus)
    }

    async fn call(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = build_router(state.clone(), false)
            .oneshot(req.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_initial_state() {
        let state = test_state();
        let (status, body) = call(&state, "GET", "/state", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["state"]["isSystemRunning"], false);
        assert_eq!(body["state"]["emergencyStop"], false);
        assert!(body["state"]["currentUser"].is_null());
    }

    #[tokio::test]
    async fn test_emergency_stop_then_restart() {
        let state = test_state();
        call(&state, "POST", "/system/running", Some(r#"{"running":true}"#)).await;

        let (_, body) = call(&state, "POST", "/system/emergency-stop", None).await;
        assert_eq!(body["state"]["isSystemRunning"], false);
        assert_eq!(body["state"]["emergencyStop"], true);
        assert_eq!(body["state"]["notifications"][0]["type"], "error");
        assert_eq!(body["state"]["notifications"][0]["title"], "紧急停止");

        let (_, body) = call(&state, "POST", "/system/running", Some(r#"{"running":false}"#)).await;
        assert_eq!(body["state"]["emergencyStop"], true);

        let (_, body) = call(&state, "POST", "/system/running", Some(r#"{"running":true}"#)).await;
        assert_eq!(body["state"]["isSystemRunning"], true);
        assert_eq!(body["state"]["emergencyStop"], false);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let state = test_state();
        let user = r#"{"id":"u-9","username":"dana","role":"risk_manager","email":"d@desk.io"}"#;

        let (status, body) = call(&state, "PUT", "/user", Some(user)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"]["currentUser"]["role"], "risk_manager");

        let (_, body) = call(&state, "DELETE", "/user", None).await;
        assert!(body["state"]["currentUser"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_role_rejected_before_store() {
        let state = test_state();
        let user = r#"{"id":"u-9","username":"dana","role":"overlord","email":"d@desk.io"}"#;

        let (status, _) = call(&state, "PUT", "/user", Some(user)).await;
        assert!(status.is_client_error());
        assert!(state.store().current_user().is_none());
    }

    #[tokio::test]
    async fn test_notification_feed_flow() {
        let state = test_state();
        let (_, a) = call(
            &state,
            "POST",
            "/notifications",
            Some(r#"{"type":"info","title":"A","message":"m1"}"#),
        )
        .await;
        call(
            &state,
            "POST",
            "/notifications",
            Some(r#"{"type":"warning","title":"B","message":"m2"}"#),
        )
        .await;

        let id_a = a["notification"]["id"].as_str().unwrap().to_string();
        let (_, body) = call(&state, "POST", &format!("/notifications/{}/read", id_a), None).await;
        assert_eq!(body["updated"], true);

        let (_, body) = call(&state, "GET", "/notifications", None).await;
        assert_eq!(body["unread"], 1);
        assert_eq!(body["notifications"][0]["title"], "B");
        assert_eq!(body["notifications"][0]["read"], false);
        assert_eq!(body["notifications"][1]["title"], "A");
        assert_eq!(body["notifications"][1]["read"], true);

        let (_, body) = call(&state, "DELETE", "/notifications", None).await;
        assert_eq!(body["state"]["notifications"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_is_not_an_error() {
        let state = test_state();
        let (status, body) = call(&state, "POST", "/notifications/nope/read", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated"], false);
    }

    #[tokio::test]
    async fn test_mutations_reach_the_bus() {
        let state = test_state();
        let mut rx = state.bus.subscribe();

        call(&state, "POST", "/system/emergency-stop", None).await;

        let snapshot = rx.recv().await.unwrap();
        assert!(snapshot.emergency_stop);
        assert_eq!(snapshot.notifications.len(), 1);
    }
}
