use crate::state::{State as AppState, SyncStatus};
use axum::{
    Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
struct HealthCheck {
    message: String,
}

pub fn new_router(app_state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/state", get(state))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn state(AxumState(app_state): AxumState<AppState>) -> Json<SyncStatus> {
    Json(app_state.snapshot().await)
}

async fn healthz(AxumState(app_state): AxumState<AppState>) -> Response {
    let ready = app_state.status.read().await.cycles > 0;

    if !ready {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthCheck {
                message: "waiting for first sync".into(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(HealthCheck {
            message: "ok".into(),
        }),
    )
        .into_response()
}
