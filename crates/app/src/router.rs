use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;

use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::telemetry;

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, dashboard: Arc<Dashboard>) -> Self {
        Self { metrics, dashboard }
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/views", get(views_snapshot))
        .route("/remount", post(remount))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    state.dashboard().remount_failed().await;
    Html(state.dashboard().snapshot().await.render())
}

async fn views_snapshot(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard().snapshot().await)
}

async fn remount(State(state): State<AppState>) -> Redirect {
    if !state.dashboard().remount().await {
        debug!(stage = "http", "remount request ignored");
    }
    Redirect::to("/")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
