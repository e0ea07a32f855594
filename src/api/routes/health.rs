//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Ready once the metrics table has rows to chart.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if has_metrics(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
/// An empty join only blanks the map, so it degrades rather than fails.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let metrics_ok = has_metrics(&state);
    let geo_ok = !state.dataset.joined().is_empty();

    let overall_status = match (metrics_ok, geo_ok) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        _ => "unhealthy",
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        metrics: status_label(metrics_ok).to_string(),
        geo: status_label(geo_ok).to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn has_metrics(state: &AppState) -> bool {
    !state.dataset.metrics().is_empty()
}

fn status_label(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "empty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CoordinateRow, Dataset, MetricsRow};

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_requires_metrics() {
        let empty = Arc::new(AppState::new(Arc::new(Dataset::default())));
        assert_eq!(readiness(State(empty)).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_degraded_without_join() {
        let dataset = Dataset::from_tables(
            vec![MetricsRow::new("Chile", 2000, 1.0)],
            &[CoordinateRow::new("Peru", -9.2, -75.0, 32e6)],
        );
        let state = Arc::new(AppState::new(Arc::new(dataset)));

        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.geo, "empty");
    }
}
