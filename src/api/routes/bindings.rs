//! Binding Routes
//!
//! Event endpoints the page script calls when a control changes.
//!
//! - GET /api/v1/bindings - List control → chart bindings
//! - POST /api/v1/update - Recompute one chart
//! - POST /api/v1/event - Recompute every chart depending on a changed control

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{
    BindingDto, BindingListResponse, EventRequest, EventResponse, UpdateRequest, UpdateResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/bindings
pub async fn list_bindings(State(state): State<Arc<AppState>>) -> Json<BindingListResponse> {
    let bindings: Vec<BindingDto> = state
        .registry
        .bindings()
        .iter()
        .map(BindingDto::from)
        .collect();

    Json(BindingListResponse {
        total: bindings.len(),
        bindings,
    })
}

/// POST /api/v1/update
///
/// Dispatch the control values to the chart's handler.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let figure = state
        .registry
        .dispatch(&state.dataset, &req.output, &req.inputs)?;

    Ok(Json(UpdateResponse {
        output: req.output,
        figure,
    }))
}

/// POST /api/v1/event
///
/// Recompute all charts bound to the changed control.
pub async fn event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let affected: Vec<&str> = state
        .registry
        .affected_by(&req.changed)
        .map(|b| b.output)
        .collect();

    if affected.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No chart depends on control '{}'",
            req.changed
        )));
    }

    let updates = affected
        .into_iter()
        .map(|output| -> ApiResult<UpdateResponse> {
            let figure = state.registry.dispatch(&state.dataset, output, &req.inputs)?;
            Ok(UpdateResponse {
                output: output.to_string(),
                figure,
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;

    tracing::debug!(changed = %req.changed, charts = updates.len(), "Handled control event");
    Ok(Json(EventResponse { updates }))
}
