//! Dataset Routes
//!
//! - GET /api/v1/dataset - Row counts, years, countries and metric columns

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetSummaryResponse;
use crate::api::state::AppState;

/// GET /api/v1/dataset
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<DatasetSummaryResponse> {
    Json(DatasetSummaryResponse::from(state.dataset.as_ref()))
}
