//! Page Routes
//!
//! - GET / - The dashboard page
//! - GET /api/v1/layout - The page's component tree

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::layout::Component;

/// GET /
///
/// Serve the page composed at startup.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.html.clone())
}

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Component> {
    Json(state.page.root.clone())
}
