//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::bindings::{Binding, Figure, InputValues};
use crate::dataset::{Dataset, Metric};

// ============================================
// BINDING DTOs
// ============================================

/// Recompute one chart
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Chart identifier
    pub output: String,
    /// Current control values, keyed by control id
    #[serde(default)]
    pub inputs: InputValues,
}

/// A recomputed chart
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Chart identifier
    pub output: String,
    /// Plotly figure for the chart
    pub figure: Figure,
}

/// One control changed; recompute everything that depends on it
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    /// Control identifier that changed
    pub changed: String,
    /// Current control values, keyed by control id
    #[serde(default)]
    pub inputs: InputValues,
}

/// Charts affected by a control change
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub updates: Vec<UpdateResponse>,
}

/// A registered binding
#[derive(Debug, Serialize)]
pub struct BindingDto {
    pub output: String,
    pub inputs: Vec<String>,
}

impl From<&Binding> for BindingDto {
    fn from(binding: &Binding) -> Self {
        Self {
            output: binding.output.to_string(),
            inputs: binding.inputs.iter().map(|i| i.to_string()).collect(),
        }
    }
}

/// List bindings response
#[derive(Debug, Serialize)]
pub struct BindingListResponse {
    pub bindings: Vec<BindingDto>,
    pub total: usize,
}

// ============================================
// DATASET DTOs
// ============================================

/// Selectable metric column
#[derive(Debug, Serialize)]
pub struct MetricDto {
    /// Normalized column key
    pub key: String,
    /// Display label
    pub label: String,
}

/// Dataset summary response
#[derive(Debug, Serialize)]
pub struct DatasetSummaryResponse {
    /// Rows of the metrics table (World excluded)
    pub metrics_rows: usize,
    /// Rows of the joined table
    pub joined_rows: usize,
    /// Distinct countries, in first-appearance order
    pub countries: Vec<String>,
    /// Distinct years of the metrics table
    pub years: Vec<i32>,
    /// Distinct years of the joined table
    pub joined_years: Vec<i32>,
    /// Selectable metrics
    pub metrics: Vec<MetricDto>,
}

impl From<&Dataset> for DatasetSummaryResponse {
    fn from(dataset: &Dataset) -> Self {
        Self {
            metrics_rows: dataset.metrics().len(),
            joined_rows: dataset.joined().len(),
            countries: dataset.countries().iter().map(|c| c.to_string()).collect(),
            years: dataset.years(),
            joined_years: dataset.joined_years(),
            metrics: Metric::ALL
                .iter()
                .map(|m| MetricDto {
                    key: m.key().to_string(),
                    label: m.label().to_string(),
                })
                .collect(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Metrics table status
    pub metrics: String,
    /// Joined table status
    pub geo: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
