//! # mhdash
//!
//! Interactive dashboard of global mental-health statistics: prevalence,
//! suicide rate and disorder rates by country and year.
//!
//! ## Modules
//!
//! - [`dataset`]: Loads the metrics and coordinates tables and joins them
//! - [`bindings`]: Pure control → chart mappings and their registry
//! - [`layout`]: The page's component tree and HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mhdash::bindings::{ids, BindingRegistry, InputValues};
//! use mhdash::dataset::Dataset;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load(Path::new("merged.csv"), Path::new("coordinates.csv"))?;
//!
//!     let inputs = InputValues::new()
//!         .with(ids::LINE_DROPDOWN_Y, "suicide_rate")
//!         .with(ids::LINE_DROPDOWN_COUNTRY, "France");
//!     let figure = BindingRegistry::standard().dispatch(&dataset, ids::LINE_GRAPH, &inputs)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&figure)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bindings;
pub mod config;
pub mod dataset;
pub mod layout;

// Re-export top-level types for convenience
pub use dataset::{
    CoordinateRow, Dataset, DatasetError, DatasetResult, JoinedRow, Metric, MetricsRow,
};

pub use bindings::{Binding, BindingError, BindingRegistry, Figure, InputValues};

pub use layout::{Component, Page};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DataConfig, LogFormat, LoggingConfig, ServerConfig};
