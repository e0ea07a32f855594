//! Dataset Loader
//!
//! Loads the two source tables and joins them:
//!
//! - **types**: Row types (`MetricsRow`, `CoordinateRow`, `JoinedRow`) and `Metric`
//! - **loader**: CSV reading, header normalization, World filtering, inner join
//! - **store**: The shared read-only `Dataset`
//! - **error**: Error types
//!
//! ```text
//! merged.csv ──► normalize headers ──► drop "World" ──┐
//!                                                     ├──► inner join on country ──► Dataset
//! coordinates.csv ──► normalize headers (entity→country) ┘
//! ```

pub mod error;
pub mod loader;
pub mod store;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{inner_join, load_coordinates, load_metrics, normalize_column_key};
pub use store::Dataset;
pub use types::{CoordinateRow, JoinedRow, Metric, MetricsRow, UnknownMetric, WORLD};
