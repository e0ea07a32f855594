//! Process-wide dataset
//!
//! Both tables are built once at startup and only read afterwards; callers
//! share the `Dataset` behind an `Arc`.

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use super::error::DatasetResult;
use super::loader::{
    coordinates_from_reader, inner_join, load_coordinates, load_metrics, metrics_from_reader,
};
use super::types::{CoordinateRow, JoinedRow, MetricsRow};

/// The metrics table and its geo-enriched join
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    metrics: Vec<MetricsRow>,
    joined: Vec<JoinedRow>,
}

impl Dataset {
    /// Load and join the two source files
    pub fn load(metrics_path: &Path, coordinates_path: &Path) -> DatasetResult<Self> {
        let metrics = load_metrics(metrics_path)?;
        let coordinates = load_coordinates(coordinates_path)?;
        let dataset = Self::from_tables(metrics, &coordinates);

        tracing::info!(
            metrics_rows = dataset.metrics.len(),
            joined_rows = dataset.joined.len(),
            countries = dataset.countries().len(),
            "Dataset ready"
        );
        Ok(dataset)
    }

    /// Build from in-memory CSV sources
    pub fn from_readers<M: Read, C: Read>(metrics: M, coordinates: C) -> DatasetResult<Self> {
        let metrics = metrics_from_reader(metrics, Path::new("<metrics>"))?;
        let coordinates = coordinates_from_reader(coordinates, Path::new("<coordinates>"))?;
        Ok(Self::from_tables(metrics, &coordinates))
    }

    /// Build from already-parsed tables. World rows are dropped here too.
    pub fn from_tables(metrics: Vec<MetricsRow>, coordinates: &[CoordinateRow]) -> Self {
        let metrics: Vec<MetricsRow> = metrics
            .into_iter()
            .filter(|r| r.country != super::types::WORLD)
            .collect();
        let joined = inner_join(&metrics, coordinates);
        Self { metrics, joined }
    }

    pub fn metrics(&self) -> &[MetricsRow] {
        &self.metrics
    }

    pub fn joined(&self) -> &[JoinedRow] {
        &self.joined
    }

    /// Distinct years of the metrics table, ascending
    pub fn years(&self) -> Vec<i32> {
        sorted_years(self.metrics.iter().map(|r| r.year))
    }

    /// Distinct years of the joined table, ascending
    pub fn joined_years(&self) -> Vec<i32> {
        sorted_years(self.joined.iter().map(|r| r.year()))
    }

    /// (min, max) year of the metrics table
    pub fn year_range(&self) -> Option<(i32, i32)> {
        range_of(&self.years())
    }

    /// (min, max) year of the joined table
    pub fn joined_year_range(&self) -> Option<(i32, i32)> {
        range_of(&self.joined_years())
    }

    /// Distinct countries of the metrics table, in first-appearance order
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.metrics
            .iter()
            .map(|r| r.country.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

fn sorted_years(years: impl Iterator<Item = i32>) -> Vec<i32> {
    years.collect::<BTreeSet<_>>().into_iter().collect()
}

fn range_of(years: &[i32]) -> Option<(i32, i32)> {
    Some((*years.first()?, *years.last()?))
}
