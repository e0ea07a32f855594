//! Core table types for the dashboard dataset
//!
//! - `MetricsRow`: one country-year of mental-health statistics
//! - `CoordinateRow`: a country's location and population
//! - `JoinedRow`: the two combined on the country key
//! - `Metric`: the selectable metric columns

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the aggregate row excluded from every table
pub const WORLD: &str = "World";

/// One country-year of mental-health statistics
///
/// Empty numeric cells load as NaN, which serializes to JSON `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsRow {
    pub country: String,
    pub year: i32,
    #[serde(deserialize_with = "float_or_nan")]
    pub prevalence: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub suicide_rate: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub anxiety_disorder: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub eating_disorder: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub drug_use_disorders: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub bipolar_disorder: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub alcohol_use_disorders: f64,
    /// Hover detail on the geo chart; absent in some exports
    #[serde(default)]
    pub prevalence_in_males: Option<f64>,
    #[serde(default)]
    pub prevalence_in_females: Option<f64>,
}

impl MetricsRow {
    /// Create a row with every metric set to the same value
    pub fn new(country: impl Into<String>, year: i32, value: f64) -> Self {
        Self {
            country: country.into(),
            year,
            prevalence: value,
            suicide_rate: value,
            anxiety_disorder: value,
            eating_disorder: value,
            drug_use_disorders: value,
            bipolar_disorder: value,
            alcohol_use_disorders: value,
            prevalence_in_males: None,
            prevalence_in_females: None,
        }
    }

    /// Builder method: set a single metric
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::Prevalence => self.prevalence = value,
            Metric::SuicideRate => self.suicide_rate = value,
            Metric::AnxietyDisorder => self.anxiety_disorder = value,
            Metric::EatingDisorder => self.eating_disorder = value,
            Metric::DrugUseDisorders => self.drug_use_disorders = value,
            Metric::BipolarDisorder => self.bipolar_disorder = value,
            Metric::AlcoholUseDisorders => self.alcohol_use_disorders = value,
        }
        self
    }

    /// Value of the given metric column
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Prevalence => self.prevalence,
            Metric::SuicideRate => self.suicide_rate,
            Metric::AnxietyDisorder => self.anxiety_disorder,
            Metric::EatingDisorder => self.eating_disorder,
            Metric::DrugUseDisorders => self.drug_use_disorders,
            Metric::BipolarDisorder => self.bipolar_disorder,
            Metric::AlcoholUseDisorders => self.alcohol_use_disorders,
        }
    }
}

/// A country's location and population
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinateRow {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub population: f64,
}

impl CoordinateRow {
    pub fn new(country: impl Into<String>, latitude: f64, longitude: f64, population: f64) -> Self {
        Self {
            country: country.into(),
            latitude,
            longitude,
            population,
        }
    }
}

/// Metrics row enriched with its country's coordinates
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JoinedRow {
    #[serde(flatten)]
    pub metrics: MetricsRow,
    pub latitude: f64,
    pub longitude: f64,
    pub population: f64,
}

impl JoinedRow {
    pub fn new(metrics: MetricsRow, coordinates: &CoordinateRow) -> Self {
        Self {
            metrics,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            population: coordinates.population,
        }
    }

    pub fn country(&self) -> &str {
        &self.metrics.country
    }

    pub fn year(&self) -> i32 {
        self.metrics.year
    }
}

/// A selectable metric column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Prevalence,
    SuicideRate,
    AnxietyDisorder,
    EatingDisorder,
    DrugUseDisorders,
    BipolarDisorder,
    AlcoholUseDisorders,
}

impl Metric {
    /// All metrics, in column order of the source file
    pub const ALL: [Metric; 7] = [
        Metric::Prevalence,
        Metric::SuicideRate,
        Metric::AnxietyDisorder,
        Metric::EatingDisorder,
        Metric::DrugUseDisorders,
        Metric::BipolarDisorder,
        Metric::AlcoholUseDisorders,
    ];

    /// Normalized column key
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Prevalence => "prevalence",
            Metric::SuicideRate => "suicide_rate",
            Metric::AnxietyDisorder => "anxiety_disorder",
            Metric::EatingDisorder => "eating_disorder",
            Metric::DrugUseDisorders => "drug_use_disorders",
            Metric::BipolarDisorder => "bipolar_disorder",
            Metric::AlcoholUseDisorders => "alcohol_use_disorders",
        }
    }

    /// Human-readable axis label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Prevalence => "Prevalence",
            Metric::SuicideRate => "Suicide rate",
            Metric::AnxietyDisorder => "Anxiety disorder",
            Metric::EatingDisorder => "Eating disorder",
            Metric::DrugUseDisorders => "Drug use disorders",
            Metric::BipolarDisorder => "Bipolar disorder",
            Metric::AlcoholUseDisorders => "Alcohol use disorders",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a column key names no metric
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = super::loader::normalize_column_key(s);
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

fn float_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_from_str() {
        assert_eq!("suicide_rate".parse::<Metric>(), Ok(Metric::SuicideRate));
        // Source header carries a trailing space
        assert_eq!(
            "alcohol_use_disorders ".parse::<Metric>(),
            Ok(Metric::AlcoholUseDisorders)
        );
        assert_eq!("prevelance".parse::<Metric>(), Ok(Metric::Prevalence));
        assert!("population".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_keys_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>(), Ok(metric));
        }
    }

    #[test]
    fn test_row_value_and_builder() {
        let row = MetricsRow::new("France", 2015, 1.0).with(Metric::EatingDisorder, 0.3);
        assert_eq!(row.value(Metric::EatingDisorder), 0.3);
        assert_eq!(row.value(Metric::Prevalence), 1.0);
    }

    #[test]
    fn test_joined_row_serializes_flat() {
        let coords = CoordinateRow::new("France", 46.2, 2.2, 67_000_000.0);
        let row = JoinedRow::new(MetricsRow::new("France", 2015, 1.0), &coords);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["country"], "France");
        assert_eq!(json["latitude"], 46.2);
        assert_eq!(row.country(), "France");
        assert_eq!(row.year(), 2015);
    }
}
