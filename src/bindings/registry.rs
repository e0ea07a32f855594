//! Binding Registry
//!
//! Explicit table of reactive bindings: which control identifiers feed which
//! chart, and the pure handler that recomputes it. The web layer looks up the
//! binding for an event and hands it the current control values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::figure::Figure;
use super::views::{bar_view, column_scatter, geo_view, line_view};
use crate::dataset::{Dataset, Metric};

/// Control and chart identifiers shared with the page layout
pub mod ids {
    pub const SCATTER_DROPDOWN: &str = "scatter-dropdown";
    pub const SCATTER_GRAPH: &str = "scatter-graph";

    pub const BAR_DROPDOWN_Y: &str = "bar-dropdown-y";
    pub const BAR_YEAR_SLIDER: &str = "year-slider-bar";
    pub const BAR_GRAPH: &str = "bar-graph";

    pub const GEO_YEAR_SLIDER: &str = "year-slider";
    pub const GEO_GRAPH: &str = "geo_scatter";

    pub const LINE_DROPDOWN_Y: &str = "line-dropdown-y";
    pub const LINE_DROPDOWN_COUNTRY: &str = "line-dropdown-country";
    pub const LINE_GRAPH: &str = "line-graph";
}

/// Errors raised while dispatching a control event
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("No binding for output '{0}'")]
    UnknownOutput(String),

    #[error("Missing value for input '{0}'")]
    MissingInput(String),

    #[error("Invalid value for input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },
}

pub type BindingResult<T> = Result<T, BindingError>;

/// Current control values, keyed by control id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct InputValues(HashMap<String, Value>);

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set one control value
    pub fn with(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(id.into(), value.into());
        self
    }

    fn raw(&self, id: &str) -> BindingResult<&Value> {
        match self.0.get(id) {
            None | Some(Value::Null) => Err(BindingError::MissingInput(id.to_string())),
            Some(value) => Ok(value),
        }
    }

    /// A slider value. Sliders may report whole numbers as floats or strings.
    pub fn year(&self, id: &str) -> BindingResult<i32> {
        let value = self.raw(id)?;
        let year = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        year.and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| invalid(id, format!("expected a year, got {}", value)))
    }

    /// A metric dropdown value (column key)
    pub fn metric(&self, id: &str) -> BindingResult<Metric> {
        let key = self.text(id)?;
        key.parse().map_err(|e: crate::dataset::UnknownMetric| invalid(id, e.to_string()))
    }

    /// A country dropdown value
    pub fn country(&self, id: &str) -> BindingResult<&str> {
        self.text(id)
    }

    fn text(&self, id: &str) -> BindingResult<&str> {
        let value = self.raw(id)?;
        value
            .as_str()
            .ok_or_else(|| invalid(id, format!("expected a string, got {}", value)))
    }
}

fn invalid(id: &str, reason: String) -> BindingError {
    BindingError::InvalidInput {
        input: id.to_string(),
        reason,
    }
}

/// Handler recomputing one chart from the current control values
pub type Handler = fn(&Dataset, &InputValues) -> BindingResult<Figure>;

/// One input→output dependency
#[derive(Clone, Copy)]
pub struct Binding {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
    pub handler: Handler,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish()
    }
}

fn update_geo(dataset: &Dataset, inputs: &InputValues) -> BindingResult<Figure> {
    let year = inputs.year(ids::GEO_YEAR_SLIDER)?;
    Ok(geo_view(dataset, year).figure())
}

fn update_scatter(dataset: &Dataset, inputs: &InputValues) -> BindingResult<Figure> {
    let metric = inputs.metric(ids::SCATTER_DROPDOWN)?;
    Ok(column_scatter(dataset, metric).figure())
}

fn update_bar(dataset: &Dataset, inputs: &InputValues) -> BindingResult<Figure> {
    let metric = inputs.metric(ids::BAR_DROPDOWN_Y)?;
    let year = inputs.year(ids::BAR_YEAR_SLIDER)?;
    Ok(bar_view(dataset, metric, year).figure())
}

fn update_line(dataset: &Dataset, inputs: &InputValues) -> BindingResult<Figure> {
    let metric = inputs.metric(ids::LINE_DROPDOWN_Y)?;
    let country = inputs.country(ids::LINE_DROPDOWN_COUNTRY)?;
    Ok(line_view(dataset, metric, country).figure())
}

/// All registered bindings, in page order
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's four charts
    pub fn standard() -> Self {
        Self::new()
            .register(Binding {
                output: ids::GEO_GRAPH,
                inputs: &[ids::GEO_YEAR_SLIDER],
                handler: update_geo,
            })
            .register(Binding {
                output: ids::SCATTER_GRAPH,
                inputs: &[ids::SCATTER_DROPDOWN],
                handler: update_scatter,
            })
            .register(Binding {
                output: ids::BAR_GRAPH,
                inputs: &[ids::BAR_DROPDOWN_Y, ids::BAR_YEAR_SLIDER],
                handler: update_bar,
            })
            .register(Binding {
                output: ids::LINE_GRAPH,
                inputs: &[ids::LINE_DROPDOWN_Y, ids::LINE_DROPDOWN_COUNTRY],
                handler: update_line,
            })
    }

    /// Builder method: add a binding, replacing any for the same output
    pub fn register(mut self, binding: Binding) -> Self {
        self.bindings.retain(|b| b.output != binding.output);
        self.bindings.push(binding);
        self
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn get(&self, output: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.output == output)
    }

    /// Bindings to recompute when `input` changes
    pub fn affected_by<'a>(&'a self, input: &'a str) -> impl Iterator<Item = &'a Binding> + 'a {
        self.bindings
            .iter()
            .filter(move |b| b.inputs.contains(&input))
    }

    /// Recompute one chart
    pub fn dispatch(
        &self,
        dataset: &Dataset,
        output: &str,
        inputs: &InputValues,
    ) -> BindingResult<Figure> {
        let binding = self
            .get(output)
            .ok_or_else(|| BindingError::UnknownOutput(output.to_string()))?;

        let figure = (binding.handler)(dataset, inputs)?;
        tracing::debug!(output, points = figure.point_count(), "Recomputed figure");
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CoordinateRow, MetricsRow};
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_tables(
            vec![
                MetricsRow::new("US", 2015, 1.0),
                MetricsRow::new("US", 2016, 2.0),
                MetricsRow::new("FR", 2015, 3.0),
            ],
            &[CoordinateRow::new("US", 38.0, -97.0, 331e6)],
        )
    }

    #[test]
    fn test_standard_registry() {
        let registry = BindingRegistry::standard();
        assert_eq!(registry.bindings().len(), 4);
        assert!(registry.get(ids::LINE_GRAPH).is_some());
        assert!(registry.get("pie-graph").is_none());
    }

    #[test]
    fn test_affected_by() {
        let registry = BindingRegistry::standard();
        let outputs: Vec<&str> = registry
            .affected_by(ids::BAR_YEAR_SLIDER)
            .map(|b| b.output)
            .collect();
        assert_eq!(outputs, vec![ids::BAR_GRAPH]);
        assert_eq!(registry.affected_by("nothing").count(), 0);
    }

    #[test]
    fn test_register_replaces_output() {
        let registry = BindingRegistry::standard().register(Binding {
            output: ids::GEO_GRAPH,
            inputs: &[ids::BAR_YEAR_SLIDER],
            handler: update_geo,
        });
        assert_eq!(registry.bindings().len(), 4);
        assert_eq!(registry.affected_by(ids::BAR_YEAR_SLIDER).count(), 2);
    }

    #[test]
    fn test_dispatch_bar() {
        let ds = sample();
        let inputs = InputValues::new()
            .with(ids::BAR_DROPDOWN_Y, "prevalence")
            .with(ids::BAR_YEAR_SLIDER, 2015);

        let fig = BindingRegistry::standard()
            .dispatch(&ds, ids::BAR_GRAPH, &inputs)
            .unwrap();
        assert_eq!(fig.point_count(), 2);
    }

    #[test]
    fn test_dispatch_geo_accepts_float_year() {
        let ds = sample();
        let inputs = InputValues::new().with(ids::GEO_YEAR_SLIDER, 2016.0);
        let fig = BindingRegistry::standard()
            .dispatch(&ds, ids::GEO_GRAPH, &inputs)
            .unwrap();
        assert_eq!(fig.point_count(), 1);
    }

    #[test]
    fn test_dispatch_unknown_country_renders_empty() {
        let ds = sample();
        let inputs = InputValues::new()
            .with(ids::LINE_DROPDOWN_Y, "suicide_rate")
            .with(ids::LINE_DROPDOWN_COUNTRY, "Atlantis");
        let fig = BindingRegistry::standard()
            .dispatch(&ds, ids::LINE_GRAPH, &inputs)
            .unwrap();
        assert_eq!(fig.point_count(), 0);
    }

    #[test]
    fn test_dispatch_errors() {
        let ds = sample();
        let registry = BindingRegistry::standard();

        let err = registry
            .dispatch(&ds, "pie-graph", &InputValues::new())
            .unwrap_err();
        assert_eq!(err, BindingError::UnknownOutput("pie-graph".to_string()));

        let err = registry
            .dispatch(&ds, ids::SCATTER_GRAPH, &InputValues::new())
            .unwrap_err();
        assert_eq!(
            err,
            BindingError::MissingInput(ids::SCATTER_DROPDOWN.to_string())
        );

        let inputs = InputValues::new().with(ids::SCATTER_DROPDOWN, "population");
        assert!(matches!(
            registry.dispatch(&ds, ids::SCATTER_GRAPH, &inputs),
            Err(BindingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_input_values_from_json() {
        let inputs: InputValues = serde_json::from_value(json!({
            "year-slider": "2015",
            "line-dropdown-country": null,
            "scatter-dropdown": 3,
        }))
        .unwrap();

        assert_eq!(inputs.year(ids::GEO_YEAR_SLIDER), Ok(2015));
        assert!(matches!(
            inputs.country(ids::LINE_DROPDOWN_COUNTRY),
            Err(BindingError::MissingInput(_))
        ));
        assert!(matches!(
            inputs.metric(ids::SCATTER_DROPDOWN),
            Err(BindingError::InvalidInput { .. })
        ));
        assert!(inputs.year("year-slider-bar").is_err());
        assert!(InputValues::new().with("y", 2015.5).year("y").is_err());
    }
}
