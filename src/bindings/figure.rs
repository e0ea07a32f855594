//! Chart Specification
//!
//! Plotly-compatible figure model. A `Figure` serializes to the
//! `{data, layout}` JSON that plotly.js renders client-side.

use serde::Serialize;

/// Qualitative palette for per-category colors
pub const SERIES_COLORS: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Sequential scale for continuous color channels
pub const CONTINUOUS_SCALE: &str = "Plasma";

/// Transition applied when a chart is replaced
pub const TRANSITION_MS: u32 = 500;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn new(trace: Trace, layout: FigureLayout) -> Self {
        Self {
            data: vec![trace],
            layout,
        }
    }

    /// Number of points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Scattergeo,
    Bar,
}

/// Coordinate values along one axis
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Values {
    Text(Vec<String>),
    Numbers(Vec<f64>),
}

impl Values {
    pub fn len(&self) -> usize {
        match self {
            Values::Text(v) => v.len(),
            Values::Numbers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One data series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Values>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<Option<f64>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Trace {
    pub fn new(kind: TraceKind) -> Self {
        Self {
            kind,
            mode: None,
            x: None,
            y: None,
            lat: None,
            lon: None,
            hovertext: None,
            customdata: None,
            hovertemplate: None,
            marker: None,
        }
    }

    /// Point count: the y values, or lat for geo traces
    pub fn len(&self) -> usize {
        self.y
            .as_ref()
            .or(self.lat.as_ref())
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker color: one color, a numeric channel, or one color per point
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MarkerColor {
    Scale(Vec<f64>),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemin: Option<f64>,
}

impl Marker {
    /// Continuous color channel with a visible color bar
    pub fn continuous(values: Vec<f64>, title: &str) -> Self {
        Self {
            color: Some(MarkerColor::Scale(values)),
            colorscale: Some(CONTINUOUS_SCALE),
            showscale: Some(true),
            colorbar: Some(ColorBar {
                title: Title::new(title),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Log,
    Category,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Axis {
    pub title: Title,
    #[serde(rename = "type")]
    pub kind: AxisType,
}

impl Axis {
    pub fn new(title: impl Into<String>, kind: AxisType) -> Self {
        Self {
            title: Title::new(title),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transition {
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Geo {
    pub projection: Projection,
    pub showcountries: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FigureLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    pub transition: Transition,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            xaxis: None,
            yaxis: None,
            geo: None,
            height: None,
            showlegend: None,
            transition: Transition {
                duration: TRANSITION_MS,
            },
        }
    }
}
