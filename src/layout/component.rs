//! Page component tree
//!
//! Declarative description of the dashboard: sections of controls and chart
//! placeholders. Composed once from the dataset's ranges at startup.

use serde::Serialize;

use crate::bindings::ids;
use crate::dataset::{Dataset, Metric};

pub const TITLE: &str = "Mental Health/Depression/Suicides";

const BAR_SLIDER_STEP: i32 = 1;
const GEO_SLIDER_STEP: i32 = 2;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// One node of the page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Div {
        class_name: Option<String>,
        children: Vec<Component>,
    },
    Heading {
        level: u8,
        text: String,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: Option<String>,
    },
    Slider {
        id: String,
        min: i32,
        max: i32,
        step: i32,
        value: i32,
        marks: Vec<i32>,
    },
    Graph {
        id: String,
    },
    Break,
}

impl Component {
    pub fn div(class_name: &str, children: Vec<Component>) -> Self {
        Component::Div {
            class_name: Some(class_name.to_string()),
            children,
        }
    }

    pub fn heading(level: u8, text: &str) -> Self {
        Component::Heading {
            level,
            text: text.to_string(),
        }
    }

    pub fn graph(id: &str) -> Self {
        Component::Graph { id: id.to_string() }
    }

    /// Element id, for controls and graphs
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Dropdown { id, .. }
            | Component::Slider { id, .. }
            | Component::Graph { id } => Some(id.as_str()),
            _ => None,
        }
    }

    /// Depth-first search by element id
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id() == Some(id) {
            return Some(self);
        }
        match self {
            Component::Div { children, .. } => children.iter().find_map(|c| c.find(id)),
            _ => None,
        }
    }
}

fn metric_dropdown(id: &str) -> Component {
    Component::Dropdown {
        id: id.to_string(),
        options: Metric::ALL
            .iter()
            .map(|m| DropdownOption {
                label: m.label().to_string(),
                value: m.key().to_string(),
            })
            .collect(),
        value: Metric::ALL.first().map(|m| m.key().to_string()),
    }
}

/// A year slider starting at its minimum; degenerates to 0..0 without data
fn year_slider(id: &str, range: Option<(i32, i32)>, step: i32, marks: Vec<i32>) -> Component {
    let (min, max) = range.unwrap_or((0, 0));
    Component::Slider {
        id: id.to_string(),
        min,
        max,
        step,
        value: min,
        marks,
    }
}

fn labelled(label: &str, control: Component, class_name: &str) -> Component {
    Component::div(class_name, vec![Component::heading(4, label), control])
}

/// Build the dashboard page from the dataset's ranges
pub fn compose(dataset: &Dataset) -> Component {
    let years = dataset.years();

    let scatter = Component::div(
        "scatter_plot_field",
        vec![
            labelled("Y: ", metric_dropdown(ids::SCATTER_DROPDOWN), "dropdown-field"),
            Component::graph(ids::SCATTER_GRAPH),
        ],
    );

    let bar = Component::div(
        "bar_plot_field",
        vec![
            labelled("Y: ", metric_dropdown(ids::BAR_DROPDOWN_Y), "dropdown-field"),
            Component::div(
                "slider-field",
                vec![year_slider(
                    ids::BAR_YEAR_SLIDER,
                    dataset.year_range(),
                    BAR_SLIDER_STEP,
                    years.clone(),
                )],
            ),
            Component::graph(ids::BAR_GRAPH),
        ],
    );

    let geo = Component::div(
        "geo_scatter_field",
        vec![
            Component::graph(ids::GEO_GRAPH),
            year_slider(
                ids::GEO_YEAR_SLIDER,
                dataset.joined_year_range(),
                GEO_SLIDER_STEP,
                years,
            ),
        ],
    );

    let countries = dataset.countries();
    let country_dropdown = Component::Dropdown {
        id: ids::LINE_DROPDOWN_COUNTRY.to_string(),
        options: countries
            .iter()
            .map(|c| DropdownOption {
                label: c.to_string(),
                value: c.to_string(),
            })
            .collect(),
        value: countries.first().map(|c| c.to_string()),
    };

    let line = Component::div(
        "line_plot_field",
        vec![
            labelled("Country: ", country_dropdown, "slider-field"),
            labelled("Y: ", metric_dropdown(ids::LINE_DROPDOWN_Y), "dropdown-field"),
            Component::graph(ids::LINE_GRAPH),
        ],
    );

    Component::div(
        "app_wrapper",
        vec![
            Component::heading(1, TITLE),
            Component::Div {
                class_name: None,
                children: vec![scatter, bar, geo, line, Component::Break, Component::Break],
            },
        ],
    )
}
