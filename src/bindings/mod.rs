//! Reactive Binding Layer
//!
//! Maps control values to charts. Each binding is a pure function of the
//! current values of its declared inputs over the shared, read-only dataset;
//! nothing accumulates between events, so events can be served in any order.
//!
//! | Output          | Inputs                                     | View             |
//! |-----------------|--------------------------------------------|------------------|
//! | `geo_scatter`   | `year-slider`                              | `geo_view`       |
//! | `scatter-graph` | `scatter-dropdown`                         | `column_scatter` |
//! | `bar-graph`     | `bar-dropdown-y`, `year-slider-bar`        | `bar_view`       |
//! | `line-graph`    | `line-dropdown-y`, `line-dropdown-country` | `line_view`      |

pub mod figure;
pub mod registry;
pub mod views;

pub use figure::Figure;
pub use registry::{ids, Binding, BindingError, BindingRegistry, BindingResult, Handler, InputValues};
pub use views::{bar_view, column_scatter, geo_view, line_view, BarView, ColumnScatter, GeoView, LineView};
