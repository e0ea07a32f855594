//! Layout Composer
//!
//! Builds the static dashboard page once at startup:
//!
//! - **component**: The declarative component tree, parameterized from the dataset
//! - **html**: Markup rendering and the page shell
//!
//! Only the chart regions change after startup; the page script replaces them
//! with figures from the update endpoint.

pub mod component;
pub mod html;

pub use component::{compose, Component, DropdownOption, TITLE};
pub use html::{escape, render_html, render_page};

use crate::bindings::BindingRegistry;
use crate::dataset::Dataset;

/// The composed page: its tree and the rendered document
#[derive(Debug, Clone)]
pub struct Page {
    pub root: Component,
    pub html: String,
}

impl Page {
    pub fn build(dataset: &Dataset, registry: &BindingRegistry) -> Self {
        let root = compose(dataset);
        let html = render_page(&root, registry);
        tracing::debug!(bytes = html.len(), "Composed dashboard page");
        Self { root, html }
    }
}
