//! API Routes
//!
//! Route handlers organized by functionality.

pub mod bindings;
pub mod dataset;
pub mod health;
pub mod page;
