//! Domain layer for the glossary dashboard.
//!
//! Holds the records returned by the glossary API, the per-view load state
//! and the HTML rendering of both list views and the page around them.

pub mod render;
pub mod types;
pub mod view;

pub use types::{BusinessDomain, BusinessTerm};
pub use view::ViewState;
