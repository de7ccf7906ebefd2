//! # go-state
//!
//! Reactive chart state for the GO dashboard.
//! Uses Leptos signals so chart geometry recomputes only when the data or
//! the container size changes.

pub mod chart;
pub mod size;

pub use chart::*;
pub use size::*;
