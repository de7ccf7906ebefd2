//! # go-charts
//!
//! Temporal chart scaling engine for the GO dashboard.
//! Turns time-stamped records into render-ready plot geometry.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, temporal)
//! - Axis label formatting
//!
//! ## Modules
//!
//! - `bounds` - "Nice" numeric bounds and even bucket padding
//! - `chartkit` - Core primitives: scales
//! - `config` - Chart options and mode selection
//! - `error` - Configuration errors
//! - `temporal` - Resolution inference, domains, ticks and points

pub mod bounds;
pub mod chartkit;
pub mod config;
pub mod error;
pub mod temporal;

pub use bounds::*;
pub use chartkit::*;
pub use config::*;
pub use error::*;
pub use temporal::*;

use go_core::ChartSize;
use serde::{Deserialize, Serialize};

/// Pixel insets on each side of a box (margin, offset or padding)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spacing {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(spacing: f64) -> Self {
        Self::new(spacing, spacing, spacing, spacing)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub const fn zero() -> Self {
        Self::uniform(0.0)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Side-wise sum
    pub fn combine(&self, other: &Spacing) -> Spacing {
        Spacing::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }

    pub(crate) fn is_valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|side| side.is_finite() && *side >= 0.0)
    }
}

/// Pixel position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Container size with margin, offset and padding handling.
///
/// The data area is the container minus margin and offset; the plot
/// rectangle is the data area minus padding. Sizes never go negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub size: ChartSize,
    pub margin: Spacing,
    pub offset: Spacing,
    pub padding: Spacing,
}

impl ChartLayout {
    pub fn new(size: ChartSize, margin: Spacing, offset: Spacing, padding: Spacing) -> Self {
        Self {
            size,
            margin,
            offset,
            padding,
        }
    }

    /// Top-left corner of the data area
    pub fn data_area_offset(&self) -> Point {
        let outer = self.margin.combine(&self.offset);
        Point {
            x: outer.left,
            y: outer.top,
        }
    }

    /// Data area size (excluding margin and offset)
    pub fn data_area_size(&self) -> ChartSize {
        let outer = self.margin.combine(&self.offset);
        ChartSize::new(
            (self.size.width - outer.horizontal()).max(0.0),
            (self.size.height - outer.vertical()).max(0.0),
        )
    }

    /// Rectangle available to points and ticks
    pub fn plot_rect(&self) -> PlotRect {
        let origin = self.data_area_offset();
        let area = self.data_area_size();

        PlotRect {
            left: origin.x + self.padding.left,
            top: origin.y + self.padding.top,
            width: (area.width - self.padding.horizontal()).max(0.0),
            height: (area.height - self.padding.vertical()).max(0.0),
        }
    }
}
