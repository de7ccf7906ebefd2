//! Temporal chart options
//!
//! The two layout modes are a tagged union, so a yearly chart can never
//! carry a resolution or tick-count override.

use crate::{ChartError, ChartResult, Spacing};
use chrono::{Local, NaiveDate};
use go_core::TemporalResolution;
use serde::{Deserialize, Serialize};

/// Default number of y-axis ticks
pub const DEFAULT_Y_AXIS_TICKS: usize = 6;

/// Minimum number of x-axis ticks
pub const MIN_X_AXIS_TICKS: usize = 3;

/// Maximum number of x-axis ticks
pub const MAX_X_AXIS_TICKS: usize = 12;

// ============================================================================
// POLICIES
// ============================================================================

/// How the x-axis bucket granularity is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    #[default]
    Auto,
    Year,
    Month,
    Day,
}

impl ResolutionPolicy {
    /// Explicit override, `None` for auto
    pub fn fixed(&self) -> Option<TemporalResolution> {
        match self {
            Self::Auto => None,
            Self::Year => Some(TemporalResolution::Year),
            Self::Month => Some(TemporalResolution::Month),
            Self::Day => Some(TemporalResolution::Day),
        }
    }
}

impl From<TemporalResolution> for ResolutionPolicy {
    fn from(resolution: TemporalResolution) -> Self {
        match resolution {
            TemporalResolution::Year => Self::Year,
            TemporalResolution::Month => Self::Month,
            TemporalResolution::Day => Self::Day,
        }
    }
}

/// How many x-axis ticks to draw: `"auto"` or a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "TickCountRepr", into = "TickCountRepr")]
pub enum TickCountPolicy {
    #[default]
    Auto,
    Fixed(usize),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TickCountRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<TickCountRepr> for TickCountPolicy {
    type Error = String;

    fn try_from(repr: TickCountRepr) -> Result<Self, Self::Error> {
        match repr {
            TickCountRepr::Count(count) => Ok(Self::Fixed(count)),
            TickCountRepr::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            TickCountRepr::Keyword(keyword) => Err(format!("unknown tick count policy `{keyword}`")),
        }
    }
}

impl From<TickCountPolicy> for TickCountRepr {
    fn from(policy: TickCountPolicy) -> Self {
        match policy {
            TickCountPolicy::Auto => Self::Keyword("auto".to_string()),
            TickCountPolicy::Fixed(count) => Self::Count(count),
        }
    }
}

// ============================================================================
// MODE
// ============================================================================

/// Axis layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartMode {
    /// Twelve months of the current year; data of any year is overlaid by month
    Yearly,
    /// Resolution-aware layout over the data's own time span
    #[serde(rename_all = "camelCase")]
    Temporal {
        #[serde(default)]
        temporal_resolution: ResolutionPolicy,
        #[serde(default)]
        num_x_axis_ticks: TickCountPolicy,
    },
}

impl ChartMode {
    pub fn is_yearly(&self) -> bool {
        matches!(self, Self::Yearly)
    }
}

impl Default for ChartMode {
    fn default() -> Self {
        Self::Temporal {
            temporal_resolution: ResolutionPolicy::Auto,
            num_x_axis_ticks: TickCountPolicy::Auto,
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Temporal chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemporalChartOptions {
    pub chart_margin: Spacing,
    pub chart_offset: Spacing,
    pub chart_padding: Spacing,
    pub num_y_axis_ticks: usize,
    pub mode: ChartMode,
    /// Date treated as "today"; the local date when unset
    pub reference_date: Option<NaiveDate>,
}

impl Default for TemporalChartOptions {
    fn default() -> Self {
        Self {
            chart_margin: Spacing::zero(),
            chart_offset: Spacing::zero(),
            chart_padding: Spacing::zero(),
            num_y_axis_ticks: DEFAULT_Y_AXIS_TICKS,
            mode: ChartMode::default(),
            reference_date: None,
        }
    }
}

impl TemporalChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Year-over-year layout
    pub fn yearly() -> Self {
        Self {
            mode: ChartMode::Yearly,
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.chart_margin = margin;
        self
    }

    pub fn with_offset(mut self, offset: Spacing) -> Self {
        self.chart_offset = offset;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.chart_padding = padding;
        self
    }

    pub fn with_y_axis_ticks(mut self, count: usize) -> Self {
        self.num_y_axis_ticks = count;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Force a resolution (switches a yearly chart back to temporal mode)
    pub fn with_resolution(mut self, resolution: impl Into<ResolutionPolicy>) -> Self {
        let num_x_axis_ticks = match self.mode {
            ChartMode::Temporal {
                num_x_axis_ticks, ..
            } => num_x_axis_ticks,
            ChartMode::Yearly => TickCountPolicy::Auto,
        };
        self.mode = ChartMode::Temporal {
            temporal_resolution: resolution.into(),
            num_x_axis_ticks,
        };
        self
    }

    /// Force an x tick count (switches a yearly chart back to temporal mode)
    pub fn with_x_axis_ticks(mut self, policy: TickCountPolicy) -> Self {
        let temporal_resolution = match self.mode {
            ChartMode::Temporal {
                temporal_resolution,
                ..
            } => temporal_resolution,
            ChartMode::Yearly => ResolutionPolicy::Auto,
        };
        self.mode = ChartMode::Temporal {
            temporal_resolution,
            num_x_axis_ticks: policy,
        };
        self
    }

    /// Resolved "today"
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Parse and validate options from JSON
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, spacing) in [
            ("chartMargin", &self.chart_margin),
            ("chartOffset", &self.chart_offset),
            ("chartPadding", &self.chart_padding),
        ] {
            if !spacing.is_valid() {
                return Err(ChartError::InvalidOption(format!(
                    "{name} must be finite and non-negative"
                )));
            }
        }

        if self.num_y_axis_ticks < 2 {
            return Err(ChartError::InvalidOption(format!(
                "numYAxisTicks must be at least 2, got {}",
                self.num_y_axis_ticks
            )));
        }

        Ok(())
    }
}
