//! Chart input normalization and domain types

use crate::TemporalResolution;
use crate::temporal::calendar_difference;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// DATE-LIKE INPUT
// ============================================================================

/// Anything an x-value selector may hand back as a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateLike {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Unix timestamp in milliseconds
    Timestamp(i64),
    Text(String),
}

impl DateLike {
    /// Normalize to a naive date-time, `None` when unparsable
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(date) => Some(date.and_time(NaiveTime::MIN)),
            Self::DateTime(datetime) => Some(*datetime),
            Self::Timestamp(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc())
            }
            Self::Text(text) => parse_text(text),
        }
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

impl From<NaiveDate> for DateLike {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::DateTime(datetime)
    }
}

impl From<DateTime<Utc>> for DateLike {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::DateTime(datetime.naive_utc())
    }
}

impl From<i64> for DateLike {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl From<&str> for DateLike {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateLike {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

// ============================================================================
// NORMALIZED DATUM
// ============================================================================

/// A record that survived filtering, with its parsed coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum<T, K> {
    pub key: K,
    pub original_data: T,
    pub x_value: NaiveDateTime,
    pub y_value: f64,
}

impl<T, K> ChartDatum<T, K> {
    /// Build from raw selector output.
    ///
    /// Missing or unparsable x, and missing or non-finite y, yield `None`.
    pub fn from_parts(
        key: K,
        original_data: T,
        x_value: Option<DateLike>,
        y_value: Option<f64>,
    ) -> Option<Self> {
        let x_value = x_value?.to_datetime()?;
        let y_value = y_value.filter(|y| y.is_finite())?;

        Some(Self {
            key,
            original_data,
            x_value,
            y_value,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.x_value.date()
    }
}

// ============================================================================
// DOMAINS
// ============================================================================

/// Inclusive timestamp range spanned by the filtered data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataDomain {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DataDomain {
    pub fn from_data<T, K>(data: &[ChartDatum<T, K>]) -> Option<Self> {
        let mut iter = data.iter().map(|datum| datum.x_value);
        let first = iter.next()?;

        let (min, max) = iter.fold((first, first), |(min, max), x| (min.min(x), max.max(x)));
        Some(Self { min, max })
    }
}

/// Padded calendar range shown on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDomain {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl ChartDomain {
    /// Bucket count from `min` to `max`
    pub fn span(&self, resolution: TemporalResolution) -> i64 {
        calendar_difference(self.min, self.max, resolution)
    }
}

/// Chart domain re-expressed as bucket offsets from its start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: i64,
    pub max: i64,
}

impl AxisDomain {
    pub fn from_chart_domain(domain: &ChartDomain, resolution: TemporalResolution) -> Self {
        Self {
            min: 0,
            max: domain.span(resolution),
        }
    }
}

/// Pixel size of a rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub const ZERO: ChartSize = ChartSize {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True until layout has produced a measurable area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
