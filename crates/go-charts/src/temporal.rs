//! Temporal chart scaling engine
//!
//! Converts time-stamped records into plot coordinates, axis ticks and
//! labels for a container of a given pixel size. Every call recomputes
//! from scratch; identical inputs always give identical geometry.
//!
//! Pipeline: filter records -> data domain -> resolution and tick count
//! -> padded chart domain -> scales -> points and ticks.

use std::sync::Arc;

use crate::{
    Bounds, ChartLayout, ChartMode, LinearScale, MAX_X_AXIS_TICKS, MIN_X_AXIS_TICKS, Point,
    Scale, Spacing, TemporalChartOptions, TickCountPolicy, get_bounds, get_even_distribution,
    get_intervals,
};
use chrono::{Datelike, NaiveDate};
use go_core::{
    AxisDomain, AxisLabelFormatter, ChartDatum, ChartDomain, ChartSize, CompactNumberFormatter,
    DataDomain, DateLike, TemporalResolution, bucket_index, bucket_limits, bucket_start,
    calendar_difference, format_month_label, format_tick_label, full_difference,
};

/// Spans above this many buckets switch to the next coarser resolution
const RESOLUTION_THRESHOLD: i64 = MIN_X_AXIS_TICKS as i64;

/// Damping term of the tick-count rank `n / (padding + 5)`
const TICK_RANK_DAMPING: f64 = 5.0;

// ============================================================================
// SELECTORS
// ============================================================================

pub type KeySelector<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;
pub type XValueSelector<T> = Arc<dyn Fn(&T, usize) -> Option<DateLike> + Send + Sync>;
pub type YValueSelector<T> = Arc<dyn Fn(&T, usize) -> Option<f64> + Send + Sync>;

/// Accessors pulling key, x and y out of opaque records
pub struct DataSelectors<T, K> {
    pub key: KeySelector<T, K>,
    pub x_value: XValueSelector<T>,
    pub y_value: YValueSelector<T>,
    pub y_axis_label: Arc<dyn AxisLabelFormatter>,
}

impl<T, K> DataSelectors<T, K> {
    /// Selectors with the compact y-axis label formatter
    pub fn new(
        key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
        x_value: impl Fn(&T, usize) -> Option<DateLike> + Send + Sync + 'static,
        y_value: impl Fn(&T, usize) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: Arc::new(key),
            x_value: Arc::new(x_value),
            y_value: Arc::new(y_value),
            y_axis_label: Arc::new(CompactNumberFormatter),
        }
    }

    pub fn with_y_axis_label(mut self, formatter: impl AxisLabelFormatter + 'static) -> Self {
        self.y_axis_label = Arc::new(formatter);
        self
    }
}

impl<T, K> Clone for DataSelectors<T, K> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            x_value: Arc::clone(&self.x_value),
            y_value: Arc::clone(&self.y_value),
            y_axis_label: Arc::clone(&self.y_axis_label),
        }
    }
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Data point with its pixel position
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint<T, K> {
    pub datum: ChartDatum<T, K>,
    pub x: f64,
    pub y: f64,
}

/// Tick on the time axis
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisTick {
    /// Bucket offset from the chart domain start
    pub key: i64,
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
}

/// Tick on the value axis
#[derive(Debug, Clone, PartialEq)]
pub struct YAxisTick {
    pub key: usize,
    pub value: f64,
    pub y: f64,
    pub label: String,
}

/// Time-axis scale: dates become bucket offsets, offsets become pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalScale {
    resolution: TemporalResolution,
    domain_min: NaiveDate,
    yearly: bool,
    linear: LinearScale,
}

impl TemporalScale {
    pub fn new(
        resolution: TemporalResolution,
        domain: &ChartDomain,
        yearly: bool,
        range: (f64, f64),
    ) -> Self {
        let span = domain.span(resolution);
        Self {
            resolution,
            domain_min: domain.min,
            yearly,
            linear: LinearScale::new()
                .domain(0.0, span as f64)
                .range(range.0, range.1),
        }
    }

    /// Bucket offset of `date` from the domain start.
    ///
    /// Yearly charts only look at the month, so any year lands on the
    /// current year's axis.
    pub fn relative_x(&self, date: NaiveDate) -> i64 {
        if self.yearly {
            date.month0() as i64
        } else {
            calendar_difference(self.domain_min, date, self.resolution)
        }
    }

    pub fn scale_offset(&self, offset: f64) -> f64 {
        self.linear.scale(offset)
    }

    pub fn scale_date(&self, date: NaiveDate) -> f64 {
        self.scale_offset(self.relative_x(date) as f64)
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.linear.range_bounds()
    }
}

impl Scale for TemporalScale {
    fn scale(&self, value: f64) -> f64 {
        self.linear.scale(value)
    }

    fn invert(&self, value: f64) -> f64 {
        self.linear.invert(value)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        self.linear.ticks(count)
    }
}

/// Render-ready chart geometry
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalChartData<T, K> {
    pub chart_points: Vec<ChartPoint<T, K>>,
    pub x_axis_ticks: Vec<XAxisTick>,
    pub y_axis_ticks: Vec<YAxisTick>,
    pub chart_size: ChartSize,
    pub x_scale: TemporalScale,
    pub y_scale: LinearScale,
    pub data_area_size: ChartSize,
    pub data_area_offset: Point,
    pub chart_margin: Spacing,
    pub temporal_resolution: TemporalResolution,
    pub num_x_axis_ticks: usize,
    pub chart_domain: ChartDomain,
    pub axis_domain: AxisDomain,
    pub y_bounds: Bounds,
}

// ============================================================================
// RESOLUTION & TICK COUNT
// ============================================================================

/// Coarsest resolution that still yields more than three buckets
pub fn infer_resolution(domain: &DataDomain) -> TemporalResolution {
    let years = full_difference(domain.min, domain.max, TemporalResolution::Year);
    let months = full_difference(domain.min, domain.max, TemporalResolution::Month);

    if years > RESOLUTION_THRESHOLD {
        TemporalResolution::Year
    } else if months > RESOLUTION_THRESHOLD {
        TemporalResolution::Month
    } else {
        TemporalResolution::Day
    }
}

/// Tick count in `[3, 12]` that splits `span` with the least padding.
///
/// Each candidate `n` is ranked `n / (padding + 5)` where padding is the
/// number of buckets needed to make `span` a multiple of `n`. Ties go to
/// the larger count.
pub fn best_tick_count(span: i64) -> usize {
    let span = span.max(0);
    let mut best = (MAX_X_AXIS_TICKS, f64::MIN);

    for candidate in (MIN_X_AXIS_TICKS..=MAX_X_AXIS_TICKS).rev() {
        let n = candidate as i64;
        let padding = (n - span % n) % n;
        let rank = candidate as f64 / (padding as f64 + TICK_RANK_DAMPING);

        if rank > best.1 {
            best = (candidate, rank);
        }
    }

    best.0.clamp(MIN_X_AXIS_TICKS, MAX_X_AXIS_TICKS)
}

/// Resolution and x tick count for a mode and (possibly absent) data domain
pub fn resolve_axis_layout(
    mode: &ChartMode,
    domain: Option<&DataDomain>,
) -> (TemporalResolution, usize) {
    match mode {
        ChartMode::Yearly => (TemporalResolution::Month, MAX_X_AXIS_TICKS),
        ChartMode::Temporal {
            temporal_resolution,
            num_x_axis_ticks,
        } => {
            let resolution = temporal_resolution
                .fixed()
                .or_else(|| domain.map(infer_resolution))
                .unwrap_or(TemporalResolution::Day);

            let ticks = match num_x_axis_ticks {
                TickCountPolicy::Fixed(count) => (*count).clamp(MIN_X_AXIS_TICKS, MAX_X_AXIS_TICKS),
                TickCountPolicy::Auto => domain
                    .map(|d| best_tick_count(full_difference(d.min, d.max, resolution)))
                    .unwrap_or(MIN_X_AXIS_TICKS),
            };

            (resolution, ticks)
        }
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// Padded calendar range for the chart.
///
/// - yearly: Jan 1 to Dec 1 of `today`'s year
/// - no data: the last `num_ticks` buckets ending with today's bucket
/// - data: the data's buckets padded evenly so the span splits into `num_ticks`
///
/// Padding that would leave the calendar is cut at the first or last
/// representable bucket.
pub fn compute_chart_domain(
    domain: Option<&DataDomain>,
    resolution: TemporalResolution,
    num_ticks: usize,
    yearly: bool,
    today: NaiveDate,
) -> ChartDomain {
    let (min_index, max_index) = if yearly {
        let january = today.year() as i64 * 12;
        (january, january + 11)
    } else if let Some(domain) = domain {
        let lo = bucket_index(domain.min.date(), resolution);
        let hi = bucket_index(domain.max.date(), resolution);
        let padding = get_even_distribution(lo, hi, num_ticks);
        (lo - padding.left, hi + padding.right)
    } else {
        let end = bucket_index(today, resolution);
        (end - num_ticks as i64, end)
    };

    let resolution = if yearly {
        TemporalResolution::Month
    } else {
        resolution
    };

    let (first, last) = bucket_limits(resolution);
    let min_index = min_index.clamp(first, last);
    let max_index = max_index.clamp(first, last);

    match (
        bucket_start(min_index, resolution),
        bucket_start(max_index, resolution),
    ) {
        (Some(min), Some(max)) => ChartDomain { min, max },
        _ => {
            tracing::warn!(
                "Chart domain {}..{} out of calendar range, collapsing to today",
                min_index,
                max_index
            );
            ChartDomain {
                min: today,
                max: today,
            }
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Apply selectors and drop records with missing or unparsable x/y
pub fn collect_chart_data<T: Clone, K>(
    data: &[T],
    selectors: &DataSelectors<T, K>,
) -> Vec<ChartDatum<T, K>> {
    let chart_data: Vec<_> = data
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            ChartDatum::from_parts(
                (selectors.key)(item, index),
                item.clone(),
                (selectors.x_value)(item, index),
                (selectors.y_value)(item, index),
            )
        })
        .collect();

    let dropped = data.len() - chart_data.len();
    if dropped > 0 {
        tracing::trace!("Dropped {} of {} records without valid x/y", dropped, data.len());
    }

    chart_data
}

/// Compute points, ticks and scales for `data` inside `container`
pub fn compute_temporal_chart<T: Clone, K>(
    data: &[T],
    selectors: &DataSelectors<T, K>,
    options: &TemporalChartOptions,
    container: ChartSize,
) -> TemporalChartData<T, K> {
    let today = options.today();
    let yearly = options.mode.is_yearly();

    let chart_data = collect_chart_data(data, selectors);
    let data_domain = DataDomain::from_data(&chart_data);

    let (resolution, num_x_ticks) = resolve_axis_layout(&options.mode, data_domain.as_ref());
    let chart_domain =
        compute_chart_domain(data_domain.as_ref(), resolution, num_x_ticks, yearly, today);
    let axis_domain = AxisDomain::from_chart_domain(&chart_domain, resolution);

    tracing::debug!(
        "Temporal chart: {} points, resolution {}, {} x ticks, domain {}..{}",
        chart_data.len(),
        resolution,
        num_x_ticks,
        chart_domain.min,
        chart_domain.max
    );

    let layout = ChartLayout::new(
        container,
        options.chart_margin,
        options.chart_offset,
        options.chart_padding,
    );
    let rect = layout.plot_rect();

    // Keep first and last ticks off the container edges
    let x_inset = rect.width / (num_x_ticks + 2) as f64;
    let x_scale = TemporalScale::new(
        resolution,
        &chart_domain,
        yearly,
        (rect.left + x_inset, rect.right() - x_inset),
    );

    let (y_min, y_max) = chart_data
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), d| (lo.min(d.y_value), hi.max(d.y_value)));
    let y_bounds = get_bounds(y_min, y_max, options.num_y_axis_ticks);
    let y_scale = LinearScale::new()
        .domain(y_bounds.min, y_bounds.max)
        .range(rect.bottom(), rect.top);

    let y_axis_ticks = get_intervals(&y_bounds, options.num_y_axis_ticks)
        .into_iter()
        .enumerate()
        .map(|(key, value)| YAxisTick {
            key,
            value,
            y: y_scale.scale(value),
            label: selectors.y_axis_label.format(value, key),
        })
        .collect();

    let x_axis_ticks = build_x_ticks(&chart_domain, axis_domain, resolution, num_x_ticks, yearly, &x_scale);

    let chart_points = chart_data
        .into_iter()
        .map(|datum| {
            let x = x_scale.scale_date(datum.date());
            let y = y_scale.scale(datum.y_value);
            ChartPoint { datum, x, y }
        })
        .collect();

    TemporalChartData {
        chart_points,
        x_axis_ticks,
        y_axis_ticks,
        chart_size: container,
        x_scale,
        y_scale,
        data_area_size: layout.data_area_size(),
        data_area_offset: layout.data_area_offset(),
        chart_margin: options.chart_margin,
        temporal_resolution: resolution,
        num_x_axis_ticks: num_x_ticks,
        chart_domain,
        axis_domain,
        y_bounds,
    }
}

fn build_x_ticks(
    chart_domain: &ChartDomain,
    axis_domain: AxisDomain,
    resolution: TemporalResolution,
    num_ticks: usize,
    yearly: bool,
    x_scale: &TemporalScale,
) -> Vec<XAxisTick> {
    let ticks = num_ticks.max(1) as i64;
    let span = (axis_domain.max - axis_domain.min).max(0);
    let step = ((span + ticks - 1) / ticks).max(1);
    let start = bucket_index(chart_domain.min, resolution);

    (0..ticks)
        .filter_map(|i| {
            let offset = i * step;
            let date = bucket_start(start + offset, resolution)?;
            let label = if yearly {
                format_month_label(date)
            } else {
                format_tick_label(date, resolution)
            };

            Some(XAxisTick {
                key: offset,
                date,
                x: x_scale.scale_offset(offset as f64),
                label,
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
