//! Numeric bounds utilities: "nice" tick steps and even padding

/// Step multipliers considered round, per power of ten
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Upper bound on step widening in [`get_bounds`]
const MAX_STEP_ATTEMPTS: usize = 32;

/// Closed numeric range produced by [`get_bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Round `rough` up to the next `{1, 2, 2.5, 5, 10} x 10^k` step
pub fn nice_step(rough: f64) -> f64 {
    if !rough.is_finite() || rough <= 0.0 {
        return 1.0;
    }

    let magnitude = 10.0_f64.powf(rough.log10().floor());
    let residual = rough / magnitude;

    let multiplier = NICE_STEPS
        .iter()
        .copied()
        .find(|&step| residual <= step + 1e-9)
        .unwrap_or(10.0);

    multiplier * magnitude
}

fn next_nice_step(step: f64) -> f64 {
    nice_step(step * (1.0 + 1e-6))
}

/// Round bounds covering `[min, max]` with `num_ticks` evenly spaced round ticks.
///
/// A zero-width range is widened towards zero; an all-zero or non-finite
/// range becomes `[0, 1]`. Ranges too wide for a finite round step are
/// returned as given.
pub fn get_bounds(min: f64, max: f64, num_ticks: usize) -> Bounds {
    let (mut lower, mut upper) = if min.is_finite() && max.is_finite() {
        (min.min(max), min.max(max))
    } else {
        (0.0, 1.0)
    };

    if upper == lower {
        if lower > 0.0 {
            lower = 0.0;
        } else if lower < 0.0 {
            upper = 0.0;
        } else {
            upper = 1.0;
        }
    }

    let intervals = (num_ticks.max(2) - 1) as f64;
    // Divided before subtracting so extreme ranges do not overflow
    let mut step = nice_step(upper / intervals - lower / intervals);

    for _ in 0..MAX_STEP_ATTEMPTS {
        let start = (lower / step).floor() * step;
        let end = start + step * intervals;

        if !end.is_finite() {
            break;
        }

        if end + step * 1e-9 >= upper {
            return Bounds {
                min: start,
                max: end,
            };
        }

        step = next_nice_step(step);
    }

    Bounds {
        min: lower,
        max: upper,
    }
}

/// `num_ticks` evenly spaced values from `bounds.min` to `bounds.max`.
///
/// Values are rounded to the precision of the step, so a 0.1 step
/// yields `0.3` rather than `0.30000000000000004`.
pub fn get_intervals(bounds: &Bounds, num_ticks: usize) -> Vec<f64> {
    if num_ticks <= 1 {
        return vec![bounds.min];
    }

    let last = num_ticks - 1;
    let intervals = last as f64;
    let step = bounds.max / intervals - bounds.min / intervals;

    (0..num_ticks)
        .map(|i| match i {
            0 => bounds.min,
            i if i == last => bounds.max,
            i => {
                let t = i as f64 / intervals;
                round_to_step(bounds.min * (1.0 - t) + bounds.max * t, step)
            }
        })
        .collect()
}

/// Round `value` to one decimal digit finer than `step`
fn round_to_step(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return value;
    }

    let digits = 1 - step.log10().floor() as i32;
    let rounded = if digits >= 0 {
        let factor = 10.0_f64.powi(digits);
        (value * factor).round() / factor
    } else {
        let factor = 10.0_f64.powi(-digits);
        (value / factor).round() * factor
    };

    if rounded.is_finite() { rounded } else { value }
}

/// Extra buckets to add on each side of an integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvenDistribution {
    pub left: i64,
    pub right: i64,
}

/// Padding that makes `[min - left, max + right]` split evenly into `segments`.
///
/// At least one bucket is added on each side, so a zero-width range still
/// gets a visible span.
pub fn get_even_distribution(min: i64, max: i64, segments: usize) -> EvenDistribution {
    let segments = segments.max(1) as i64;
    let span = (max - min).max(0);

    let padded = (span + 2 + segments - 1) / segments * segments;
    let extra = padded - span;
    let left = extra / 2;

    EvenDistribution {
        left,
        right: extra - left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step_values() {
        assert_eq!(nice_step(8.4), 10.0);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(2.2), 2.5);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(140.0), 200.0);
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(f64::NAN), 1.0);
    }

    #[test]
    fn test_bounds_cover_range() {
        let bounds = get_bounds(0.0, 42.0, 6);
        assert_eq!(bounds, Bounds { min: 0.0, max: 50.0 });

        let bounds = get_bounds(-35.0, 120.0, 5);
        assert!(bounds.min <= -35.0);
        assert!(bounds.max >= 120.0);
    }

    #[test]
    fn test_bounds_widen_step_when_offset_start() {
        // Step 10 starts at 10 and ends at 50 < 52, so it widens to 20
        let bounds = get_bounds(18.0, 52.0, 5);
        assert_eq!(bounds, Bounds { min: 0.0, max: 80.0 });
    }

    #[test]
    fn test_bounds_degenerate() {
        for bounds in [get_bounds(0.0, 0.0, 6), get_bounds(f64::NAN, 3.0, 6)] {
            assert_eq!(bounds.min, 0.0);
            assert!((bounds.max - 1.0).abs() < 1e-9);
        }

        let positive = get_bounds(42.0, 42.0, 6);
        assert_eq!(positive.min, 0.0);
        assert!(positive.max >= 42.0);

        let negative = get_bounds(-8.0, -8.0, 3);
        assert!(negative.min <= -8.0);
        assert_eq!(negative.max, 0.0);
    }

    #[test]
    fn test_intervals() {
        let bounds = Bounds { min: 0.0, max: 50.0 };
        assert_eq!(
            get_intervals(&bounds, 6),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]
        );
        assert_eq!(get_intervals(&bounds, 1), vec![0.0]);
    }

    #[test]
    fn test_intervals_have_step_precision() {
        let bounds = Bounds { min: 0.0, max: 0.5 };
        assert_eq!(get_intervals(&bounds, 6), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);

        let bounds = Bounds { min: -0.75, max: 0.5 };
        assert_eq!(get_intervals(&bounds, 6), vec![-0.75, -0.5, -0.25, 0.0, 0.25, 0.5]);

        let bounds = Bounds { min: 0.0, max: 7.5 };
        assert_eq!(get_intervals(&bounds, 4), vec![0.0, 2.5, 5.0, 7.5]);
    }

    #[test]
    fn test_bounds_near_float_limits_stay_finite() {
        let bounds = get_bounds(-1e308, 1e308, 6);
        assert!(bounds.min.is_finite() && bounds.max.is_finite());
        assert!(bounds.min <= -1e308);
        assert!(bounds.max >= 1e308);

        let ticks = get_intervals(&bounds, 6);
        assert_eq!(ticks.len(), 6);
        assert!(ticks.iter().all(|tick| tick.is_finite()));
        assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));

        let bounds = get_bounds(0.0, f64::MAX, 6);
        assert!(bounds.max.is_finite() && bounds.max >= f64::MAX);
        assert_eq!(bounds.min, 0.0);
    }

    #[test]
    fn test_even_distribution_divides_span() {
        for (min, max, segments) in [(0, 10, 10), (5, 9, 3), (2020, 2024, 12), (7, 7, 3)] {
            let EvenDistribution { left, right } = get_even_distribution(min, max, segments);
            assert!(left >= 1, "left padding for {min}..{max}");
            assert!(right >= 1, "right padding for {min}..{max}");
            assert_eq!((max - min + left + right) % segments as i64, 0);
        }
    }

    #[test]
    fn test_even_distribution_zero_width() {
        let padding = get_even_distribution(100, 100, 12);
        assert_eq!(padding, EvenDistribution { left: 6, right: 6 });
    }

    #[test]
    fn test_even_distribution_minimal() {
        // span 10 needs 12 for two padding buckets, next multiple of 10 is 20
        assert_eq!(
            get_even_distribution(0, 10, 10),
            EvenDistribution { left: 5, right: 5 }
        );
        // span 4 + 2 = 6, already a multiple of 3
        assert_eq!(
            get_even_distribution(5, 9, 3),
            EvenDistribution { left: 1, right: 1 }
        );
    }
}
