//! # chartkit
//!
//! Core chart primitives: scale strategies mapping data values to pixels.

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
///
/// The range may be reversed (`range(height, 0.0)`) to flip the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Blend of `a` and `b` at `t`; stays finite for any finite endpoints
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        // Halved so domains spanning most of f64 do not overflow
        let half_span = d_max * 0.5 - d_min * 0.5;
        if half_span.abs() < f64::EPSILON / 2.0 {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value * 0.5 - d_min * 0.5) / half_span;
        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return d_min * 0.5 + d_max * 0.5;
        }

        lerp(d_min, d_max, (value - r_min) / (r_max - r_min))
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let intervals = (count - 1) as f64;
        (0..count)
            .map(|i| lerp(min, max, i as f64 / intervals))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(200.0, 0.0);

        assert_eq!(scale.scale(0.0), 200.0);
        assert_eq!(scale.scale(10.0), 0.0);
        assert!(scale.scale(2.0) > scale.scale(8.0));
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_zero_width_domain_maps_to_midpoint() {
        let scale = LinearScale::new().domain(5.0, 5.0).range(10.0, 30.0);
        assert_eq!(scale.scale(5.0), 20.0);
        assert_eq!(scale.scale(1_000.0), 20.0);
    }

    #[test]
    fn test_even_ticks() {
        let scale = LinearScale::new().domain(0.0, 10.0);
        assert_eq!(scale.ticks(3), vec![0.0, 5.0, 10.0]);
        assert_eq!(scale.ticks(1), vec![0.0]);
    }

    #[test]
    fn test_extreme_domain_stays_finite() {
        let scale = LinearScale::new().domain(-1e308, 1e308).range(400.0, 0.0);

        assert_eq!(scale.scale(-1e308), 400.0);
        assert_eq!(scale.scale(1e308), 0.0);
        assert_eq!(scale.scale(0.0), 200.0);
        assert_eq!(scale.invert(200.0), 0.0);
        assert!(scale.ticks(5).iter().all(|tick| tick.is_finite()));
    }
}
