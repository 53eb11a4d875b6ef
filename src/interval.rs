//! Interval arithmetic for ray parameter ranges.
//!
//! Provides the `(min, max)` range a ray accepts hits in. Intersection code
//! narrows `max` as closer hits are found.

/// Open parametric interval `(min, max)` for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when the interval still describes a usable range (`min < max`).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounds_excludes_bounds() {
        let t = Interval::new(0.01, 10.0);
        assert!(t.surrounds(5.0));
        assert!(!t.surrounds(0.01));
        assert!(!t.surrounds(10.0));
        assert!(!t.surrounds(-1.0));
    }

    #[test]
    fn infinite_upper_bound_is_valid() {
        assert!(Interval::new(0.01, f32::INFINITY).is_valid());
        assert!(!Interval::new(1.0, 1.0).is_valid());
    }
}
