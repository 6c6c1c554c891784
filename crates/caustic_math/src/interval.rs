/// A closed or open range of `f64` values, depending on the query used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Interval spanning two values given in any order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The open unit interval (0, 1) the drop profile is parameterised on.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
