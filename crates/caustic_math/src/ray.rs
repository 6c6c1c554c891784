use crate::DVec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Rays are `Copy` and a
/// fresh one is built for every bounce instead of mutating the incoming ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Same origin, new direction.
    #[inline]
    pub fn with_direction(&self, direction: DVec3) -> Self {
        Self::new(self.origin, direction)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            direction: DVec3::Z,
        }
    }
}
