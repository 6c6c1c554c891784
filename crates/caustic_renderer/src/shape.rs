//! Shape trait shared by every primitive.

use caustic_math::{DVec3, Ray};

/// Hits at or below this distance are discarded, so a ray spawned on a
/// surface does not immediately hit that surface again.
pub const EPSILON: f64 = 1e-8;

/// Trait for primitives that can be hit by rays.
///
/// `normal` and `is_inside` take the continuation ray of a hit: its origin
/// lies on the surface and its direction is the incoming direction.
pub trait Shape: Send + Sync {
    /// Distance along `ray` to the nearest hit beyond [`EPSILON`].
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward-pointing surface normal at `p`, not necessarily unit length.
    fn outward_normal(&self, p: DVec3) -> DVec3;

    /// Whether the ray travels from the inside of the surface outwards.
    fn is_inside(&self, ray: &Ray) -> bool {
        ray.direction.dot(self.outward_normal(ray.origin)) > 0.0
    }

    /// Unit normal at the ray origin, facing against the ray direction.
    fn normal(&self, ray: &Ray) -> DVec3 {
        let outward = self.outward_normal(ray.origin);
        let facing = if ray.direction.dot(outward) > 0.0 {
            -outward
        } else {
            outward
        };
        facing.normalize_or_zero()
    }
}

/// Nearest root beyond [`EPSILON`] of `a t² + 2 h t + c`.
///
/// Prefers the near root and falls back to the far one, which covers rays
/// starting inside a closed surface. A non-positive discriminant is a miss.
pub(crate) fn nearest_root(a: f64, half_b: f64, c: f64) -> Option<f64> {
    let discriminant = half_b * half_b - a * c;
    if discriminant <= 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    let near = (-half_b - sqrtd) / a;
    if near > EPSILON {
        return Some(near);
    }
    let far = (-half_b + sqrtd) / a;
    (far > EPSILON).then_some(far)
}
