//! Teardrop primitive: a cubic profile revolved about the vertical axis.
//!
//! For `u` in (0, 1) the surface is the circle of radius
//! `r(u) = 3 s u (1 - u)(2 + u)` at height `y(u) = 6 s u²` above the apex,
//! centered on the +Y axis through the apex. The profile closes at both
//! ends (`r(0) = r(1) = 0`). A negative scale hangs the drop below the apex.

use crate::shape::{nearest_root, Shape, EPSILON};
use caustic_math::{DVec3, Interval, Polynomial, Ray};

/// A teardrop surface of revolution.
#[derive(Debug, Clone, Copy)]
pub struct Teardrop {
    apex: DVec3,
    scale: f64,
}

impl Teardrop {
    /// Create a new teardrop.
    ///
    /// - `apex`: the pointed end, where `u = 0`
    /// - `scale`: overall size; the drop is `6 * |scale|` tall
    pub fn new(apex: DVec3, scale: f64) -> Self {
        Self { apex, scale }
    }

    pub fn apex(&self) -> DVec3 {
        self.apex
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Height of the closed end above the apex (negative for hanging drops).
    fn top(&self) -> f64 {
        6.0 * self.scale
    }

    /// Profile radius at parameter `u`.
    fn radius_at(&self, u: f64) -> f64 {
        3.0 * self.scale * u * (1.0 - u) * (2.0 + u)
    }

    /// Largest cross-section radius, reached at `u = (√7 - 1) / 3`.
    fn max_radius(&self) -> f64 {
        (14.0 * 7f64.sqrt() - 20.0) / 9.0 * self.scale
    }

    /// Profile parameter of a point at relative height `y`.
    fn param_at_height(&self, y: f64) -> f64 {
        Interval::UNIT.clamp(y / self.top()).sqrt()
    }

    /// Rays with no vertical motion cut a single horizontal circle.
    fn intersect_level(&self, ray: &Ray) -> Option<f64> {
        let rel = ray.origin - self.apex;
        if !Interval::spanning(0.0, self.top()).contains(rel.y) {
            return None;
        }

        let r = self.radius_at(self.param_at_height(rel.y));
        let d = ray.direction;
        let a = d.x * d.x + d.z * d.z;
        let half_b = d.x * rel.x + d.z * rel.z;
        let c = rel.x * rel.x + rel.z * rel.z - r * r;
        nearest_root(a, half_b, c)
    }
}

impl Shape for Teardrop {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        if self.scale == 0.0 {
            return None;
        }
        let d = ray.direction;
        if d.y.abs() <= EPSILON {
            return self.intersect_level(ray);
        }

        // Starting beyond the height span and moving away from it
        let rel = ray.origin - self.apex;
        let span = Interval::spanning(0.0, self.top());
        if (d.y > 0.0 && rel.y >= span.max) || (d.y < 0.0 && rel.y <= span.min) {
            return None;
        }

        // Parameterise the ray by u: x = a u² + b, z = c u² + e
        let top = self.top();
        let a = top * d.x / d.y;
        let b = rel.x - rel.y * d.x / d.y;
        let c = top * d.z / d.y;
        let e = rel.z - rel.y * d.z / d.y;

        // Squared distance of the projected line from the axis. NaN for rays
        // parallel to the axis, which then go straight to the solver.
        let axis_distance2 = (a * e - b * c).powi(2) / (a * a + c * c);
        if axis_distance2 >= self.max_radius().powi(2) {
            return None;
        }

        // r(u)² - x(u)² - z(u)² = 0
        let s2 = self.scale * self.scale;
        let poly = Polynomial::new(vec![
            -b * b - e * e,
            0.0,
            36.0 * s2 - 2.0 * a * b - 2.0 * c * e,
            -36.0 * s2,
            -27.0 * s2 - a * a - c * c,
            18.0 * s2,
            9.0 * s2,
        ]);

        poly.roots_in(Interval::UNIT)
            .into_iter()
            .map(|u| (top * u * u - rel.y) / d.y)
            .filter(|&t| t > EPSILON)
            .min_by(|x, y| x.total_cmp(y))
    }

    fn outward_normal(&self, p: DVec3) -> DVec3 {
        let rel = p - self.apex;
        let u = self.param_at_height(rel.y);

        let mut radial = DVec3::new(rel.x, 0.0, rel.z).normalize_or_zero();
        if self.scale < 0.0 {
            radial = -radial;
        }
        // (dy/du, -dr/du) in the (radial, axial) plane
        radial * (12.0 * u * self.scale) + DVec3::Y * ((9.0 * u * u + 6.0 * u - 6.0) * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn unit_drop() -> Teardrop {
        Teardrop::new(DVec3::ZERO, 1.0)
    }

    /// Distance of a hit point from the profile, measured radially.
    fn profile_error(drop: &Teardrop, p: DVec3) -> f64 {
        let rel = p - drop.apex();
        let u = drop.param_at_height(rel.y);
        (DVec3::new(rel.x, 0.0, rel.z).length() - drop.radius_at(u).abs()).abs()
    }

    #[test]
    fn test_level_ray_hits_cross_section() {
        // u = 0.5: height 1.5, radius 1.875
        let ray = Ray::new(DVec3::new(-10.0, 1.5, 0.0), DVec3::X);
        let t = unit_drop().intersect(&ray).unwrap();
        assert!((t - 8.125).abs() < TOLERANCE);
    }

    #[test]
    fn test_level_ray_outside_height_span() {
        let above = Ray::new(DVec3::new(-10.0, 6.5, 0.0), DVec3::X);
        let below = Ray::new(DVec3::new(-10.0, -0.5, 0.0), DVec3::X);
        assert!(unit_drop().intersect(&above).is_none());
        assert!(unit_drop().intersect(&below).is_none());
    }

    #[test]
    fn test_oblique_ray_hits_known_point() {
        // Aimed at (-1.875, 1.5, 0), the widest-but-one ring at u = 0.5
        let ray = Ray::new(DVec3::new(-11.875, -0.5, 0.0), DVec3::new(10.0, 2.0, 0.0));
        let t = unit_drop().intersect(&ray).unwrap();
        assert!((t - 1.0).abs() < TOLERANCE, "t = {t}");
    }

    #[test]
    fn test_vertical_ray_hits_upper_branch() {
        let drop = unit_drop();
        let ray = Ray::new(DVec3::new(1.0, 10.0, 0.0), -DVec3::Y);

        let t = drop.intersect(&ray).unwrap();
        let p = ray.at(t);
        assert!(profile_error(&drop, p) < TOLERANCE);

        // Coming from above, the first hit is above the widest ring
        let widest = (7f64.sqrt() - 1.0) / 3.0;
        assert!(drop.param_at_height(p.y) > widest);
    }

    #[test]
    fn test_hanging_drop_mirrors_standing_drop() {
        let standing = unit_drop();
        let hanging = Teardrop::new(DVec3::ZERO, -1.0);

        let down = Ray::new(DVec3::new(1.0, 10.0, 0.0), -DVec3::Y);
        let up = Ray::new(DVec3::new(1.0, -10.0, 0.0), DVec3::Y);

        let t_down = standing.intersect(&down).unwrap();
        let t_up = hanging.intersect(&up).unwrap();
        assert!((t_down - t_up).abs() < TOLERANCE);
    }

    #[test]
    fn test_far_ray_rejected() {
        let ray = Ray::new(DVec3::new(-10.0, 0.0, 5.0), DVec3::new(1.0, 0.1, 0.0));
        assert!(unit_drop().intersect(&ray).is_none());
    }

    #[test]
    fn test_moving_away_rejected() {
        let above_going_up = Ray::new(DVec3::new(0.5, 7.0, 0.0), DVec3::new(0.0, 1.0, 0.1));
        let below_going_down = Ray::new(DVec3::new(0.5, -1.0, 0.0), DVec3::new(0.0, -1.0, 0.1));
        assert!(unit_drop().intersect(&above_going_up).is_none());
        assert!(unit_drop().intersect(&below_going_down).is_none());
    }

    #[test]
    fn test_zero_scale_is_never_hit() {
        let drop = Teardrop::new(DVec3::new(1.0, 2.0, 3.0), 0.0);
        let rays = [
            Ray::new(DVec3::new(1.0, 5.0, 3.1), -DVec3::Y),
            Ray::new(DVec3::new(-4.0, 2.0, 3.0), DVec3::X),
            Ray::new(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.5)),
            Ray::new(DVec3::new(1.0, -1.0, 3.0), DVec3::new(0.01, 1.0, 0.0)),
        ];
        for ray in rays {
            assert!(drop.intersect(&ray).is_none(), "ray {ray:?}");
        }
    }

    #[test]
    fn test_normal_at_known_point() {
        let drop = unit_drop();
        let ray = Ray::new(DVec3::new(-1.875, 1.5, 0.0), DVec3::X);

        // Gradient (-6, -0.75, 0) at u = 0.5, facing the incoming ray
        assert!(!drop.is_inside(&ray));
        let expected = DVec3::new(-6.0, -0.75, 0.0).normalize();
        assert!((drop.normal(&ray) - expected).length() < TOLERANCE);

        // Leaving from inside flips it
        let leaving = ray.with_direction(-DVec3::X);
        assert!(drop.is_inside(&leaving));
        assert!((drop.normal(&leaving) + expected).length() < TOLERANCE);
    }

    #[test]
    fn test_hanging_normal_points_outward() {
        let drop = Teardrop::new(DVec3::ZERO, -1.0);
        let ray = Ray::new(DVec3::new(-1.875, -1.5, 0.0), DVec3::X);

        let expected = DVec3::new(-6.0, 0.75, 0.0).normalize();
        assert!(!drop.is_inside(&ray));
        assert!((drop.normal(&ray) - expected).length() < TOLERANCE);
    }
}
