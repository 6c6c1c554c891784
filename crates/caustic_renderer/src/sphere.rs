//! Sphere primitive.

use crate::shape::{nearest_root, Shape};
use caustic_math::{DVec3, Ray};

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let rel = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = ray.direction.dot(rel);
        let c = rel.length_squared() - self.radius * self.radius;

        nearest_root(a, half_b, c)
    }

    fn outward_normal(&self, p: DVec3) -> DVec3 {
        p - self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: DVec3) -> Sphere {
        Sphere::new(center, 1.0)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let center = DVec3::new(3.0, -2.0, 7.0);
        let sphere = Sphere::new(center, 1.5);

        let origin = DVec3::new(-5.0, 4.0, 1.0);
        let distance = (center - origin).length();
        let ray = Ray::new(origin, (center - origin).normalize());

        let t = sphere.intersect(&ray).unwrap();
        assert!((t - (distance - 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_unnormalized_direction() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -2.0));

        // Hit point at z = -4 is reached at t = 2 with a doubled direction
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_miss_aimed_away() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_miss_sideways() {
        let sphere = unit_sphere_at(DVec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(DVec3::new(0.0, 2.0, 0.0), -DVec3::Z);

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_from_inside() {
        let sphere = unit_sphere_at(DVec3::ZERO);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 0.25), DVec3::Z);

        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_no_self_hit_on_surface() {
        let sphere = unit_sphere_at(DVec3::ZERO);
        // Leaving the surface outwards
        let ray = Ray::new(DVec3::Z, DVec3::Z);

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_normal_faces_ray() {
        let sphere = unit_sphere_at(DVec3::ZERO);

        // Arriving from outside at the top pole
        let outside = Ray::new(DVec3::Z, -DVec3::Z);
        assert!(!sphere.is_inside(&outside));
        assert_eq!(sphere.normal(&outside), DVec3::Z);

        // Arriving from inside at the same point
        let inside = Ray::new(DVec3::Z, DVec3::Z);
        assert!(sphere.is_inside(&inside));
        assert_eq!(sphere.normal(&inside), -DVec3::Z);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(DVec3::ZERO, -2.0);
        assert_eq!(sphere.radius(), 0.0);
    }
}
