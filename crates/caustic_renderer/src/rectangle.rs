//! Bounded planar rectangle primitive.

use crate::shape::{Shape, EPSILON};
use caustic_math::{DVec3, Interval, Ray};

/// A rectangle spanned from `origin` along two in-plane unit edges.
///
/// The covered region is `origin + a * edge_u + b * edge_v` for
/// `a in [0, extent_u]`, `b in [0, extent_v]`.
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
    origin: DVec3,
    normal: DVec3,
    edge_u: DVec3,
    edge_v: DVec3,
    extent_u: f64,
    extent_v: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    ///
    /// - `normal`: plane normal; the side it points to counts as outside
    /// - `edge_u`, `edge_v`: unit vectors spanning the plane
    /// - `extent_u`, `extent_v`: side lengths along each edge
    pub fn new(
        origin: DVec3,
        normal: DVec3,
        edge_u: DVec3,
        edge_v: DVec3,
        extent_u: f64,
        extent_v: f64,
    ) -> Self {
        Self {
            origin,
            normal,
            edge_u,
            edge_v,
            extent_u,
            extent_v,
        }
    }

    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    pub fn edge_u(&self) -> DVec3 {
        self.edge_u
    }

    pub fn edge_v(&self) -> DVec3 {
        self.edge_v
    }

    /// In-plane coordinates of `p` along `(edge_u, edge_v)`.
    pub fn local_coords(&self, p: DVec3) -> (f64, f64) {
        let rel = p - self.origin;
        (rel.dot(self.edge_u), rel.dot(self.edge_v))
    }
}

impl Shape for Rectangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let rel = ray.origin - self.origin;
        let denom = ray.direction.dot(self.normal);
        if denom.abs() <= EPSILON {
            return None;
        }
        let t = -rel.dot(self.normal) / denom;
        if t <= EPSILON {
            return None;
        }

        let (a, b) = self.local_coords(ray.at(t));
        let inside = Interval::new(0.0, self.extent_u).contains(a)
            && Interval::new(0.0, self.extent_v).contains(b);
        inside.then_some(t)
    }

    fn outward_normal(&self, _p: DVec3) -> DVec3 {
        self.normal
    }
}
