//! Caustic math - double precision vector types and numeric helpers.
//!
//! Everything in the renderer runs in `f64`, so only the double precision
//! glam types are re-exported here.

// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

mod basis;
mod interval;
mod poly;
mod ray;

pub use basis::{orthonormal_basis, perpendicular, project};
pub use interval::Interval;
pub use poly::Polynomial;
pub use ray::Ray;
