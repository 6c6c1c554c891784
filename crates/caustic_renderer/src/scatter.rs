//! Surface interaction: the direction a ray leaves a surface in.
//!
//! All functions take the incident direction `d` and a normal `n` that
//! already faces against `d` (see [`crate::Shape::normal`]).

use std::f64::consts::TAU;

use caustic_math::{orthonormal_basis, project, DVec3};
use rand::{Rng, RngCore};

/// Sample a direction on the hemisphere around the unit normal `n`.
///
/// `cos θ` is drawn uniformly from [0, 1) and `φ` uniformly from [0, 2π).
/// This is the sampling law the transport estimator is built on: the
/// material's albedo is applied as-is, with no extra cosine or pdf factor.
pub fn diffuse_reflect(n: DVec3, rng: &mut dyn RngCore) -> DVec3 {
    let (x, y) = orthonormal_basis(n);
    let cos_theta: f64 = rng.gen();
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = rng.gen::<f64>() * TAU;

    x * (phi.cos() * sin_theta) + y * (phi.sin() * sin_theta) + n * cos_theta
}

/// Mirror `d` about the plane with normal `n`.
#[inline]
pub fn specular_reflect(d: DVec3, n: DVec3) -> DVec3 {
    d - 2.0 * project(d, n)
}

/// Result of a dielectric interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    /// Outgoing direction (reflected or transmitted)
    pub direction: DVec3,
    /// Fresnel energy factor `K_reflect + K_transmit`, 1 on total internal reflection
    pub weight: f64,
}

/// Refract or reflect `d` at a dielectric boundary.
///
/// `eta` is the index on the incident side over the index on the
/// transmitted side. Reflection vs. transmission is chosen with
/// probabilities proportional to Schlick's reflectance and transmittance.
pub fn refract(d: DVec3, n: DVec3, eta: f64, rng: &mut dyn RngCore) -> Refraction {
    let cos2_i = d.dot(n).powi(2) / (d.length_squared() * n.length_squared());
    let cos2_t = 1.0 - (1.0 - cos2_i) * eta * eta;

    // Total internal reflection
    if cos2_t <= 0.0 {
        return Refraction {
            direction: specular_reflect(d, n),
            weight: 1.0,
        };
    }

    let r0 = ((eta - 1.0) / (eta + 1.0)).powi(2);
    let k_reflect = r0 + (1.0 - r0) * (1.0 - cos2_i.sqrt()).powi(5);
    let k_transmit = 1.0 - (r0 + (1.0 - r0) * (1.0 - cos2_t.sqrt()).powi(5));
    let weight = k_reflect + k_transmit;

    let direction = if rng.gen::<f64>() * weight < k_reflect {
        specular_reflect(d, n)
    } else {
        transmit(d, n, cos2_i, cos2_t)
    };
    Refraction { direction, weight }
}

/// Bend `d` across the boundary by rescaling its tangential component.
fn transmit(d: DVec3, n: DVec3, cos2_i: f64, cos2_t: f64) -> DVec3 {
    let tan2_i = 1.0 / cos2_i - 1.0;
    // Normal incidence passes straight through
    if tan2_i <= 0.0 {
        return d.normalize();
    }
    let tan2_t = 1.0 / cos2_t - 1.0;
    let tangent = d - project(d, n);

    (d + tangent * ((tan2_t / tan2_i).sqrt() - 1.0)).normalize_or_zero()
}
