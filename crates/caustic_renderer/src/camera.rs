//! Pinhole camera mapping integer pixel offsets to primary rays.

use caustic_math::{DVec3, Ray};
use rand::{Rng, RngCore};

use crate::material::Color;
use crate::scene::Scene;

/// A pinhole camera.
///
/// Pixel `(px, py)` covers the square `[px, px + 1) × [py, py + 1)` scaled by
/// `pitch` on the image plane one `forward` away from the eye. `py` grows
/// along `up`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    pitch: f64,
}

impl Camera {
    pub fn new(eye: DVec3, forward: DVec3, right: DVec3, up: DVec3, pitch: f64) -> Self {
        Self {
            eye,
            forward,
            right,
            up,
            pitch,
        }
    }

    /// Set the pixel pitch (builder pattern).
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Jittered ray through pixel `(px, py)`, relative to the image center.
    pub fn primary_ray(&self, px: i64, py: i64, rng: &mut dyn RngCore) -> Ray {
        let x = px as f64 * self.pitch + rng.gen::<f64>() * self.pitch;
        let y = py as f64 * self.pitch + rng.gen::<f64>() * self.pitch;
        let direction = (self.forward + self.right * x + self.up * y).normalize();
        Ray::new(self.eye, direction)
    }

    /// One radiance sample for pixel `(px, py)`.
    pub fn transmit(&self, scene: &Scene, px: i64, py: i64, rng: &mut dyn RngCore) -> Color {
        scene.transmit(&self.primary_ray(px, py, rng), rng)
    }
}
