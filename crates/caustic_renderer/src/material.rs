//! Material trait and the two surface models: opaque and transparent.

use std::sync::Arc;

use caustic_core::Texture;
use caustic_math::{DVec3, Ray};
use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;

use crate::rectangle::Rectangle;
use crate::scatter::{diffuse_reflect, refract, specular_reflect};
use crate::scene::{SceneError, SceneResult};
use crate::shape::Shape;

/// Color type alias (linear RGB radiance)
pub type Color = DVec3;

/// Result of a continuing scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Throughput multiplier for the rest of the path
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter the continuation ray of a hit on `shape`.
    ///
    /// Returns `None` when the path terminates here.
    fn scatter(&self, shape: &dyn Shape, ray: &Ray, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Radiance emitted at `p`.
    fn emitted(&self, _p: DVec3) -> Color {
        Color::ZERO
    }
}

/// Normalised probabilities over a fixed set of outcome channels.
///
/// Channel 0 always means "terminate the path".
#[derive(Debug, Clone)]
pub struct Outcomes<const N: usize> {
    probabilities: [f64; N],
    sampler: WeightedIndex<f64>,
}

impl<const N: usize> Outcomes<N> {
    pub const TERMINATE: usize = 0;

    /// Validate and normalise raw channel weights.
    pub fn new(weights: [f64; N]) -> SceneResult<Self> {
        if let Some(&bad) = weights.iter().find(|w| !w.is_finite()) {
            return Err(SceneError::NonFiniteProbability(bad));
        }
        let sampler = WeightedIndex::new(weights)?;

        let total: f64 = weights.iter().sum();
        let probabilities = weights.map(|w| w / total);
        if probabilities[Self::TERMINATE] == 0.0 {
            log::warn!(
                "Material with outcome weights {:?} never terminates paths",
                weights
            );
        }

        Ok(Self {
            probabilities,
            sampler,
        })
    }

    /// Draw one channel index.
    pub fn sample(&self, rng: &mut dyn RngCore) -> usize {
        self.sampler.sample(rng)
    }

    /// Normalised probability of channel `i`.
    pub fn probability(&self, i: usize) -> f64 {
        self.probabilities[i]
    }

    /// Probability that the path goes on after a hit.
    pub fn survival(&self) -> f64 {
        1.0 - self.probabilities[Self::TERMINATE]
    }
}

/// Emission model of an opaque surface.
#[derive(Debug, Clone)]
pub enum Emission {
    /// Uniform radiance everywhere on the surface
    Constant(Color),
    /// Radiance looked up from a texture laid over a rectangle
    Projector(Projector),
}

impl Default for Emission {
    fn default() -> Self {
        Emission::Constant(Color::ZERO)
    }
}

impl Emission {
    pub fn at(&self, p: DVec3) -> Color {
        match self {
            Emission::Constant(radiance) => *radiance,
            Emission::Projector(projector) => projector.radiance(p),
        }
    }
}

/// A texture mapped onto a rectangle, one texel per `pitch` world units.
///
/// Row 0 of the texture sits at the far end of the rectangle's `edge_v`.
#[derive(Debug, Clone)]
pub struct Projector {
    panel: Rectangle,
    texture: Arc<Texture>,
    pitch: f64,
}

impl Projector {
    pub fn new(panel: Rectangle, texture: Arc<Texture>, pitch: f64) -> Self {
        Self {
            panel,
            texture,
            pitch,
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Texel under `p`; zero outside the texture.
    pub fn radiance(&self, p: DVec3) -> Color {
        let (a, b) = self.panel.local_coords(p);
        // `as` truncates toward zero
        let x = (a / self.pitch) as i64;
        let y = (self.texture.height as f64 - b / self.pitch) as i64;
        self.texture.get(x, y).unwrap_or(Color::ZERO)
    }
}

/// Opaque surface: terminate, diffuse or specular.
#[derive(Debug, Clone)]
pub struct Opaque {
    outcomes: Outcomes<3>,
    albedo: Color,
    emission: Emission,
}

impl Opaque {
    const DIFFUSE: usize = 1;

    /// Create a non-emissive opaque material.
    ///
    /// `weights` are `[terminate, diffuse, specular]`.
    pub fn new(weights: [f64; 3], albedo: Color) -> SceneResult<Self> {
        Ok(Self {
            outcomes: Outcomes::new(weights)?,
            albedo,
            emission: Emission::default(),
        })
    }

    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn outcomes(&self) -> &Outcomes<3> {
        &self.outcomes
    }
}

impl Material for Opaque {
    fn scatter(&self, shape: &dyn Shape, ray: &Ray, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let outcome = self.outcomes.sample(rng);
        if outcome == Outcomes::<3>::TERMINATE {
            return None;
        }

        let normal = shape.normal(ray);
        let direction = if outcome == Self::DIFFUSE {
            diffuse_reflect(normal, rng)
        } else {
            specular_reflect(ray.direction, normal)
        };

        Some(ScatterResult {
            attenuation: self.albedo / self.outcomes.survival(),
            scattered: ray.with_direction(direction),
        })
    }

    fn emitted(&self, p: DVec3) -> Color {
        self.emission.at(p)
    }
}

/// Dielectric surface: terminate or refract.
#[derive(Debug, Clone)]
pub struct Transparent {
    outcomes: Outcomes<2>,
    color: Color,
    refractive_index: f64,
}

impl Transparent {
    /// Create a transparent material.
    ///
    /// `weights` are `[terminate, refract]`.
    pub fn new(weights: [f64; 2], color: Color, refractive_index: f64) -> SceneResult<Self> {
        Ok(Self {
            outcomes: Outcomes::new(weights)?,
            color,
            refractive_index,
        })
    }

    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
}

impl Material for Transparent {
    fn scatter(&self, shape: &dyn Shape, ray: &Ray, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        if self.outcomes.sample(rng) == Outcomes::<2>::TERMINATE {
            return None;
        }

        let eta = if shape.is_inside(ray) {
            self.refractive_index
        } else {
            1.0 / self.refractive_index
        };
        let refraction = refract(ray.direction, shape.normal(ray), eta, rng);

        Some(ScatterResult {
            attenuation: self.color / self.outcomes.survival() * refraction.weight,
            scattered: ray.with_direction(refraction.direction),
        })
    }
}
