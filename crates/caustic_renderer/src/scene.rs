//! Scene: an ordered list of objects and the radiance transport through it.

use caustic_core::CodecError;
use caustic_math::Ray;
use rand::distributions::WeightedError;
use rand::RngCore;
use thiserror::Error;

use crate::material::{Color, Material, ScatterResult};
use crate::shape::Shape;

/// Errors raised while assembling a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid outcome probabilities: {0}")]
    InvalidProbabilities(#[from] WeightedError),

    #[error("Outcome probability is not finite: {0}")]
    NonFiniteProbability(f64),

    #[error("Failed to load projector texture {path}: {source}")]
    Texture {
        path: String,
        #[source]
        source: CodecError,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A shape paired with the material covering it.
pub struct Object {
    shape: Box<dyn Shape>,
    material: Box<dyn Material>,
}

impl Object {
    pub fn new(shape: impl Shape + 'static, material: impl Material + 'static) -> Self {
        Self {
            shape: Box::new(shape),
            material: Box::new(material),
        }
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn material(&self) -> &dyn Material {
        self.material.as_ref()
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.shape.intersect(ray)
    }

    /// Emission at the continuation ray's origin and the optional bounce.
    pub fn interact(&self, ray: &Ray, rng: &mut dyn RngCore) -> (Color, Option<ScatterResult>) {
        let emitted = self.material.emitted(ray.origin);
        (emitted, self.material.scatter(self.shape.as_ref(), ray, rng))
    }
}

/// The set of objects light travels between.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Object>,
    max_depth: Option<u32>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of bounces a path follows.
    ///
    /// With a cap of `n` at most `n + 1` surfaces contribute emission; a cap
    /// of 0 keeps only the first hit. Without a cap paths end only through
    /// material termination.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Closest object along `ray` and its distance.
    ///
    /// On equal distances the earlier object wins.
    pub fn nearest(&self, ray: &Ray) -> Option<(&Object, f64)> {
        let mut closest: Option<(&Object, f64)> = None;
        for object in &self.objects {
            if let Some(t) = object.intersect(ray) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((object, t));
                }
            }
        }
        closest
    }

    /// Radiance arriving along `ray`.
    pub fn transmit(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut ray = *ray;
        let mut depth = 0u32;

        while let Some((object, t)) = self.nearest(&ray) {
            let continuation = Ray::new(ray.at(t), ray.direction);
            let (emitted, scatter) = object.interact(&continuation, rng);
            radiance += throughput * emitted;

            let Some(result) = scatter else {
                break;
            };
            if self.max_depth.is_some_and(|max| depth >= max) {
                break;
            }
            depth += 1;
            throughput *= result.attenuation;
            ray = result.scattered;
        }

        radiance
    }
}
