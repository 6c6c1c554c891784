//! caustic renderer - CPU Monte Carlo light transport
//!
//! Unbiased path tracing with Russian-roulette termination over spheres,
//! rectangles and teardrops. Passes accumulate into a [`Screen`] that can be
//! saved and resumed across sessions.

mod camera;
mod material;
mod rectangle;
mod scatter;
mod scene;
mod screen;
mod shape;
mod sphere;
mod teardrop;

pub mod presets;
pub mod session;

pub use camera::Camera;
pub use material::{Color, Emission, Material, Opaque, Outcomes, Projector, ScatterResult, Transparent};
pub use rectangle::Rectangle;
pub use scatter::{diffuse_reflect, refract, specular_reflect, Refraction};
pub use scene::{Object, Scene, SceneError, SceneResult};
pub use screen::Screen;
pub use shape::{Shape, EPSILON};
pub use sphere::Sphere;
pub use teardrop::Teardrop;

pub use presets::Preset;
pub use session::{render, should_stop, RenderConfig, RenderError};

/// Re-export common math types from caustic_math
pub use caustic_math::{DVec3, Ray};
