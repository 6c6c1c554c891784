//! Built-in scenes with their cameras.
//!
//! Both scenes sit in a 300 x 300 box on the z = 0 floor, lit by a ceiling
//! panel and an LED wall at x = 300 that projects a texture loaded from the
//! asset directory.

use std::path::Path;
use std::sync::Arc;

use caustic_core::Texture;
use caustic_math::DVec3;

use crate::camera::Camera;
use crate::material::{Color, Emission, Opaque, Projector, Transparent};
use crate::rectangle::Rectangle;
use crate::scene::{Object, Scene, SceneError, SceneResult};
use crate::sphere::Sphere;
use crate::teardrop::Teardrop;

/// A named built-in scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Three glass spheres and two mirrored drops under a cool light
    ThreeBody,
    /// Colored box with diffuse, mixed and mirror spheres
    Saturn,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::ThreeBody, Preset::Saturn];

    pub fn name(self) -> &'static str {
        match self {
            Preset::ThreeBody => "threebody",
            Preset::Saturn => "saturn",
        }
    }

    /// Projector texture file expected in the asset directory.
    pub fn texture_file(self) -> &'static str {
        match self {
            Preset::ThreeBody => "threebody.dat",
            Preset::Saturn => "saturn.dat",
        }
    }

    /// Build the scene, loading textures from `assets`.
    pub fn build(self, assets: &Path) -> SceneResult<(Scene, Camera)> {
        match self {
            Preset::ThreeBody => threebody(assets),
            Preset::Saturn => saturn(assets),
        }
    }
}

/// Horizontal panel facing up, spanned along -Y then +X.
fn horizontal(origin: DVec3, extent: f64) -> Rectangle {
    Rectangle::new(origin, DVec3::Z, -DVec3::Y, DVec3::X, extent, extent)
}

/// Load a projector texture, wrapping failures with the file name.
fn load_texture(assets: &Path, file: &str) -> SceneResult<Arc<Texture>> {
    let path = assets.join(file);
    let texture = Texture::load(&path).map_err(|source| SceneError::Texture {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!(
        "Loaded projector texture {} ({}x{})",
        texture.path,
        texture.width,
        texture.height
    );
    Ok(Arc::new(texture))
}

/// LED wall at x = 300 facing the scene, showing `texture` at `pitch`.
fn led_wall(texture: Arc<Texture>, pitch: f64) -> SceneResult<Object> {
    let panel = Rectangle::new(
        DVec3::new(300.0, 150.0, 0.0),
        -DVec3::X,
        -DVec3::Y,
        DVec3::Z,
        300.0,
        225.0,
    );
    let material = Opaque::new([0.1, 0.0, 0.0], Color::ONE)?
        .with_emission(Emission::Projector(Projector::new(panel, texture, pitch)));
    Ok(Object::new(panel, material))
}

/// Three glass spheres, a dark ceiling with a cool light and two drops.
pub fn threebody(assets: &Path) -> SceneResult<(Scene, Camera)> {
    let texture = load_texture(assets, Preset::ThreeBody.texture_file())?;
    let mut scene = Scene::new();

    scene.add(Object::new(
        horizontal(DVec3::new(0.0, 150.0, 0.0), 300.0),
        Opaque::new([0.1, 0.75, 0.15], Color::ONE)?,
    ));
    scene.add(led_wall(texture, 0.15)?);
    scene.add(Object::new(
        horizontal(DVec3::new(75.0, 75.0, 600.0), 150.0),
        Opaque::new([0.1, 0.0, 0.0], Color::ZERO)?
            .with_emission(Emission::Constant(Color::new(24.0, 24.0, 18.0))),
    ));
    scene.add(Object::new(
        horizontal(DVec3::new(0.0, 150.0, 602.0), 300.0),
        Opaque::new([0.1, 0.9, 0.0], Color::splat(1.0 / 16.0))?,
    ));

    for center in [
        DVec3::new(215.1, 84.9, 20.5),
        DVec3::new(180.0, 0.0, 20.5),
        DVec3::new(215.1, -84.9, 20.5),
    ] {
        scene.add(Object::new(
            Sphere::new(center, 20.0),
            Transparent::new([0.1, 0.9], Color::ONE, 1.6)?,
        ));
    }

    for (apex, scale) in [
        (DVec3::new(225.0, 104.0, 100.0), -6.0),
        (DVec3::new(225.0, -104.0, 200.0), 6.0),
    ] {
        scene.add(Object::new(
            Teardrop::new(apex, scale),
            Opaque::new([0.1, 0.0, 0.9], Color::ONE)?,
        ));
    }

    let camera = Camera::new(
        DVec3::new(-325.0, 0.0, 625.0),
        DVec3::new(500.0, 0.0, -500.0),
        -DVec3::Y,
        DVec3::new(0.707, 0.0, 0.707),
        3.0 / 16.0,
    );
    Ok((scene, camera))
}

/// Colored box with a ceiling light and three spheres of varying gloss.
pub fn saturn(assets: &Path) -> SceneResult<(Scene, Camera)> {
    let texture = load_texture(assets, Preset::Saturn.texture_file())?;
    let mut scene = Scene::new();

    let grey = Color::splat(0.75);
    scene.add(Object::new(
        horizontal(DVec3::new(0.0, 150.0, 0.0), 300.0),
        Opaque::new([0.1, 0.9, 0.0], grey)?,
    ));
    scene.add(Object::new(
        horizontal(DVec3::new(0.0, 150.0, 225.0), 300.0),
        Opaque::new([0.1, 0.9, 0.0], grey)?,
    ));
    scene.add(Object::new(
        horizontal(DVec3::new(112.5, 37.5, 224.5), 75.0),
        Opaque::new([0.1, 0.0, 0.0], Color::ZERO)?
            .with_emission(Emission::Constant(Color::splat(32.0))),
    ));
    scene.add(led_wall(texture, 0.05)?);

    let side = |y: f64, normal: DVec3| {
        Rectangle::new(DVec3::new(0.0, y, 0.0), normal, DVec3::X, DVec3::Z, 300.0, 225.0)
    };
    scene.add(Object::new(
        side(150.0, -DVec3::Y),
        Opaque::new([0.1, 0.9, 0.0], Color::new(0.25, 0.25, 0.75))?,
    ));
    scene.add(Object::new(
        side(-150.0, DVec3::Y),
        Opaque::new([0.1, 0.9, 0.0], Color::new(0.25, 0.75, 0.25))?,
    ));

    for (center, weights) in [
        (DVec3::new(140.1, 84.9, 20.5), [0.1, 0.9, 0.0]),
        (DVec3::new(105.0, 0.0, 20.5), [0.1, 0.45, 0.45]),
        (DVec3::new(140.1, -84.9, 20.5), [0.1, 0.0, 0.9]),
    ] {
        scene.add(Object::new(Sphere::new(center, 20.0), Opaque::new(weights, Color::ONE)?));
    }

    let camera = Camera::new(
        DVec3::new(-600.0, 0.0, 112.5),
        DVec3::new(600.5, 0.0, 0.0),
        -DVec3::Y,
        DVec3::Z,
        3.0 / 16.0,
    );
    Ok((scene, camera))
}
