//! Simple light transport example.
//!
//! Renders a small box with a glass sphere, a mirrored drop and a ceiling
//! light, then saves the mean image as PNG.

use caustic_core::preview;
use caustic_renderer::{
    Camera, Color, DVec3, Emission, Object, Opaque, Rectangle, Scene, Screen, Sphere, Teardrop,
    Transparent,
};

const PASSES: u32 = 64;

fn main() {
    println!("caustic - Simple Example");
    println!("========================");

    let start = std::time::Instant::now();
    let scene = build_scene().expect("Invalid scene");
    println!("Scene built in {:?} ({} objects)", start.elapsed(), scene.len());

    let camera = Camera::new(
        DVec3::new(-300.0, 0.0, 60.0),
        DVec3::new(300.0, 0.0, 0.0),
        -DVec3::Y,
        DVec3::Z,
        0.5,
    );

    let mut screen = Screen::new(320, 240);
    println!("Rendering {}x{} @ {} passes...", screen.width(), screen.height(), PASSES);

    let start = std::time::Instant::now();
    for _ in 0..PASSES {
        screen.capture(&camera, &scene, 2024);
    }
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    preview::save_png(filename, screen.width(), screen.height(), &screen.mean())
        .expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Result<Scene, caustic_renderer::SceneError> {
    let mut scene = Scene::new();

    // Floor and ceiling, 200 x 200
    let floor = Rectangle::new(
        DVec3::new(0.0, 100.0, 0.0),
        DVec3::Z,
        -DVec3::Y,
        DVec3::X,
        200.0,
        200.0,
    );
    let ceiling = Rectangle::new(
        DVec3::new(0.0, 100.0, 120.0),
        -DVec3::Z,
        -DVec3::Y,
        DVec3::X,
        200.0,
        200.0,
    );
    scene.add(Object::new(floor, Opaque::new([0.1, 0.9, 0.0], Color::splat(0.75))?));
    scene.add(Object::new(ceiling, Opaque::new([0.1, 0.9, 0.0], Color::splat(0.75))?));

    // Light panel just under the ceiling
    let light = Rectangle::new(
        DVec3::new(75.0, 25.0, 119.5),
        -DVec3::Z,
        -DVec3::Y,
        DVec3::X,
        50.0,
        50.0,
    );
    scene.add(Object::new(
        light,
        Opaque::new([1.0, 0.0, 0.0], Color::ZERO)?
            .with_emission(Emission::Constant(Color::splat(16.0))),
    ));

    // Back wall
    let back = Rectangle::new(
        DVec3::new(200.0, 100.0, 0.0),
        -DVec3::X,
        -DVec3::Y,
        DVec3::Z,
        200.0,
        120.0,
    );
    scene.add(Object::new(
        back,
        Opaque::new([0.1, 0.9, 0.0], Color::new(0.25, 0.25, 0.75))?,
    ));

    scene.add(Object::new(
        Sphere::new(DVec3::new(100.0, -40.0, 20.0), 20.0),
        Transparent::new([0.1, 0.9], Color::ONE, 1.5)?,
    ));
    scene.add(Object::new(
        Teardrop::new(DVec3::new(120.0, 40.0, 0.0), 8.0),
        Opaque::new([0.1, 0.0, 0.9], Color::ONE)?,
    ));

    Ok(scene)
}
