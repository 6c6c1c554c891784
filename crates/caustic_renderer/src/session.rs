//! Progressive render session: resume, accumulate passes, save.
//!
//! The loop runs until a stop file appears (polled every few passes) or an
//! optional pass limit is reached, then writes the checkpoint back.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use caustic_core::CodecError;
use thiserror::Error;

use crate::camera::Camera;
use crate::scene::Scene;
use crate::screen::Screen;

/// Errors that end a session.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both sides must be at least 1")]
    EmptyResolution { width: usize, height: usize },

    #[error("Failed to save checkpoint {path}: {source}")]
    Checkpoint {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// Render session configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Screen width for a fresh session
    pub width: usize,
    /// Screen height for a fresh session
    pub height: usize,
    /// Checkpoint resumed from and saved to
    pub checkpoint: PathBuf,
    /// File whose appearance ends the session
    pub stop_file: PathBuf,
    /// Passes between stop-file polls
    pub poll_stride: u64,
    /// Stop after this many passes in this session
    pub max_passes: Option<u64>,
    /// Base seed for per-row generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            checkpoint: PathBuf::from("out/scene.dat"),
            stop_file: PathBuf::from("stop"),
            poll_stride: 16,
            max_passes: None,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint = path.into();
        self
    }

    pub fn with_stop_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_file = path.into();
        self
    }

    /// Poll stride, at least 1.
    pub fn with_poll_stride(mut self, stride: u64) -> Self {
        self.poll_stride = stride.max(1);
        self
    }

    pub fn with_max_passes(mut self, passes: u64) -> Self {
        self.max_passes = Some(passes);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Consume the stop file if present.
///
/// The file is deleted on detection so a stop request fires once.
pub fn should_stop(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Cannot remove stop file {}: {}", path.display(), e);
            path.exists()
        }
    }
}

/// Run a progressive session and return the final screen.
///
/// The screen is saved to `config.checkpoint` before returning.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> Result<Screen, RenderError> {
    if config.width == 0 || config.height == 0 {
        return Err(RenderError::EmptyResolution {
            width: config.width,
            height: config.height,
        });
    }
    let mut screen = Screen::restore_or_new(&config.checkpoint, config.width, config.height);
    let stride = config.poll_stride.max(1);
    log::info!(
        "Rendering {}x{} ({} objects), stop file {} polled every {} passes",
        screen.width(),
        screen.height(),
        scene.len(),
        config.stop_file.display(),
        stride
    );

    let start = Instant::now();
    let mut passes = 0u64;
    loop {
        if passes % stride == 0 && should_stop(&config.stop_file) {
            log::info!("Stop file found after {} passes", passes);
            break;
        }
        if config.max_passes.is_some_and(|max| passes >= max) {
            break;
        }

        let pass_start = Instant::now();
        screen.capture(camera, scene, config.seed);
        passes += 1;
        log::debug!("Pass {} took {:.2?}", screen.count(), pass_start.elapsed());
    }

    screen
        .save(&config.checkpoint)
        .map_err(|source| RenderError::Checkpoint {
            path: config.checkpoint.clone(),
            source,
        })?;
    log::info!(
        "Saved {} after {} passes this session ({} total) in {:.2?}",
        config.checkpoint.display(),
        passes,
        screen.count(),
        start.elapsed()
    );

    Ok(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, Emission, Opaque};
    use crate::scene::Object;
    use crate::sphere::Sphere;
    use caustic_math::DVec3;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tiny_scene() -> (Scene, Camera) {
        let light = Opaque::new([1.0, 0.0, 0.0], Color::ONE)
            .unwrap()
            .with_emission(Emission::Constant(Color::ONE));
        let mut scene = Scene::new();
        scene.add(Object::new(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0), light));
        let camera = Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::X, DVec3::Y, 0.25);
        (scene, camera)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (1600, 1200));
        assert_eq!(config.poll_stride, 16);
        assert_eq!(config.checkpoint, PathBuf::from("out/scene.dat"));
        assert!(config.max_passes.is_none());
    }

    #[test]
    fn test_poll_stride_at_least_one() {
        assert_eq!(RenderConfig::default().with_poll_stride(0).poll_stride, 1);
    }

    #[test]
    fn test_should_stop_consumes_file() {
        let dir = scratch_dir("caustic_should_stop");
        let stop = dir.join("stop");

        assert!(!should_stop(&stop));
        std::fs::write(&stop, b"").unwrap();
        assert!(should_stop(&stop));
        assert!(!stop.exists());
        assert!(!should_stop(&stop));
    }

    #[test]
    fn test_pass_limit_and_resume() {
        init_logger();
        let dir = scratch_dir("caustic_session_resume");
        let (scene, camera) = tiny_scene();
        let config = RenderConfig::default()
            .with_resolution(8, 6)
            .with_checkpoint(dir.join("out").join("scene.dat"))
            .with_stop_file(dir.join("stop"))
            .with_max_passes(3)
            .with_seed(7);

        let first = render(&scene, &camera, &config).unwrap();
        assert_eq!(first.count(), 3);
        assert!(config.checkpoint.exists());

        // The second session picks up where the first left off
        let second = render(&scene, &camera, &config).unwrap();
        assert_eq!(second.count(), 6);
        assert_eq!((second.width(), second.height()), (8, 6));
    }

    #[test]
    fn test_stop_file_before_first_pass() {
        init_logger();
        let dir = scratch_dir("caustic_session_stop");
        let (scene, camera) = tiny_scene();
        let config = RenderConfig::default()
            .with_resolution(4, 4)
            .with_checkpoint(dir.join("scene.dat"))
            .with_stop_file(dir.join("stop"))
            .with_max_passes(100);

        std::fs::write(&config.stop_file, b"").unwrap();
        let screen = render(&scene, &camera, &config).unwrap();

        assert_eq!(screen.count(), 0);
        assert!(!config.stop_file.exists());
        assert!(config.checkpoint.exists());
    }

    #[test]
    fn test_zero_resolution_is_error() {
        let dir = scratch_dir("caustic_session_zero_resolution");
        let (scene, camera) = tiny_scene();
        let config = RenderConfig::default()
            .with_resolution(0, 4)
            .with_checkpoint(dir.join("scene.dat"))
            .with_stop_file(dir.join("stop"))
            .with_max_passes(1);

        let result = render(&scene, &camera, &config);
        assert!(matches!(
            result,
            Err(RenderError::EmptyResolution { width: 0, height: 4 })
        ));
        assert!(!config.checkpoint.exists());
    }

    #[test]
    fn test_save_failure_reported() {
        let dir = scratch_dir("caustic_session_save_failure");
        // A regular file where a parent directory is expected
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let (scene, camera) = tiny_scene();
        let config = RenderConfig::default()
            .with_resolution(2, 2)
            .with_checkpoint(blocker.join("scene.dat"))
            .with_stop_file(dir.join("stop"))
            .with_max_passes(1);

        let result = render(&scene, &camera, &config);
        assert!(matches!(result, Err(RenderError::Checkpoint { .. })));
    }
}
