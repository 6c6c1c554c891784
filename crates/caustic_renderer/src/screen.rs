//! Accumulation screen: a running sum of radiance samples per pixel.

use std::path::Path;

use caustic_core::{Checkpoint, CodecResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::material::Color;
use crate::scene::Scene;

/// Summed radiance for every pixel plus the number of passes taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    buffer: Checkpoint,
}

impl Screen {
    /// Create an empty screen.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "screen must be at least 1x1");
        Self {
            buffer: Checkpoint::new(width, height),
        }
    }

    pub fn from_checkpoint(checkpoint: Checkpoint) -> Self {
        Self { buffer: checkpoint }
    }

    pub fn checkpoint(&self) -> &Checkpoint {
        &self.buffer
    }

    pub fn into_checkpoint(self) -> Checkpoint {
        self.buffer
    }

    /// Resume from `path`, or start empty when it cannot be read.
    ///
    /// A stored screen keeps its own dimensions even when they differ from
    /// the requested ones.
    pub fn restore_or_new(path: impl AsRef<Path>, width: usize, height: usize) -> Self {
        let path = path.as_ref();
        match Checkpoint::load(path) {
            Ok(checkpoint) => {
                if (checkpoint.width, checkpoint.height) != (width, height) {
                    log::warn!(
                        "Checkpoint {} is {}x{}, not the requested {}x{}; keeping its size",
                        path.display(),
                        checkpoint.width,
                        checkpoint.height,
                        width,
                        height
                    );
                }
                log::info!(
                    "Resuming {} at {} passes",
                    path.display(),
                    checkpoint.count
                );
                Self::from_checkpoint(checkpoint)
            }
            Err(e) => {
                log::info!(
                    "Starting a fresh {}x{} screen ({}: {})",
                    width,
                    height,
                    path.display(),
                    e
                );
                Self::new(width, height)
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        self.buffer.save(path)
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    /// Number of completed passes.
    pub fn count(&self) -> u64 {
        self.buffer.count
    }

    /// Summed radiance at `(x, y)`, row 0 at the top.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.buffer.pixels[y * self.buffer.width + x]
    }

    /// Per-pixel average over all passes.
    pub fn mean(&self) -> Vec<Color> {
        self.buffer.mean()
    }

    /// Add one radiance sample to every pixel.
    ///
    /// Rows are traced in parallel, each with its own generator seeded from
    /// `seed`, the pass index and the row index.
    pub fn capture(&mut self, camera: &Camera, scene: &Scene, seed: u64) {
        let width = self.buffer.width;
        let half_width = (width / 2) as i64;
        let half_height = (self.buffer.height / 2) as i64;
        let pass = self.buffer.count;

        self.buffer
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut rng = StdRng::seed_from_u64(row_seed(seed, pass, y));
                let py = half_height - y as i64;
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell += camera.transmit(scene, x as i64 - half_width, py, &mut rng);
                }
            });

        self.buffer.count += 1;
    }
}

/// Mix the session seed with the pass and row into a per-row seed.
fn row_seed(seed: u64, pass: u64, row: usize) -> u64 {
    seed ^ pass.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ (row as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
}
