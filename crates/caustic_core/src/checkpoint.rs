//! Checkpoint files for resumable rendering.
//!
//! Layout (little-endian):
//!
//! ```text
//! i64 sample_count
//! i64 width
//! i64 height
//! [f64; 3] * width * height   row-major, y-major
//! ```
//!
//! There is no version header, so files stay byte-compatible with older
//! checkpoints written on little-endian hosts.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use caustic_math::DVec3;

use crate::codec::{self, CodecError, CodecResult};

/// A persisted accumulation buffer: summed radiance plus the pass count.
#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    /// Number of completed passes summed into `pixels`
    pub count: u64,
    pub width: usize,
    pub height: usize,
    /// Summed (not averaged) radiance, row-major
    pub pixels: Vec<DVec3>,
}

impl Checkpoint {
    /// An empty checkpoint with all cells zeroed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            count: 0,
            width,
            height,
            pixels: vec![DVec3::ZERO; width * height],
        }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> CodecResult<Self> {
        let count = codec::read_i64(reader)?;
        if count < 0 {
            return Err(CodecError::InvalidHeader(format!(
                "sample count must not be negative, got {count}"
            )));
        }
        let (width, height) = codec::read_dimensions(reader)?;
        let pixels = codec::read_vectors(reader, codec::grid_len(width, height)?)?;

        Ok(Self {
            count: count as u64,
            width,
            height,
            pixels,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> CodecResult<()> {
        let expected = codec::grid_len(self.width, self.height)?;
        if self.pixels.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                found: self.pixels.len(),
            });
        }
        let count = i64::try_from(self.count).map_err(|_| {
            CodecError::InvalidHeader(format!("sample count {} does not fit in i64", self.count))
        })?;

        codec::write_i64(writer, count)?;
        codec::write_dimensions(writer, self.width, self.height)?;
        codec::write_vectors(writer, &self.pixels)
    }

    /// Load a checkpoint from disk.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let checkpoint = Self::read_from(&mut reader)?;

        log::debug!(
            "Loaded checkpoint: {} ({}x{}, {} passes)",
            path.display(),
            checkpoint.width,
            checkpoint.height,
            checkpoint.count
        );
        Ok(checkpoint)
    }

    /// Save to disk, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        log::debug!("Saved checkpoint: {} ({} passes)", path.display(), self.count);
        Ok(())
    }

    /// Average radiance per pixel. All zeros before the first pass.
    pub fn mean(&self) -> Vec<DVec3> {
        if self.count == 0 {
            return vec![DVec3::ZERO; self.pixels.len()];
        }
        let scale = 1.0 / self.count as f64;
        self.pixels.iter().map(|p| *p * scale).collect()
    }
}
