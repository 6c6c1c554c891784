//! Projector textures for emissive panels.
//!
//! A projector file is a `width, height` header followed by the texel grid,
//! encoded with [`crate::codec`]. Texels are linear radiance values stored
//! blue, green, red; the conversion from 8-bit images is a plain
//! `value / 255` per channel.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use caustic_math::DVec3;

use crate::codec::{self, CodecError, CodecResult};

/// A texel grid indexed by integer pixel coordinates, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Texture width in pixels
    pub width: usize,

    /// Texture height in pixels
    pub height: usize,

    /// Texels, row-major
    pub pixels: Vec<DVec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from texel data.
    pub fn new(width: usize, height: usize, pixels: Vec<DVec3>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Texel at integer coordinates, `None` when outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Option<DVec3> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width + x as usize).copied()
    }

    pub fn read_from<R: Read>(reader: &mut R, path: impl Into<String>) -> CodecResult<Self> {
        let (width, height) = codec::read_dimensions(reader)?;
        let pixels = codec::read_vectors(reader, codec::grid_len(width, height)?)?;
        Ok(Self::new(width, height, pixels, path))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> CodecResult<()> {
        let expected = codec::grid_len(self.width, self.height)?;
        if self.pixels.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                found: self.pixels.len(),
            });
        }
        codec::write_dimensions(writer, self.width, self.height)?;
        codec::write_vectors(writer, &self.pixels)
    }

    /// Load a projector file.
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path).map_err(|e| {
            CodecError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to open {}: {}", path.display(), e),
            ))
        })?);
        let texture = Self::read_from(&mut reader, path.to_string_lossy())?;

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path.display(),
            texture.width,
            texture.height,
            texture.size_bytes() as f64 / 1024.0
        );
        Ok(texture)
    }

    /// Save as a projector file.
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Convert an 8-bit image (any format the `image` crate decodes).
    ///
    /// Channels land in texel order: `x` blue, `y` green, `z` red.
    pub fn from_image(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                DVec3::new(
                    p[2] as f64 / 255.0,
                    p[1] as f64 / 255.0,
                    p[0] as f64 / 255.0,
                )
            })
            .collect();

        Ok(Self::new(
            width as usize,
            height as usize,
            pixels,
            path.to_string_lossy(),
        ))
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * codec::VECTOR_BYTES
    }
}
