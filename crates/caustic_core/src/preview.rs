//! 8-bit previews of the mean radiance image.
//!
//! Radiance components are stored blue, green, red, so they are written
//! to the image in reverse.

use std::path::Path;

use caustic_math::DVec3;
use image::{ImageFormat, Rgb, RgbImage};

use crate::codec::{CodecError, CodecResult};

/// Clamp each component to [0, 1], scale to a byte (truncating) and
/// reorder to red, green, blue.
#[inline]
pub fn to_rgb8(color: DVec3) -> [u8; 3] {
    let byte = |c: f64| (255.0 * c.clamp(0.0, 1.0)) as u8;
    [byte(color.z), byte(color.y), byte(color.x)]
}

/// Build an RGB image from row-major radiance values.
pub fn to_image(width: usize, height: usize, pixels: &[DVec3]) -> CodecResult<RgbImage> {
    if pixels.len() != width * height {
        return Err(CodecError::SizeMismatch {
            expected: width * height,
            found: pixels.len(),
        });
    }
    let img = RgbImage::from_fn(width as u32, height as u32, |x, y| {
        Rgb(to_rgb8(pixels[y as usize * width + x as usize]))
    });
    Ok(img)
}

/// Write row-major radiance values as a PNG.
pub fn save_png(path: impl AsRef<Path>, width: usize, height: usize, pixels: &[DVec3]) -> CodecResult<()> {
    let path = path.as_ref();
    to_image(width, height, pixels)?.save_with_format(path, ImageFormat::Png)?;
    log::debug!("Saved preview: {} ({}x{})", path.display(), width, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb8_clamps_and_truncates() {
        assert_eq!(to_rgb8(DVec3::ZERO), [0, 0, 0]);
        assert_eq!(to_rgb8(DVec3::new(1.0, 24.0, -3.0)), [0, 255, 255]);
        // 0.5 * 255 = 127.5 truncates down
        assert_eq!(to_rgb8(DVec3::splat(0.5)), [127, 127, 127]);
    }

    #[test]
    fn test_to_image_layout() {
        let pixels = vec![DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE];
        let img = to_image(2, 2, &pixels).unwrap();

        // x is blue, z is red
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_to_image_size_mismatch() {
        assert!(to_image(2, 2, &[DVec3::ZERO]).is_err());
    }
}
