//! Binary codec shared by checkpoint and projector texture files.
//!
//! Layout: signed 64-bit little-endian integers for headers, followed by a
//! row-major grid of vectors, each stored as three little-endian `f64`
//! components. Nothing is cast from in-memory layout; every field is encoded
//! explicitly.

use std::io::{Read, Write};

use caustic_math::DVec3;
use thiserror::Error;

/// Size of one encoded vector in bytes.
pub const VECTOR_BYTES: usize = 3 * 8;

/// Errors that can occur while reading or writing renderer data files.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Size mismatch: expected {expected} vectors, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type CodecResult<T> = Result<T, CodecError>;

pub fn read_i64<R: Read>(reader: &mut R) -> CodecResult<i64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(i64::from_le_bytes(bytes))
}

pub fn write_i64<W: Write>(writer: &mut W, value: i64) -> CodecResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Read a `width, height` header pair. Both must be positive.
pub fn read_dimensions<R: Read>(reader: &mut R) -> CodecResult<(usize, usize)> {
    let width = read_i64(reader)?;
    let height = read_i64(reader)?;
    if width <= 0 || height <= 0 {
        return Err(CodecError::InvalidHeader(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok((width as usize, height as usize))
}

pub fn write_dimensions<W: Write>(writer: &mut W, width: usize, height: usize) -> CodecResult<()> {
    write_i64(writer, dimension_to_i64(width)?)?;
    write_i64(writer, dimension_to_i64(height)?)
}

/// Number of grid cells for the given dimensions, rejecting overflow.
pub fn grid_len(width: usize, height: usize) -> CodecResult<usize> {
    width
        .checked_mul(height)
        .filter(|len| len.checked_mul(VECTOR_BYTES).is_some())
        .ok_or_else(|| CodecError::InvalidHeader(format!("grid {width}x{height} is too large")))
}

/// Read exactly `count` vectors.
///
/// The payload is read incrementally, so a corrupt header announcing a huge
/// grid fails with [`CodecError::SizeMismatch`] instead of a huge allocation.
pub fn read_vectors<R: Read>(reader: &mut R, count: usize) -> CodecResult<Vec<DVec3>> {
    let byte_len = count * VECTOR_BYTES;
    let mut bytes = Vec::new();
    reader.take(byte_len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != byte_len {
        return Err(CodecError::SizeMismatch {
            expected: count,
            found: bytes.len() / VECTOR_BYTES,
        });
    }

    let vectors = bytes
        .chunks_exact(VECTOR_BYTES)
        .map(|chunk| {
            let component = |i: usize| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&chunk[i * 8..(i + 1) * 8]);
                f64::from_le_bytes(raw)
            };
            DVec3::new(component(0), component(1), component(2))
        })
        .collect();
    Ok(vectors)
}

pub fn write_vectors<W: Write>(writer: &mut W, vectors: &[DVec3]) -> CodecResult<()> {
    for v in vectors {
        writer.write_all(&v.x.to_le_bytes())?;
        writer.write_all(&v.y.to_le_bytes())?;
        writer.write_all(&v.z.to_le_bytes())?;
    }
    Ok(())
}

fn dimension_to_i64(value: usize) -> CodecResult<i64> {
    i64::try_from(value)
        .map_err(|_| CodecError::InvalidHeader(format!("dimension {value} does not fit in i64")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_i64_little_endian() {
        let mut bytes = Vec::new();
        write_i64(&mut bytes, 1600).unwrap();
        assert_eq!(bytes, vec![0x40, 0x06, 0, 0, 0, 0, 0, 0]);

        let value = read_i64(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(value, 1600);
    }

    #[test]
    fn test_vector_component_order() {
        let mut bytes = Vec::new();
        write_vectors(&mut bytes, &[DVec3::new(1.0, 2.0, 3.0)]).unwrap();

        assert_eq!(bytes.len(), VECTOR_BYTES);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2.0f64.to_le_bytes());
        assert_eq!(&bytes[16..24], &3.0f64.to_le_bytes());
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = Vec::new();
        write_vectors(&mut bytes, &[DVec3::ONE, DVec3::ONE]).unwrap();
        bytes.truncate(VECTOR_BYTES + 4);

        let err = read_vectors(&mut Cursor::new(bytes), 2).unwrap_err();
        assert!(matches!(err, CodecError::SizeMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let mut bytes = Vec::new();
        write_i64(&mut bytes, 4).unwrap();
        write_i64(&mut bytes, 0).unwrap();

        let err = read_dimensions(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidHeader(_)));
    }

    #[test]
    fn test_grid_len_overflow() {
        assert_eq!(grid_len(4, 3).unwrap(), 12);
        assert!(grid_len(usize::MAX, 2).is_err());
    }
}
