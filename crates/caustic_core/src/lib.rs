//! Caustic Core - data files for the renderer.
//!
//! This crate provides:
//!
//! - **Checkpoints**: summed radiance plus pass count, for resumable renders
//! - **Projector textures**: texel grids shown by emissive panels
//! - **Previews**: 8-bit PNG export of the mean image
//!
//! # Example
//!
//! ```ignore
//! use caustic_core::{preview, Checkpoint};
//!
//! let checkpoint = Checkpoint::load("out/scene.dat")?;
//! preview::save_png("out/scene.png", checkpoint.width, checkpoint.height, &checkpoint.mean())?;
//! ```

pub mod checkpoint;
pub mod codec;
pub mod preview;
pub mod texture;

// Re-export commonly used types
pub use checkpoint::Checkpoint;
pub use codec::{CodecError, CodecResult};
pub use texture::Texture;
