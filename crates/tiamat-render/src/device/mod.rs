//! Seams to the GPU layer the core draws through.
//!
//! The crate never creates a device or compiles a shader; it consumes these
//! traits, implemented by whichever backend hosts it. Textures live in a
//! [`TextureRegistry`] arena and everything else refers to them by
//! [`TextureId`], so teardown order is governed in exactly one place.

mod buffer;
mod gpu;
mod registry;
mod shader;
mod target;
mod texture;

pub use buffer::{BufferKind, GpuBuffer, Primitive};
pub use gpu::GpuDevice;
pub use registry::{TextureId, TextureRegistry};
pub use shader::{Shader, U_TEXTURE, U_VIEW_PROJECTION};
pub use target::OffscreenTarget;
pub use texture::GpuTexture;

#[cfg(test)]
pub(crate) mod testing;
