use anyhow::Result;

use super::buffer::{BufferKind, GpuBuffer};
use super::texture::GpuTexture;

/// Resource factory of the hosting GPU backend.
///
/// Creation failures are the backend's to signal; the batching core either
/// propagates them from constructors or logs and drops the one draw request
/// that needed the resource.
pub trait GpuDevice {
    /// Creates a buffer of `size` bytes, optionally initialized with `data`.
    fn create_buffer(
        &self,
        kind: BufferKind,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuBuffer>>;

    /// Creates a `width` x `height` texture. `data`, when present, is
    /// tightly packed RGBA8, `width * height * 4` bytes.
    fn create_texture(
        &self,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> Result<Box<dyn GpuTexture>>;
}
