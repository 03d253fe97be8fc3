/// One GPU-side texture.
///
/// Handles are owned by a [`TextureRegistry`](super::TextureRegistry); the
/// rest of the crate refers to them by [`TextureId`](super::TextureId).
pub trait GpuTexture {
    /// Backend-native identifier, for diagnostics and render-target
    /// attachment. Not a registry key.
    fn id(&self) -> u32;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn bind(&self);
}
