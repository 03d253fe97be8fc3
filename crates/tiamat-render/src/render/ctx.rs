use crate::coords::Viewport;
use crate::device::{GpuDevice, OffscreenTarget, TextureRegistry};

/// Collaborators a draw call reaches through, passed down per call.
///
/// Bundles the device for on-demand resource creation, the registry that
/// resolves texture ids, the offscreen target for atlas writes, and the
/// on-screen viewport those writes restore.
pub struct RenderCtx<'a> {
    pub device: &'a dyn GpuDevice,
    pub textures: &'a mut TextureRegistry,
    pub target: &'a mut dyn OffscreenTarget,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a dyn GpuDevice,
        textures: &'a mut TextureRegistry,
        target: &'a mut dyn OffscreenTarget,
        viewport: Viewport,
    ) -> Self {
        Self { device, textures, target, viewport }
    }
}
