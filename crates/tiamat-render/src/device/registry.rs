use anyhow::Result;
use slotmap::SlotMap;

use super::gpu::GpuDevice;
use super::texture::GpuTexture;

slotmap::new_key_type! {
    /// Stable handle to a texture owned by a [`TextureRegistry`].
    ///
    /// The default (null) key resolves to nothing; the fallback glyph uses
    /// it so "not renderable" needs no separate sentinel texture.
    pub struct TextureId;
}

/// Arena owning every texture the batching core touches.
///
/// Batches and atlases hold [`TextureId`] keys and resolve through the
/// registry at flush time; dropping the registry (or removing an entry) is
/// the only way a texture dies. Keys are generational, so a removed id
/// never aliases a later insertion.
pub struct TextureRegistry {
    textures: SlotMap<TextureId, Box<dyn GpuTexture>>,
}

impl TextureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { textures: SlotMap::with_key() }
    }

    /// Takes ownership of `texture` and returns its key.
    pub fn insert(&mut self, texture: Box<dyn GpuTexture>) -> TextureId {
        self.textures.insert(texture)
    }

    /// Creates a texture on `device` and registers it in one step.
    pub fn create(
        &mut self,
        device: &dyn GpuDevice,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> Result<TextureId> {
        let texture = device.create_texture(width, height, data)?;
        Ok(self.insert(texture))
    }

    #[must_use]
    pub fn get(&self, id: TextureId) -> Option<&dyn GpuTexture> {
        self.textures.get(id).map(|t| &**t)
    }

    #[must_use]
    pub fn dimensions(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(id).map(|t| (t.width(), t.height()))
    }

    /// Removes and returns the texture, dropping it at the caller's chosen
    /// point in the teardown order.
    pub fn remove(&mut self, id: TextureId) -> Option<Box<dyn GpuTexture>> {
        self.textures.remove(id)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
