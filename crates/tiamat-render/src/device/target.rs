use super::texture::GpuTexture;

/// Redirects rendering into a texture, used when a glyph bitmap is drawn
/// onto its atlas.
pub trait OffscreenTarget {
    /// Makes `target` the render destination. `restore_width` and
    /// `restore_height` are the on-screen viewport dimensions [`end`]
    /// reinstates when the pass finishes.
    ///
    /// [`end`]: OffscreenTarget::end
    fn start(&mut self, restore_width: u32, restore_height: u32, target: &dyn GpuTexture);

    /// Ends the pass and restores on-screen rendering.
    fn end(&mut self);
}
