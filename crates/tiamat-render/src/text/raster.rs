use anyhow::Result;

/// A glyph bitmap with its metrics, as produced by a [`FontRasterizer`].
///
/// `bitmap` is row-major coverage, one byte per pixel, `width * height`
/// bytes long. `bearing_y` is measured from the baseline up to the top row
/// of the bitmap. `advance` stays in 1/64-pixel fixed point; consumers
/// shift it down to whole pixels.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    pub bitmap: Vec<u8>,
    pub bearing_x: i32,
    pub bearing_y: i32,
    pub advance: i32,
}

/// A parsed typeface that can be opened for rasterization.
pub trait FontFace {
    fn open(&self) -> Result<Box<dyn FontRasterizer>>;
}

/// Rasterizes single characters at a fixed pixel size.
pub trait FontRasterizer {
    /// Selects the pixel size used by subsequent [`Self::rasterize`] calls.
    fn set_pixel_size(&mut self, pixel_size: u32);

    /// Returns `None` when the face has no glyph for `ch` or no pixel size
    /// has been set.
    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph>;
}
