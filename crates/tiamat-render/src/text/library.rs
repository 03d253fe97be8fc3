use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;

use crate::text::raster::{FontFace, FontRasterizer, RasterizedGlyph};

/// Error returned by [`FontLibrary::load_face`] and
/// [`FontLibrary::load_face_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a face loaded into a [`FontLibrary`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FaceId(pub(crate) usize);

/// Owns the parsed typefaces of an application.
///
/// Faces are immutable after loading. Handles returned by
/// [`face`](FontLibrary::face) share the parsed data, so several `Font`s
/// can pack glyphs from one face independently.
pub struct FontLibrary {
    faces: Vec<FaceHandle>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    /// Reads and parses a TrueType or OpenType face from `path`.
    pub fn load_face(&mut self, path: &Path) -> Result<FaceId, FontLoadError> {
        let bytes = fs::read(path)
            .map_err(|e| FontLoadError(format!("reading {}: {e}", path.display())))?;
        self.load_face_bytes(&bytes)
    }

    /// Parses a face from raw bytes already in memory.
    ///
    /// Returns the `FaceId` that identifies the face in later lookups.
    pub fn load_face_bytes(&mut self, bytes: &[u8]) -> Result<FaceId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FaceId(self.faces.len());
        self.faces.push(FaceHandle { font: Rc::new(font) });
        Ok(id)
    }

    /// Returns a shareable handle to a loaded face, if `id` is valid.
    #[must_use]
    pub fn face(&self, id: FaceId) -> Option<FaceHandle> {
        self.faces.get(id.0).cloned()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed face handed out by a [`FontLibrary`].
#[derive(Clone)]
pub struct FaceHandle {
    font: Rc<fontdue::Font>,
}

impl FontFace for FaceHandle {
    fn open(&self) -> Result<Box<dyn FontRasterizer>> {
        Ok(Box::new(FontdueRasterizer { font: Rc::clone(&self.font), pixel_size: 0 }))
    }
}

struct FontdueRasterizer {
    font: Rc<fontdue::Font>,
    pixel_size: u32,
}

impl FontRasterizer for FontdueRasterizer {
    fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size;
    }

    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        if self.pixel_size == 0 || self.font.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, bitmap) = self.font.rasterize(ch, self.pixel_size as f32);
        Some(RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            bitmap,
            bearing_x: metrics.xmin,
            // fontdue's ymin is baseline to bottom row; the packer wants
            // baseline to top row.
            bearing_y: metrics.height as i32 + metrics.ymin,
            advance: advance_to_26_6(metrics.advance_width),
        })
    }
}

/// Converts a pixel advance into the 1/64-pixel fixed-point unit glyphs
/// carry.
#[inline]
#[must_use]
pub fn advance_to_26_6(advance: f32) -> i32 {
    (advance * 64.0).round() as i32
}
