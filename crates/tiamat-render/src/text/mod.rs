//! Font loading and dynamic glyph packing.
//!
//! [`FontLibrary`] parses typefaces and hands out [`FaceHandle`]s; a
//! [`Font`] packs one face's glyphs into per-size atlas textures as they
//! are first drawn. Rasterization sits behind the [`FontFace`] and
//! [`FontRasterizer`] traits so the packer is testable without a real
//! typeface.

mod font;
mod library;
mod raster;

pub use font::{DEFAULT_ATLAS_SIZE, Font, Glyph};
pub use library::{FaceHandle, FaceId, FontLibrary, FontLoadError, advance_to_26_6};
pub use raster::{FontFace, FontRasterizer, RasterizedGlyph};

#[cfg(test)]
pub(crate) mod testing;
