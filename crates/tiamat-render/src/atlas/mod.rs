//! Static sprite-sheet indexing.
//!
//! A [`TextureAtlas`] maps names onto fixed UV sub-rectangles of one
//! backing texture. Regions are declared once at creation, unlike the
//! glyph atlases in [`crate::text`] which fill at runtime.

mod texture_atlas;

pub use texture_atlas::{PixelRegion, TextureAtlas};
