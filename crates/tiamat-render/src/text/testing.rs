//! Scripted face doubles so packing tests control every glyph's metrics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;

use crate::text::raster::{FontFace, FontRasterizer, RasterizedGlyph};

/// Fully-covered bitmap with the given metrics.
pub(crate) fn glyph(
    width: u32,
    height: u32,
    bearing_x: i32,
    bearing_y: i32,
    advance: i32,
) -> RasterizedGlyph {
    RasterizedGlyph {
        width,
        height,
        bitmap: vec![0xFF; (width * height) as usize],
        bearing_x,
        bearing_y,
        advance,
    }
}

/// Face double that serves pre-scripted glyphs and records every
/// rasterization attempt with the pixel size it ran at.
pub(crate) struct ScriptedFace {
    glyphs: HashMap<char, RasterizedGlyph>,
    rasterized: Rc<RefCell<Vec<(char, u32)>>>,
}

impl ScriptedFace {
    pub(crate) fn new() -> Self {
        Self { glyphs: HashMap::new(), rasterized: Rc::new(RefCell::new(Vec::new())) }
    }

    pub(crate) fn with(mut self, ch: char, glyph: RasterizedGlyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    /// Shared log of rasterization attempts, misses included. Grab a
    /// handle before the face moves into a `Font`.
    pub(crate) fn rasterized(&self) -> Rc<RefCell<Vec<(char, u32)>>> {
        Rc::clone(&self.rasterized)
    }
}

impl FontFace for ScriptedFace {
    fn open(&self) -> Result<Box<dyn FontRasterizer>> {
        Ok(Box::new(ScriptedRasterizer {
            glyphs: self.glyphs.clone(),
            pixel_size: 0,
            rasterized: Rc::clone(&self.rasterized),
        }))
    }
}

struct ScriptedRasterizer {
    glyphs: HashMap<char, RasterizedGlyph>,
    pixel_size: u32,
    rasterized: Rc<RefCell<Vec<(char, u32)>>>,
}

impl FontRasterizer for ScriptedRasterizer {
    fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size;
    }

    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        self.rasterized.borrow_mut().push((ch, self.pixel_size));
        self.glyphs.get(&ch).cloned()
    }
}
