use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result, bail, ensure};

use crate::coords::{Mat4, Rect, Vec2};
use crate::device::{Shader, TextureId};
use crate::render::{BatchPool, RenderCtx};
use crate::text::raster::{FontFace, FontRasterizer, RasterizedGlyph};

/// Default edge length of the per-size atlas textures.
pub const DEFAULT_ATLAS_SIZE: u32 = 2048;

/// A packed glyph: where it lives in its size's atlas and how far the pen
/// moves past it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub texture: TextureId,
    pub uv: Rect,
    /// Bitmap dimensions in pixels.
    pub size: Vec2,
    /// Offset from the pen: `x` to the bitmap's left edge, `y` from the
    /// baseline up to its top row.
    pub bearing: Vec2,
    /// Horizontal advance in 1/64-pixel fixed point.
    pub advance: i32,
}

impl Glyph {
    /// A glyph with nothing to draw. `advance` still moves the pen, which
    /// is how blanks like the space character render.
    pub(crate) fn empty(advance: i32) -> Self {
        Self {
            texture: TextureId::default(),
            uv: Rect::default(),
            size: Vec2::zero(),
            bearing: Vec2::zero(),
            advance,
        }
    }

    /// True when there is no bitmap to draw.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }
}

/// Shelf-packing state for one pixel size.
struct SizeAtlas {
    texture: TextureId,
    cursor: (u32, u32),
    rasterizer: Box<dyn FontRasterizer>,
    glyphs: HashMap<char, Glyph>,
}

/// Packs a face's glyphs into per-size atlas textures on demand.
///
/// Each pixel size gets its own square atlas, filled left to right in
/// shelves one `font_size` tall. Bitmaps are rendered onto the atlas
/// through an offscreen pass, so the atlas lives in the registry like any
/// other texture and text batches by atlas rather than by glyph.
///
/// Packing failures degrade to empty glyphs and logged errors; callers
/// keep drawing either way.
pub struct Font {
    face: Box<dyn FontFace>,
    sizes: HashMap<u32, SizeAtlas>,
    pool: BatchPool,
    atlas_size: u32,
}

impl Font {
    /// `shader` is used for the atlas writes; `atlas_size` is the edge
    /// length of every atlas this font creates.
    pub fn new(face: Box<dyn FontFace>, shader: Rc<dyn Shader>, atlas_size: u32) -> Result<Self> {
        ensure!(atlas_size > 0, "glyph atlas size must be at least 1");
        // One batch of one quad: atlas writes happen a glyph at a time.
        let pool = BatchPool::create(1, 1, shader).context("creating the atlas write pool")?;
        Ok(Self { face, sizes: HashMap::new(), pool, atlas_size })
    }

    /// Looks up `ch` at `font_size`, rasterizing and packing it on first
    /// use. Repeated calls for a packed glyph are pure cache hits.
    ///
    /// Failures (unknown character, full atlas, device errors) return an
    /// empty glyph so text rendering degrades to gaps instead of failing.
    pub fn get_glyph(&mut self, ctx: &mut RenderCtx<'_>, ch: char, font_size: u32) -> Glyph {
        if font_size == 0 {
            log::warn!("Font: get_glyph() with a zero pixel size; returning an empty glyph");
            return Glyph::empty(0);
        }

        if !self.sizes.contains_key(&font_size) {
            let atlas = match Self::open_atlas(ctx, self.face.as_ref(), self.atlas_size, font_size)
            {
                Ok(atlas) => atlas,
                Err(err) => {
                    log::error!("Font: opening a size-{font_size} atlas failed: {err:#}");
                    return Glyph::empty(0);
                }
            };
            self.sizes.insert(font_size, atlas);
        }
        let Some(atlas) = self.sizes.get_mut(&font_size) else {
            return Glyph::empty(0);
        };

        if let Some(glyph) = atlas.glyphs.get(&ch) {
            return *glyph;
        }

        let Some(raster) = atlas.rasterizer.rasterize(ch) else {
            log::warn!("Font: face has no glyph for {ch:?}; caching an empty one");
            let glyph = Glyph::empty(0);
            atlas.glyphs.insert(ch, glyph);
            return glyph;
        };

        if raster.width == 0 || raster.height == 0 {
            let glyph = Glyph::empty(raster.advance);
            atlas.glyphs.insert(ch, glyph);
            return glyph;
        }

        if raster.width > self.atlas_size {
            log::error!(
                "Font: {ch:?} is wider than the size-{font_size} atlas ({} > {}); returning an empty glyph",
                raster.width,
                self.atlas_size
            );
            return Glyph::empty(raster.advance);
        }
        let mut cursor = atlas.cursor;
        if cursor.0 + raster.width > self.atlas_size {
            cursor = (0, cursor.1 + font_size);
        }
        if cursor.1 + font_size > self.atlas_size {
            // Not cached; a retry reports again and the cursor is untouched.
            log::error!("Font: size-{font_size} atlas is full; {ch:?} gets an empty glyph");
            return Glyph::empty(raster.advance);
        }

        if let Err(err) =
            blit_glyph(ctx, &mut self.pool, atlas.texture, self.atlas_size, cursor, &raster)
        {
            log::error!("Font: rendering {ch:?} into the atlas failed: {err:#}");
            return Glyph::empty(raster.advance);
        }

        let scale = self.atlas_size as f32;
        let glyph = Glyph {
            texture: atlas.texture,
            uv: Rect::new(
                cursor.0 as f32 / scale,
                cursor.1 as f32 / scale,
                raster.width as f32 / scale,
                raster.height as f32 / scale,
            ),
            size: Vec2::new(raster.width as f32, raster.height as f32),
            bearing: Vec2::new(raster.bearing_x as f32, raster.bearing_y as f32),
            advance: raster.advance,
        };
        atlas.cursor = (cursor.0 + raster.width, cursor.1);
        atlas.glyphs.insert(ch, glyph);
        glyph
    }

    /// Width and tallest-glyph height of `text` at `font_size`, in pixels.
    /// Packs any glyphs not seen before, exactly as drawing would.
    pub fn measure_string(&mut self, ctx: &mut RenderCtx<'_>, text: &str, font_size: u32) -> Vec2 {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for ch in text.chars() {
            let glyph = self.get_glyph(ctx, ch, font_size);
            width += (glyph.advance >> 6) as f32;
            height = height.max(glyph.size.y);
        }
        Vec2::new(width, height)
    }

    #[inline]
    #[must_use]
    pub fn atlas_size(&self) -> u32 {
        self.atlas_size
    }

    /// Atlas texture for `font_size`, if that size has been used.
    #[must_use]
    pub fn atlas_texture(&self, font_size: u32) -> Option<TextureId> {
        self.sizes.get(&font_size).map(|atlas| atlas.texture)
    }

    fn open_atlas(
        ctx: &mut RenderCtx<'_>,
        face: &dyn FontFace,
        atlas_size: u32,
        font_size: u32,
    ) -> Result<SizeAtlas> {
        let mut rasterizer = face.open().context("opening the font face")?;
        rasterizer.set_pixel_size(font_size);
        let texture = ctx
            .textures
            .create(ctx.device, atlas_size, atlas_size, None)
            .with_context(|| format!("creating a {atlas_size}x{atlas_size} glyph atlas"))?;
        Ok(SizeAtlas { texture, cursor: (0, 0), rasterizer, glyphs: HashMap::new() })
    }
}

/// Renders one glyph bitmap onto the atlas at `cursor` via a staging
/// texture and an offscreen pass over the atlas.
fn blit_glyph(
    ctx: &mut RenderCtx<'_>,
    pool: &mut BatchPool,
    atlas_texture: TextureId,
    atlas_size: u32,
    cursor: (u32, u32),
    raster: &RasterizedGlyph,
) -> Result<()> {
    let rgba = coverage_to_rgba(&raster.bitmap);
    let temp = ctx
        .textures
        .create(ctx.device, raster.width, raster.height, Some(&rgba))
        .context("creating the staging glyph texture")?;

    match ctx.textures.get(atlas_texture) {
        Some(atlas) => {
            let restore = (ctx.viewport.width as u32, ctx.viewport.height as u32);
            ctx.target.start(restore.0, restore.1, atlas);
        }
        None => {
            ctx.textures.remove(temp);
            bail!("atlas texture is gone from the registry");
        }
    }

    let edge = atlas_size as f32;
    pool.set_view_projection(Mat4::orthographic(0.0, edge, edge, 0.0, -1.0, 1.0));
    let staged = pool.draw(ctx, temp, Vec2::new(cursor.0 as f32, cursor.1 as f32), None, false);
    pool.flush(ctx);
    ctx.target.end();
    ctx.textures.remove(temp);

    ensure!(staged, "staging the glyph quad failed");
    Ok(())
}

/// Expands a coverage bitmap to tightly packed white RGBA8, coverage in
/// the alpha channel.
fn coverage_to_rgba(coverage: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(coverage.len() * 4);
    for &alpha in coverage {
        rgba.extend_from_slice(&[0xFF, 0xFF, 0xFF, alpha]);
    }
    rgba
}
