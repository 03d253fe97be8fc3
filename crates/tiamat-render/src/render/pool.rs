use std::rc::Rc;

use anyhow::{Result, ensure};

use crate::coords::{Mat4, Rect, Vec2};
use crate::device::{Shader, TextureId, U_TEXTURE, U_VIEW_PROJECTION};
use crate::render::batch::QuadBatch;
use crate::render::ctx::RenderCtx;
use crate::text::Font;

/// Default quad capacity for batches the pool allocates.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// Per-frame counters, reset by the caller via
/// [`reset_stats`](BatchPool::reset_stats).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub quads_submitted: u64,
    pub draws_dropped: u64,
    pub draw_calls: u64,
}

/// Routes quads to a bounded set of [`QuadBatch`]es, allocating batches
/// lazily and grouping by texture and static mode.
///
/// Batches flush in allocation order, so overlap between quads routed to
/// different batches follows the order their batches were first assigned,
/// not the order the quads were submitted.
pub struct BatchPool {
    batches: Vec<QuadBatch>,
    max_batches: usize,
    batch_size: usize,
    shader: Rc<dyn Shader>,
    view_projection: Mat4,
    stats: PoolStats,
}

impl BatchPool {
    /// A pool that grows up to `max_batches` batches of `batch_size` quads.
    /// `max_batches == 0` is allowed and makes every draw drop.
    pub fn create(max_batches: usize, batch_size: usize, shader: Rc<dyn Shader>) -> Result<Self> {
        ensure!(batch_size > 0, "pool batch size must be at least 1");
        Ok(Self {
            batches: Vec::new(),
            max_batches,
            batch_size,
            shader,
            view_projection: Mat4::IDENTITY,
            stats: PoolStats::default(),
        })
    }

    pub fn set_view_projection(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
    }

    /// Submits one textured quad. `uv` selects a sub-rectangle of the
    /// texture (`None` draws all of it); the quad's pixel size is the UV
    /// extent scaled by the texture dimensions.
    ///
    /// Routing scans batches in allocation order and takes the first that
    /// is unbound, or bound to the same texture and mode with space left.
    /// With no candidate it allocates a new batch until `max_batches`,
    /// after which the quad is dropped with a logged error.
    pub fn draw(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        texture: TextureId,
        position: Vec2,
        uv: Option<Rect>,
        is_static: bool,
    ) -> bool {
        let Some((width, height)) = ctx.textures.dimensions(texture) else {
            self.stats.draws_dropped += 1;
            log::warn!("BatchPool: draw() with a texture not in the registry; quad dropped");
            return false;
        };
        let uv = uv.unwrap_or(FULL_UV);
        let size = Vec2::new(uv.size.x * width as f32, uv.size.y * height as f32);

        let slot = self.batches.iter().position(|batch| {
            batch.texture().is_none()
                || (batch.texture() == Some(texture)
                    && batch.is_static() == is_static
                    && batch.has_space())
        });
        let slot = match slot {
            Some(index) => index,
            None if self.batches.len() < self.max_batches => {
                let batch = QuadBatch::create(
                    ctx.device,
                    self.batch_size,
                    Rc::clone(&self.shader),
                    is_static,
                );
                match batch {
                    Ok(batch) => {
                        self.batches.push(batch);
                        self.batches.len() - 1
                    }
                    Err(err) => {
                        self.stats.draws_dropped += 1;
                        log::error!("BatchPool: batch allocation failed: {err:#}; quad dropped");
                        return false;
                    }
                }
            }
            None => {
                self.stats.draws_dropped += 1;
                log::error!(
                    "BatchPool: no compatible batch and the pool is at capacity ({}); quad dropped",
                    self.max_batches
                );
                return false;
            }
        };

        let batch = &mut self.batches[slot];
        if batch.texture().is_none() {
            batch.set_static(is_static);
            batch.set_texture(ctx.textures, texture);
        }
        if batch.add(position, size, uv) {
            self.stats.quads_submitted += 1;
            true
        } else {
            self.stats.draws_dropped += 1;
            false
        }
    }

    /// Draws `text` with `position.y` as the baseline, walking a pen
    /// left-to-right. Each glyph is placed at the pen offset by its
    /// bearing, then the pen advances by the glyph's advance converted
    /// from 1/64-pixel units to whole pixels.
    ///
    /// Glyphs with no bitmap (spaces, packer failures) draw nothing but
    /// still advance the pen.
    pub fn draw_string(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        font: &mut Font,
        text: &str,
        position: Vec2,
        font_size: u32,
        is_static: bool,
    ) {
        let mut pen_x = position.x;
        for ch in text.chars() {
            let glyph = font.get_glyph(ctx, ch, font_size);
            if !glyph.is_empty() {
                let corner = Vec2::new(pen_x + glyph.bearing.x, position.y - glyph.bearing.y);
                self.draw(ctx, glyph.texture, corner, Some(glyph.uv), is_static);
            }
            pen_x += (glyph.advance >> 6) as f32;
        }
    }

    /// Binds the shader, uploads the view-projection and sampler uniforms,
    /// then flushes every batch in allocation order.
    pub fn flush(&mut self, ctx: &mut RenderCtx<'_>) {
        self.shader.bind();
        self.shader.set_mat4(U_VIEW_PROJECTION, &self.view_projection);
        self.shader.set_int(U_TEXTURE, 0);
        for batch in &mut self.batches {
            if batch.flush(ctx.textures) > 0 {
                self.stats.draw_calls += 1;
            }
        }
    }

    /// Clears every batch, static ones included. Allocated batches are
    /// kept for reuse.
    pub fn clear(&mut self) {
        for batch in &mut self.batches {
            batch.clear();
        }
    }

    #[inline]
    #[must_use]
    pub fn batches(&self) -> &[QuadBatch] {
        &self.batches
    }

    #[inline]
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    #[inline]
    #[must_use]
    pub fn max_batches(&self) -> usize {
        self.max_batches
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = PoolStats::default();
    }
}
