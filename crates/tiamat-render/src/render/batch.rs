use std::rc::Rc;

use anyhow::{Context, Result, ensure};

use crate::coords::{Rect, Vec2};
use crate::device::{
    BufferKind, GpuBuffer, GpuDevice, Primitive, Shader, TextureId, TextureRegistry,
};

/// Vertices per quad.
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Indices per quad (two triangles).
pub const QUAD_INDEX_COUNT: usize = 6;

/// Index pattern for one quad's two triangles, repeated per slot with a
/// vertex offset at creation time.
const QUAD_INDEX_TEMPLATE: [u32; QUAD_INDEX_COUNT] = [0, 1, 2, 2, 3, 0];

/// Fixed-capacity accumulator of textured quads, flushed as one draw call.
///
/// A batch is bound to at most one texture and one `is_static` mode at a
/// time; rebinding while geometry is staged flushes first, so two textures'
/// quads never share a draw call. Dynamic batches empty on flush, static
/// ones keep their geometry until [`clear`](QuadBatch::clear).
pub struct QuadBatch {
    capacity: usize,
    len: usize,
    texture: Option<TextureId>,
    is_static: bool,
    positions: Vec<Vec2>,
    uvs: Vec<Vec2>,
    position_buffer: Box<dyn GpuBuffer>,
    uv_buffer: Box<dyn GpuBuffer>,
    index_buffer: Box<dyn GpuBuffer>,
    shader: Rc<dyn Shader>,
}

impl QuadBatch {
    /// Allocates GPU buffers sized for `capacity` quads. The index buffer
    /// is filled up front from the fixed template and never changes.
    pub fn create(
        device: &dyn GpuDevice,
        capacity: usize,
        shader: Rc<dyn Shader>,
        is_static: bool,
    ) -> Result<Self> {
        ensure!(capacity > 0, "quad batch capacity must be at least 1");

        let vertex_bytes = capacity * QUAD_VERTEX_COUNT * std::mem::size_of::<Vec2>();
        let position_buffer = device
            .create_buffer(BufferKind::Vertex, vertex_bytes, None)
            .context("creating quad position buffer")?;
        let uv_buffer = device
            .create_buffer(BufferKind::Vertex, vertex_bytes, None)
            .context("creating quad UV buffer")?;

        let indices: Vec<u32> = (0..capacity)
            .flat_map(|quad| {
                let base = (quad * QUAD_VERTEX_COUNT) as u32;
                QUAD_INDEX_TEMPLATE.map(|i| base + i)
            })
            .collect();
        let index_buffer = device
            .create_buffer(
                BufferKind::Index,
                indices.len() * std::mem::size_of::<u32>(),
                Some(bytemuck::cast_slice(&indices)),
            )
            .context("creating quad index buffer")?;

        Ok(Self {
            capacity,
            len: 0,
            texture: None,
            is_static,
            positions: Vec::with_capacity(capacity * QUAD_VERTEX_COUNT),
            uvs: Vec::with_capacity(capacity * QUAD_VERTEX_COUNT),
            position_buffer,
            uv_buffer,
            index_buffer,
            shader,
        })
    }

    /// Stages one quad at `position` spanning `size`, textured with `uv`.
    ///
    /// Corners go in winding order origin, below, diagonal, right, matching
    /// the index template. Returns `false` (and logs) when no texture is
    /// bound or the batch is full; the batch is untouched in both cases.
    pub fn add(&mut self, position: Vec2, size: Vec2, uv: Rect) -> bool {
        if self.texture.is_none() {
            log::warn!("QuadBatch: add() with no texture bound; quad dropped");
            return false;
        }
        if self.len == self.capacity {
            log::warn!(
                "QuadBatch: add() on a full batch (capacity {}); quad dropped",
                self.capacity
            );
            return false;
        }

        let min = uv.min();
        let max = uv.max();

        self.positions.push(position);
        self.positions.push(Vec2::new(position.x, position.y + size.y));
        self.positions.push(Vec2::new(position.x + size.x, position.y + size.y));
        self.positions.push(Vec2::new(position.x + size.x, position.y));

        self.uvs.push(min);
        self.uvs.push(Vec2::new(min.x, max.y));
        self.uvs.push(max);
        self.uvs.push(Vec2::new(max.x, min.y));

        self.len += 1;
        true
    }

    /// Binds `texture` for subsequent quads. When geometry for a previous
    /// texture is staged it is flushed and cleared first, so one draw call
    /// never mixes textures.
    pub fn set_texture(&mut self, textures: &TextureRegistry, texture: TextureId) {
        if self.texture.is_some() && !self.is_empty() {
            self.flush(textures);
            self.clear();
        }
        self.texture = Some(texture);
    }

    /// Draws every staged quad in one indexed call and returns the number
    /// of indices drawn. Dynamic batches clear afterwards; static batches
    /// keep their geometry and redraw it on the next flush.
    ///
    /// A texture id that no longer resolves drops the geometry with a
    /// logged error; there is nothing valid to draw it with.
    pub fn flush(&mut self, textures: &TextureRegistry) -> usize {
        if self.len == 0 {
            return 0;
        }
        let Some(id) = self.texture else {
            return 0;
        };
        let Some(texture) = textures.get(id) else {
            log::error!(
                "QuadBatch: flush() found its texture gone from the registry; {} quads dropped",
                self.len
            );
            self.clear();
            return 0;
        };

        self.shader.bind();
        texture.bind();

        self.position_buffer.bind();
        self.position_buffer.upload(0, bytemuck::cast_slice(&self.positions));
        self.position_buffer.unbind();

        self.uv_buffer.bind();
        self.uv_buffer.upload(0, bytemuck::cast_slice(&self.uvs));
        self.uv_buffer.unbind();

        let index_count = self.len * QUAD_INDEX_COUNT;
        self.index_buffer.bind();
        self.index_buffer.draw_indexed(index_count, Primitive::Triangles);
        self.index_buffer.unbind();

        if !self.is_static {
            self.clear();
        }
        index_count
    }

    /// Drops staged geometry and releases the texture, making the batch
    /// assignable again.
    pub fn clear(&mut self) {
        self.len = 0;
        self.positions.clear();
        self.uvs.clear();
        self.texture = None;
    }

    #[inline]
    #[must_use]
    pub fn has_space(&self) -> bool {
        self.len < self.capacity
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    #[must_use]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Quads currently staged.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retargets an empty batch between static and dynamic duty. The flag
    /// is per-binding state, so a non-empty batch refuses the change.
    pub(crate) fn set_static(&mut self, is_static: bool) {
        if !self.is_empty() {
            log::warn!("QuadBatch: static flag change on a non-empty batch ignored");
            return;
        }
        self.is_static = is_static;
    }

    #[cfg(test)]
    pub(crate) fn staged_positions(&self) -> &[Vec2] {
        &self.positions
    }

    #[cfg(test)]
    pub(crate) fn staged_uvs(&self) -> &[Vec2] {
        &self.uvs
    }
}
