/// What a GPU buffer stores.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Primitive topology for an indexed draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Primitive {
    Points,
    Lines,
    Triangles,
}

/// One GPU-side buffer.
///
/// A batch binds a buffer before touching it and unbinds it afterwards;
/// implementations may treat those as no-ops on APIs without bind state.
pub trait GpuBuffer {
    fn bind(&self);
    fn unbind(&self);

    /// Writes `data` starting `offset` bytes into the buffer.
    fn upload(&mut self, offset: usize, data: &[u8]);

    /// Issues a draw of `count` indices with the current bindings.
    /// Meaningful on [`BufferKind::Index`] buffers.
    fn draw_indexed(&self, count: usize, primitive: Primitive);
}
