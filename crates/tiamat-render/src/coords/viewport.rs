/// On-screen viewport size in pixels.
///
/// Carried in the render context so an offscreen pass knows which
/// dimensions to restore when it ends.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
