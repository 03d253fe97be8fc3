//! Coordinate and geometry types shared across the batching core.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left, +X right, +Y down
//! - UV space is the same orientation normalized to 0..1
//!
//! The vertex shader converts pixel positions to clip space with the
//! view-projection matrix uploaded at flush time.

mod matrix;
mod rect;
mod vec2;
mod viewport;

pub use matrix::Mat4;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
