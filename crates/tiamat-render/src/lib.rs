//! Tiamat render core: quad batching and dynamic texture packing.
//!
//! The crate groups textured-quad draw requests into a bounded set of
//! reusable batches so many sprites and glyphs flush as few draw calls, and
//! shelf-packs rasterized glyphs into per-size atlas textures so text draws
//! through the same batching path. GPU buffers, textures, shaders and font
//! rasterization are reached through the trait seams in [`device`] and
//! [`text`]; this crate owns no device, window or event loop.

pub mod logging;
pub mod coords;
pub mod device;
pub mod render;
pub mod atlas;
pub mod text;
