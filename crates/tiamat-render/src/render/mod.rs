//! Quad batching.
//!
//! [`QuadBatch`] accumulates quads sharing one texture and flushes them as
//! a single draw call; [`BatchPool`] routes draw requests across a bounded
//! set of batches and drives flush order.
//!
//! Convention: batches flush in allocation order and quads draw in add
//! order; both orders carry visual overlap semantics.

mod batch;
mod ctx;
mod pool;

pub use batch::{QUAD_INDEX_COUNT, QUAD_VERTEX_COUNT, QuadBatch};
pub use ctx::RenderCtx;
pub use pool::{BatchPool, DEFAULT_BATCH_SIZE, PoolStats};
