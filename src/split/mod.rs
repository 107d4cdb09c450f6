//! Dimension splitting and the chunked processing loop
//!
//! This module holds the in-memory dimension splitter, the chunk grid
//! that partitions the x/y plane into row strips, and the pipeline that
//! drives the out-of-core split/write loop.

pub mod chunk;
mod pipeline;
mod splitter;

pub use chunk::{ChunkGrid, Region};
pub use pipeline::{SplitPipeline, DEFAULT_MEMORY_BUDGET};
pub use splitter::DimensionSplitter;
