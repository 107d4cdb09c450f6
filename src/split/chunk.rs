//! Chunk regions for out-of-core processing
//!
//! This module defines the Region structure that specifies a rectangular
//! area of the x/y plane, and the ChunkGrid that partitions the plane into
//! disjoint row strips for the chunked split loop. Coordinates follow the
//! usual image convention where (0,0) is the top-left corner.

/// Rectangular region of the x/y plane (in pixel coordinates)
///
/// Represents an area defined by its top-left corner and dimensions.
/// During chunked processing every region read from the source is written
/// to the same location in the output, so regions double as write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Get the rightmost X coordinate (exclusive)
    ///
    /// Useful for boundary checks in chunk loops.
    pub fn end_x(&self) -> u32 {
        self.x + self.width
    }

    /// Get the bottommost Y coordinate (exclusive)
    pub fn end_y(&self) -> u32 {
        self.y + self.height
    }

    /// Number of pixels covered by the region
    pub fn cells(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "region x={} y={} width={} height={}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Partition of the x/y plane into full-width row strips
///
/// Strips are emitted top to bottom, so chunk order is deterministic and
/// matches the row-major storage layout of the backing file. The strips
/// never overlap and together cover the plane exactly, which is what makes
/// the chunked write loop safe without any cross-chunk coordination.
#[derive(Debug, Clone)]
pub struct ChunkGrid {
    width: u32,
    height: u32,
    rows_per_chunk: u32,
}

impl ChunkGrid {
    /// Create a grid of row strips over a width x height plane
    ///
    /// `rows_per_chunk` is clamped to at least one row.
    pub fn strips(width: u32, height: u32, rows_per_chunk: u32) -> Self {
        ChunkGrid {
            width,
            height,
            rows_per_chunk: rows_per_chunk.max(1),
        }
    }

    /// Derive a strip height from a memory budget in bytes
    ///
    /// The budget covers one strip across every value of the removed
    /// dimension, held as f64. A budget too small for a single row still
    /// yields one row per strip; out-of-core mode cannot go finer than
    /// a row without giving up contiguous reads.
    pub fn with_budget(width: u32, height: u32, depth: u32, budget_bytes: u64) -> Self {
        let row_bytes = width as u64 * depth as u64 * std::mem::size_of::<f64>() as u64;
        let rows = if row_bytes == 0 {
            height as u64
        } else {
            budget_bytes / row_bytes
        };
        ChunkGrid::strips(width, height, rows.min(height as u64).max(1) as u32)
    }

    /// Number of strips in the grid
    pub fn len(&self) -> u32 {
        if self.height == 0 {
            0
        } else {
            (self.height + self.rows_per_chunk - 1) / self.rows_per_chunk
        }
    }

    /// Whether the grid covers an empty plane
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the strips top to bottom
    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        let rows = self.rows_per_chunk;
        (0..self.len()).map(move |i| {
            let y = i * rows;
            let height = rows.min(self.height - y);
            Region::new(0, y, self.width, height)
        })
    }
}
