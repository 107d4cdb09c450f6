//! Chunked split/write loop for out-of-core arrays
//!
//! The pipeline iterates disjoint row strips of the x/y plane, reads one
//! strip across every value of the removed dimension, splits it in memory
//! and writes each attribute's strip to the sink at the matching region.
//! Strips are processed top to bottom; because output regions never
//! overlap, the order has no effect on the final result. Processing is
//! sequential; a parallel variant would only have to preserve the
//! disjoint-region invariant to remain safe without locks.
//!
//! On a failed read or write the loop stops with the failing region in
//! the error and leaves partially written output as-is. The caller decides
//! whether to re-run or clean up.

use log::{debug, info};

use crate::array::Dimension;
use crate::errors::{BandError, BandResult};
use crate::storage::{ChunkSink, ChunkSource};
use crate::utils::progress::ProgressTracker;

use super::chunk::ChunkGrid;
use super::splitter::DimensionSplitter;

/// Default memory budget for one in-flight strip: 256 MiB
pub const DEFAULT_MEMORY_BUDGET: u64 = 256 * 1024 * 1024;

/// Drives the chunked split loop between a source and a sink
pub struct SplitPipeline {
    /// Explicit strip height override, in rows
    chunk_rows: Option<u32>,
    /// Memory budget used to derive the strip height when no override is set
    memory_budget: u64,
}

impl SplitPipeline {
    /// Create a pipeline with the default memory budget
    pub fn new() -> Self {
        SplitPipeline {
            chunk_rows: None,
            memory_budget: DEFAULT_MEMORY_BUDGET,
        }
    }

    /// Set an explicit strip height in rows
    pub fn with_chunk_rows(mut self, rows: u32) -> Self {
        self.chunk_rows = Some(rows);
        self
    }

    /// Set the memory budget in bytes used to derive the strip height
    pub fn with_memory_budget(mut self, bytes: u64) -> Self {
        self.memory_budget = bytes;
        self
    }

    /// Check that a source's dimensions fit the chunked loop
    ///
    /// Callers that pre-size an output file should run this before the
    /// sink exists: a rejected dimension name must not leave an output
    /// file behind.
    pub fn validate_source(dims: &[Dimension], dimension_name: &str) -> BandResult<()> {
        if !dims.iter().any(|d| d.name == dimension_name) {
            return Err(BandError::InvalidDimension(dimension_name.to_string()));
        }
        if dims.len() != 3 || dims[0].name != dimension_name {
            return Err(BandError::GenericError(format!(
                "Chunked split requires a source stacked along '{}' over a 2-D plane",
                dimension_name
            )));
        }
        Ok(())
    }

    /// Run the chunked split loop
    ///
    /// # Arguments
    /// * `source` - Chunk source, stacked along the dimension to remove
    /// * `sink` - Chunk sink receiving one strip per attribute per chunk
    /// * `dimension_name` - Name of the dimension to remove
    ///
    /// # Returns
    /// Result indicating success, or the first chunk failure with its region
    pub fn run(
        &self,
        source: &mut dyn ChunkSource,
        sink: &mut dyn ChunkSink,
        dimension_name: &str,
    ) -> BandResult<()> {
        let dims = source.dims().to_vec();
        SplitPipeline::validate_source(&dims, dimension_name)?;

        let depth = dims[0].len() as u32;
        let height = dims[1].len() as u32;
        let width = dims[2].len() as u32;

        let grid = match self.chunk_rows {
            Some(rows) => ChunkGrid::strips(width, height, rows),
            None => ChunkGrid::with_budget(width, height, depth, self.memory_budget),
        };

        info!(
            "Chunked split of '{}': {} values over {}x{} plane in {} strips",
            dimension_name,
            depth,
            width,
            height,
            grid.len()
        );

        let progress = ProgressTracker::new(grid.len() as u64, "Splitting chunks");

        for region in grid.iter() {
            debug!("Processing {}", region);

            let chunk = source.read_chunk(region).map_err(|e| BandError::ChunkRead {
                region,
                detail: e.to_string(),
            })?;

            let result = DimensionSplitter::split(&chunk, dimension_name)?;

            sink.write_chunk(region, &result)
                .map_err(|e| BandError::ChunkWrite {
                    region,
                    detail: e.to_string(),
                })?;

            progress.increment(1);
        }

        progress.finish();
        info!("Chunked split of '{}' completed", dimension_name);
        Ok(())
    }
}

impl Default for SplitPipeline {
    fn default() -> Self {
        SplitPipeline::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Dimension, LabeledArray, SplitResult};
    use crate::split::Region;
    use crate::storage::{MemorySink, MemorySource};

    /// Source that starts failing after a fixed number of reads
    struct FlakySource {
        inner: MemorySource,
        reads_left: u32,
    }

    impl ChunkSource for FlakySource {
        fn dims(&self) -> &[Dimension] {
            self.inner.dims()
        }

        fn read_chunk(&mut self, region: Region) -> BandResult<LabeledArray> {
            if self.reads_left == 0 {
                return Err(BandError::GenericError(
                    "simulated read failure".to_string(),
                ));
            }
            self.reads_left -= 1;
            self.inner.read_chunk(region)
        }
    }

    /// Sink that refuses every write
    struct RejectingSink;

    impl ChunkSink for RejectingSink {
        fn write_chunk(&mut self, _region: Region, _chunk: &SplitResult) -> BandResult<()> {
            Err(BandError::GenericError(
                "simulated write failure".to_string(),
            ))
        }
    }

    fn stacked_array(bands: usize, height: usize, width: usize) -> LabeledArray {
        let dims = vec![
            Dimension::new("band", (1..=bands).map(|b| b.to_string()).collect()),
            Dimension::indexed("y", height),
            Dimension::indexed("x", width),
        ];
        let values: Vec<f64> = (0..bands * height * width).map(|v| v as f64).collect();
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_chunked_matches_whole_array_split() {
        let array = stacked_array(3, 7, 5);
        let whole = DimensionSplitter::split(&array, "band").unwrap();

        // Strip heights that do and do not divide the plane evenly
        for rows in [1, 2, 3, 7, 10] {
            let mut source = MemorySource::new(array.clone(), "band").unwrap();
            let mut sink = MemorySink::new(
                array.dims()[1..].to_vec(),
                array.dims()[0].coords.clone(),
            );

            SplitPipeline::new()
                .with_chunk_rows(rows)
                .run(&mut source, &mut sink, "band")
                .unwrap();

            assert_eq!(sink.into_result(), whole);
        }
    }

    #[test]
    fn test_budget_driven_grid() {
        let array = stacked_array(2, 6, 4);
        let mut source = MemorySource::new(array.clone(), "band").unwrap();
        let mut sink = MemorySink::new(
            array.dims()[1..].to_vec(),
            array.dims()[0].coords.clone(),
        );

        // Budget for exactly two rows across both bands
        SplitPipeline::new()
            .with_memory_budget(2 * 4 * 2 * 8)
            .run(&mut source, &mut sink, "band")
            .unwrap();

        let whole = DimensionSplitter::split(&array, "band").unwrap();
        assert_eq!(sink.into_result(), whole);
    }

    #[test]
    fn test_read_failure_carries_region_and_keeps_earlier_strips() {
        let array = stacked_array(2, 4, 3);
        let whole = DimensionSplitter::split(&array, "band").unwrap();

        let mut source = FlakySource {
            inner: MemorySource::new(array.clone(), "band").unwrap(),
            reads_left: 1,
        };
        let mut sink = MemorySink::new(
            array.dims()[1..].to_vec(),
            array.dims()[0].coords.clone(),
        );

        let err = SplitPipeline::new()
            .with_chunk_rows(2)
            .run(&mut source, &mut sink, "band")
            .unwrap_err();
        match err {
            BandError::ChunkRead { region, .. } => {
                assert_eq!(region, Region::new(0, 2, 3, 2));
            }
            other => panic!("expected ChunkRead, got {:?}", other),
        }

        // The strip processed before the failure stays written, the rest
        // is untouched
        let partial = sink.into_result();
        for (got, want) in partial.attributes().iter().zip(whole.attributes()) {
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(got.values[[y, x]], want.values[[y, x]]);
                }
            }
            for x in 0..3 {
                assert_eq!(got.values[[2, x]], 0.0);
                assert_eq!(got.values[[3, x]], 0.0);
            }
        }
    }

    #[test]
    fn test_write_failure_carries_region() {
        let array = stacked_array(2, 4, 3);
        let mut source = MemorySource::new(array, "band").unwrap();
        let mut sink = RejectingSink;

        let err = SplitPipeline::new()
            .with_chunk_rows(4)
            .run(&mut source, &mut sink, "band")
            .unwrap_err();
        match err {
            BandError::ChunkWrite { region, .. } => {
                assert_eq!(region, Region::new(0, 0, 3, 4));
            }
            other => panic!("expected ChunkWrite, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_dimension_reported_before_io() {
        let array = stacked_array(2, 4, 4);
        let mut source = MemorySource::new(array.clone(), "band").unwrap();
        let mut sink = MemorySink::new(
            array.dims()[1..].to_vec(),
            array.dims()[0].coords.clone(),
        );

        let err = SplitPipeline::new()
            .run(&mut source, &mut sink, "time")
            .unwrap_err();
        assert!(matches!(err, BandError::InvalidDimension(_)));
    }
}
