//! Chunk sources and sinks backing the split pipeline
//!
//! A source hands out strips of a band-stacked raster, a sink accepts the
//! per-attribute strips the splitter produces. In-memory implementations
//! cover small rasters and tests; the band-sequential file implementations
//! provide the out-of-core path where only one strip is resident at a time.

mod band_file;
mod memory;
pub mod raster;

use std::path::Path;

use crate::array::{Dimension, LabeledArray, SplitResult};
use crate::errors::{BandError, BandResult};
use crate::split::Region;

pub use band_file::{BandFileSink, BandFileSource};
pub use memory::{MemorySink, MemorySource};

/// Source of chunks for the split pipeline
///
/// A source exposes a band-stacked raster: dimensions in
/// [stack, rows, cols] order, where the stack axis is the dimension the
/// pipeline removes. `read_chunk` returns the full stack restricted to
/// the requested region of the row/col plane.
pub trait ChunkSource {
    /// Dimension metadata in [stack, rows, cols] order
    fn dims(&self) -> &[Dimension];

    /// Read all stack values for one region of the plane
    fn read_chunk(&mut self, region: Region) -> BandResult<LabeledArray>;
}

/// Sink receiving per-attribute chunks from the split pipeline
///
/// Regions written through one run of the pipeline are disjoint, so a
/// sink never has to merge overlapping writes.
pub trait ChunkSink {
    /// Write one region's worth of every attribute
    fn write_chunk(&mut self, region: Region, chunk: &SplitResult) -> BandResult<()>;
}

/// Load a raster file into a fully materialized labeled array
///
/// Dispatches on the file extension: TIFF rasters are decoded with the
/// tiff crate, band-sequential files are read through their own reader.
pub fn load_array(path: &str) -> BandResult<LabeledArray> {
    match extension_of(path).as_deref() {
        Some("tif") | Some("tiff") => raster::read_bands(path),
        Some("bsq") => BandFileSource::open(path)?.read_all(),
        _ => Err(BandError::GenericError(format!(
            "Unrecognized raster extension: {}",
            path
        ))),
    }
}

/// Open a raster file as a chunk source
///
/// Band-sequential files stream strips straight from disk; TIFF inputs
/// are materialized first, since the decoder yields whole bands.
pub fn open_source(path: &str) -> BandResult<Box<dyn ChunkSource>> {
    match extension_of(path).as_deref() {
        Some("tif") | Some("tiff") => {
            let array = raster::read_bands(path)?;
            Ok(Box::new(MemorySource::new(array, "band")?))
        }
        Some("bsq") => Ok(Box::new(BandFileSource::open(path)?)),
        _ => Err(BandError::GenericError(format!(
            "Unrecognized raster extension: {}",
            path
        ))),
    }
}

fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
