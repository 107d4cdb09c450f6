//! Custom error types for band processing

use std::fmt;
use std::io;

use crate::split::chunk::Region;

/// Band-processing error types
#[derive(Debug)]
pub enum BandError {
    /// I/O error
    IoError(io::Error),
    /// Requested split dimension does not exist on the array
    InvalidDimension(String),
    /// Array shape disagrees with its dimension metadata
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// Reading a chunk from the source failed
    ChunkRead { region: Region, detail: String },
    /// Writing a chunk to the sink failed
    ChunkWrite { region: Region, detail: String },
    /// Malformed file header or configuration
    InvalidFormat(String),
    /// Pixel sample format the raster reader cannot widen to f64
    UnsupportedSampleFormat,
    /// PCA fitting or transformation failed
    PcaError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for BandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandError::IoError(e) => write!(f, "I/O error: {}", e),
            BandError::InvalidDimension(name) => write!(f, "No such dimension: {}", name),
            BandError::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected {:?}, got {:?}", expected, actual)
            }
            BandError::ChunkRead { region, detail } => {
                write!(f, "Chunk read failed at {}: {}", region, detail)
            }
            BandError::ChunkWrite { region, detail } => {
                write!(f, "Chunk write failed at {}: {}", region, detail)
            }
            BandError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            BandError::UnsupportedSampleFormat => write!(f, "Unsupported pixel sample format"),
            BandError::PcaError(msg) => write!(f, "PCA error: {}", msg),
            BandError::GenericError(msg) => write!(f, "Band error: {}", msg),
        }
    }
}

impl std::error::Error for BandError {}

impl From<io::Error> for BandError {
    fn from(error: io::Error) -> Self {
        BandError::IoError(error)
    }
}

impl From<String> for BandError {
    fn from(msg: String) -> Self {
        BandError::GenericError(msg)
    }
}

impl From<ndarray::ShapeError> for BandError {
    fn from(error: ndarray::ShapeError) -> Self {
        BandError::GenericError(format!("Array shape error: {}", error))
    }
}

impl From<tiff::TiffError> for BandError {
    fn from(error: tiff::TiffError) -> Self {
        BandError::InvalidFormat(format!("TIFF decoding error: {}", error))
    }
}

impl From<csv::Error> for BandError {
    fn from(error: csv::Error) -> Self {
        BandError::GenericError(format!("CSV error: {}", error))
    }
}

/// Result type for band operations
pub type BandResult<T> = Result<T, BandError>;
