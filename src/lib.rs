pub mod errors;
pub mod array;
pub mod split;
pub mod storage;
pub mod stats;
pub mod table;
pub mod pca;
pub mod render;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::BandKit;

pub use array::{Attribute, Dimension, LabeledArray, SplitResult};
pub use config::ChunkingConfig;
pub use errors::{BandError, BandResult};
pub use split::{ChunkGrid, DimensionSplitter, Region, SplitPipeline};
