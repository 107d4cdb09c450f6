//! Dimension split command
//!
//! This module implements the command for splitting a raster's stacked
//! dimension into per-band planes through the chunked pipeline, writing
//! the result to a band-sequential file.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::chunking_from_args;
use crate::config::ChunkingConfig;
use crate::errors::{BandError, BandResult};
use crate::split::SplitPipeline;
use crate::storage::{self, BandFileSink};
use crate::utils::logger::Logger;

/// Command for splitting a dimension into per-attribute planes
pub struct SplitCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output band-sequential file
    output_file: String,
    /// Dimension to remove
    dimension: String,
    /// Chunk-size policy
    chunking: ChunkingConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> SplitCommand<'a> {
    /// Create a new split command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new SplitCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> BandResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| BandError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                BandError::GenericError("Missing output file path for split".to_string())
            })?
            .clone();
        let dimension = args
            .get_one::<String>("dimension")
            .cloned()
            .unwrap_or_else(|| "band".to_string());
        let chunking = chunking_from_args(args)?;

        info!(
            "Split command: {} -> {} (dimension '{}', budget {} bytes, rows {:?})",
            input_file, output_file, dimension, chunking.memory_budget, chunking.chunk_rows
        );

        Ok(SplitCommand {
            input_file,
            output_file,
            dimension,
            chunking,
            logger,
        })
    }
}

impl<'a> Command for SplitCommand<'a> {
    fn execute(&self) -> BandResult<()> {
        info!(
            "Splitting '{}' of {} into {}",
            self.dimension, self.input_file, self.output_file
        );

        let mut source = storage::open_source(&self.input_file)?;

        let dims = source.dims().to_vec();
        SplitPipeline::validate_source(&dims, &self.dimension)?;
        let labels = dims[0].coords.clone();
        let height = dims[1].len() as u32;
        let width = dims[2].len() as u32;

        let mut sink = BandFileSink::create(&self.output_file, width, height, labels)?;

        let mut pipeline = SplitPipeline::new().with_memory_budget(self.chunking.memory_budget);
        if let Some(rows) = self.chunking.chunk_rows {
            pipeline = pipeline.with_chunk_rows(rows);
        }
        pipeline.run(source.as_mut(), &mut sink, &self.dimension)?;
        sink.finish()?;

        info!("Split completed successfully");
        self.logger.log("Split completed successfully")?;
        Ok(())
    }
}
