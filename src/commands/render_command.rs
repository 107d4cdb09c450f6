//! Composite rendering command
//!
//! This module implements the command for rendering three bands of a
//! raster into an RGB composite image file.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::{BandError, BandResult};
use crate::render::{self, RenderConfig};
use crate::storage;
use crate::utils::logger::Logger;
use crate::utils::parse_utils;

/// Command for rendering an RGB composite
pub struct RenderCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output image
    output_file: String,
    /// Dimension holding the bands
    dimension: String,
    /// Channel mapping and scale breaks
    config: RenderConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> RenderCommand<'a> {
    /// Create a new render command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new RenderCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> BandResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| BandError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                BandError::GenericError("Missing output file path for render".to_string())
            })?
            .clone();
        let dimension = args
            .get_one::<String>("dimension")
            .cloned()
            .unwrap_or_else(|| "band".to_string());

        let channels = args
            .get_one::<String>("channels")
            .ok_or_else(|| {
                BandError::GenericError("Missing --channels mapping for render".to_string())
            })?;
        let (red, green, blue) = parse_utils::parse_channel_mapping(channels)?;

        let breaks = args
            .get_one::<String>("breaks")
            .map(|s| parse_utils::parse_breaks(s))
            .transpose()?;

        info!(
            "Render command: {} -> {} with channels {}/{}/{}",
            input_file, output_file, red, green, blue
        );

        Ok(RenderCommand {
            input_file,
            output_file,
            dimension,
            config: RenderConfig { red, green, blue, breaks },
            logger,
        })
    }
}

impl<'a> Command for RenderCommand<'a> {
    fn execute(&self) -> BandResult<()> {
        let array = storage::load_array(&self.input_file)?;
        render::compose_to_file(&array, &self.dimension, &self.config, &self.output_file)?;

        info!("Render completed successfully");
        self.logger.log("Render completed successfully")?;
        Ok(())
    }
}
