//! Table export command
//!
//! This module implements the command for reshaping a raster into a
//! pixels-by-bands table and writing it to CSV.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::{BandError, BandResult};
use crate::split::DimensionSplitter;
use crate::storage;
use crate::table;
use crate::utils::logger::Logger;

/// Command for exporting a raster as a CSV table
pub struct TableCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output CSV file
    output_file: String,
    /// Dimension pivoted into columns
    dimension: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> TableCommand<'a> {
    /// Create a new table command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new TableCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> BandResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| BandError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                BandError::GenericError("Missing output file path for table export".to_string())
            })?
            .clone();
        let dimension = args
            .get_one::<String>("dimension")
            .cloned()
            .unwrap_or_else(|| "band".to_string());

        Ok(TableCommand {
            input_file,
            output_file,
            dimension,
            logger,
        })
    }
}

impl<'a> Command for TableCommand<'a> {
    fn execute(&self) -> BandResult<()> {
        info!(
            "Exporting {} as a table to {}",
            self.input_file, self.output_file
        );

        let array = storage::load_array(&self.input_file)?;
        let split = DimensionSplitter::split(&array, &self.dimension)?;
        let data = table::stack(&split)?;
        table::write_csv(&data, &table::headers(&split), &self.output_file)?;

        info!("Table export completed successfully");
        self.logger.log("Table export completed successfully")?;
        Ok(())
    }
}
