//! PCA decomposition command
//!
//! This module implements the command for decomposing a raster's bands
//! into principal components and writing the component planes out as a
//! band-sequential raster.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::errors::{BandError, BandResult};
use crate::pca;
use crate::storage::{self, BandFileSink};
use crate::table;
use crate::utils::logger::Logger;

/// Command for PCA decomposition of a raster's bands
pub struct DecomposeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output band-sequential file
    output_file: String,
    /// Dimension whose slices feed the PCA
    dimension: String,
    /// Number of principal components to keep
    components: usize,
    /// Optional CSV path for the component table
    table_output: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> DecomposeCommand<'a> {
    /// Create a new decompose command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new DecomposeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> BandResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| BandError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                BandError::GenericError("Missing output file path for decomposition".to_string())
            })?
            .clone();
        let dimension = args
            .get_one::<String>("dimension")
            .cloned()
            .unwrap_or_else(|| "band".to_string());
        let components = args
            .get_one::<String>("components")
            .map(|s| {
                s.parse::<usize>().map_err(|_| {
                    BandError::GenericError(format!("Invalid component count: {}", s))
                })
            })
            .transpose()?
            .unwrap_or(3);
        let table_output = args.get_one::<String>("table-output").cloned();

        Ok(DecomposeCommand {
            input_file,
            output_file,
            dimension,
            components,
            table_output,
            logger,
        })
    }
}

impl<'a> Command for DecomposeCommand<'a> {
    fn execute(&self) -> BandResult<()> {
        info!(
            "Decomposing {} into {} components",
            self.input_file, self.components
        );

        let array = storage::load_array(&self.input_file)?;
        let result = pca::decompose(&array, &self.dimension, self.components)?;

        if let Some(table_path) = &self.table_output {
            let data = table::stack(&result)?;
            table::write_csv(&data, &table::headers(&result), table_path)?;
        }

        let height = result.dims()[0].len() as u32;
        let width = result.dims()[1].len() as u32;
        let labels = table::headers(&result);

        let mut sink = BandFileSink::create(&self.output_file, width, height, labels)?;
        sink.write_all(&result)?;
        sink.finish()?;

        info!("Decomposition completed successfully");
        self.logger.log("Decomposition completed successfully")?;
        Ok(())
    }
}
