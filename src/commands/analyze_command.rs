//! Raster analysis command
//!
//! This module implements the default command: load a raster, report its
//! dimensions and coordinates, and print per-band summary statistics and
//! the band correlation matrix.

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::errors::{BandError, BandResult};
use crate::stats;
use crate::storage;
use crate::utils::logger::Logger;

/// Command for analyzing a multi-band raster
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Dimension summarized per slice
    dimension: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> BandResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| BandError::GenericError("Missing input file".to_string()))?
            .clone();
        let dimension = args
            .get_one::<String>("dimension")
            .cloned()
            .unwrap_or_else(|| "band".to_string());
        let verbose = args.get_flag("verbose");

        Ok(AnalyzeCommand {
            input_file,
            dimension,
            verbose,
            logger,
        })
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> BandResult<()> {
        info!("Analyzing file: {}", self.input_file);

        if self.verbose {
            debug!("Verbose mode enabled");
        }

        let array = storage::load_array(&self.input_file)?;

        info!("Raster Analysis Results:");
        info!("  Dimensions: {}", array.dims().len());
        for dim in array.dims() {
            info!("  {}: {} positions", dim.name, dim.len());
        }
        info!("  Total cells: {}", array.total_cells());

        let summaries = stats::summarize(&array, &self.dimension)?;
        info!("\nPer-{} summary:", self.dimension);
        for summary in &summaries {
            info!(
                "  {}: min={:.4} max={:.4} mean={:.4} std={:.4}",
                summary.band, summary.min, summary.max, summary.mean, summary.std_dev
            );
        }

        let matrix = stats::correlation_matrix(&array, &self.dimension)?;
        info!("\nCorrelation matrix:");
        for (i, summary) in summaries.iter().enumerate() {
            let row: Vec<String> = (0..summaries.len())
                .map(|j| format!("{:+.3}", matrix[[i, j]]))
                .collect();
            info!("  {}: {}", summary.band, row.join(" "));
        }

        debug!("Analysis completed successfully");
        self.logger.log("Analysis completed successfully")?;

        Ok(())
    }
}
