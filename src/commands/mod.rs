//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod split_command;
pub mod decompose_command;
pub mod render_command;
pub mod table_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use split_command::SplitCommand;
pub use decompose_command::DecomposeCommand;
pub use render_command::RenderCommand;
pub use table_command::TableCommand;

use clap::ArgMatches;

use crate::config::ChunkingConfig;
use crate::errors::{BandError, BandResult};
use crate::utils::logger::Logger;
use crate::utils::parse_utils;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct BandkitCommandFactory;

impl BandkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        BandkitCommandFactory
    }
}

impl Default for BandkitCommandFactory {
    fn default() -> Self {
        BandkitCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for BandkitCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> BandResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("split") {
            Ok(Box::new(SplitCommand::new(args, logger)?))
        } else if args.get_flag("decompose") {
            Ok(Box::new(DecomposeCommand::new(args, logger)?))
        } else if args.get_flag("render") {
            Ok(Box::new(RenderCommand::new(args, logger)?))
        } else if args.get_flag("table") {
            Ok(Box::new(TableCommand::new(args, logger)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}

/// Resolve the chunking policy from config file and CLI overrides
///
/// Order of precedence: built-in defaults, then the --config file,
/// then explicit --memory-budget and --chunk-rows flags.
pub(crate) fn chunking_from_args(args: &ArgMatches) -> BandResult<ChunkingConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => ChunkingConfig::from_file(path)?,
        None => ChunkingConfig::default(),
    };

    if let Some(budget) = args.get_one::<String>("memory-budget") {
        config.memory_budget = parse_utils::parse_memory_size(budget)?;
    }
    if let Some(rows) = args.get_one::<String>("chunk-rows") {
        let rows = rows
            .parse::<u32>()
            .map_err(|_| BandError::GenericError(format!("Invalid chunk rows: {}", rows)))?;
        if rows == 0 {
            return Err(BandError::GenericError(
                "Chunk rows must be at least 1".to_string(),
            ));
        }
        config.chunk_rows = Some(rows);
    }

    Ok(config)
}
