use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use bandkit::commands::{BandkitCommandFactory, CommandFactory};
use bandkit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("BandKit")
        .version("0.1")
        .about("Analyze and decompose multi-band rasters")
        .arg(
            Arg::new("input")
                .help("Input raster file (TIFF or band-sequential .bsq)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("split")
                .short('s')
                .long("split")
                .help("Split the stacked dimension into per-band planes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompose")
                .short('d')
                .long("decompose")
                .help("Decompose bands into principal components")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("render")
                .short('r')
                .long("render")
                .help("Render an RGB composite image")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .help("Export a pixels-by-bands CSV table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("dimension")
                .long("dimension")
                .help("Dimension to operate on")
                .value_name("NAME")
                .default_value("band")
                .required(false),
        )
        .arg(
            Arg::new("components")
                .long("components")
                .help("Number of principal components to keep")
                .value_name("N")
                .default_value("3")
                .required(false),
        )
        .arg(
            Arg::new("table-output")
                .long("table-output")
                .help("Also write the decomposition table to this CSV file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("channels")
                .long("channels")
                .help("Channel mapping for rendering (r=<band>,g=<band>,b=<band>)")
                .value_name("MAPPING")
                .required(false),
        )
        .arg(
            Arg::new("breaks")
                .long("breaks")
                .help("Scale breaks for rendering as 'low,high' (default: min/max stretch)")
                .value_name("LOW,HIGH")
                .required(false),
        )
        .arg(
            Arg::new("memory-budget")
                .long("memory-budget")
                .help("Memory budget for one in-flight chunk (e.g. 256M)")
                .value_name("SIZE")
                .required(false),
        )
        .arg(
            Arg::new("chunk-rows")
                .long("chunk-rows")
                .help("Explicit chunk height in rows, overriding the memory budget")
                .value_name("ROWS")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file for the chunking policy")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let log_file = "bandkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("bandkit-global.log", verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = BandkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
