//! Command line definition
//!
//! The argument set shared by the binary and the command tests.

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the `rasterscan` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("RasterScan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find non-zero samples in rasters, in parallel")
        .arg(
            Arg::new("input")
                .help("Input image, raw raster, or frame directory")
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
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Hide the progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file instead of stderr")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file for samples (or per-frame counts with --directory)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Format for sample output (csv, json)")
                .value_name("FORMAT")
                .required(false),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("Write samples in row-major order")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .help("Keep only values in the specified range (e.g., '15,160')")
                .value_name("MIN,MAX")
                .required(false),
        )
        .arg(
            Arg::new("policy")
                .long("policy")
                .help("Partition policy (auto, single, strips, tiles)")
                .value_name("POLICY")
                .required(false),
        )
        .arg(
            Arg::new("strips")
                .long("strips")
                .help("Number of strips for the strips policy")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("tile")
                .long("tile")
                .help("Tile size for the tiles policy")
                .value_name("WxH")
                .required(false),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .help("Worker threads (0 = one per CPU)")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Treat the input as a headerless raw raster")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Raw raster width in elements")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Raw raster height in rows")
                .value_name("PIXELS")
                .required(false),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .help("Raw element type (u8, i8, u16, i16, u32, i32, f32, f64)")
                .value_name("TYPE")
                .required(false),
        )
        .arg(
            Arg::new("byte-order")
                .long("byte-order")
                .help("Raw byte order (le, be, native)")
                .value_name("ORDER")
                .required(false),
        )
        .arg(
            Arg::new("stride")
                .long("stride")
                .help("Raw bytes per row, if rows are padded")
                .value_name("BYTES")
                .required(false),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .help("Raw header bytes to skip")
                .value_name("BYTES")
                .required(false),
        )
        .arg(
            Arg::new("directory")
                .short('d')
                .long("directory")
                .help("Play the input directory as frames and scan each one")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .help("Frame file extension")
                .value_name("EXT")
                .required(false),
        )
        .arg(
            Arg::new("no-natural-sort")
                .long("no-natural-sort")
                .help("Keep directory enumeration order instead of natural sort")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("frame-delay")
                .long("frame-delay")
                .help("Milliseconds between frames")
                .value_name("MS")
                .required(false),
        )
}
