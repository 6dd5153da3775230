//! Single raster scan command
//!
//! This module implements the command that scans one image or raw raster
//! file for non-zero samples and writes or prints the result.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{config_from_args, parse_arg, parse_range};
use crate::io::byte_order::ByteOrder;
use crate::io::raw::{read_raw, RawRasterSpec};
use crate::raster::{ElementType, RasterBuffer};
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::ScanEngine;
use crate::utils::config::ScanConfig;
use crate::utils::logger::Logger;

/// Command for scanning one raster file
pub struct ScanCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file, `None` to print a summary
    output_file: Option<String>,
    /// Geometry when the input is a headerless raw file
    raw_spec: Option<RawRasterSpec>,
    /// Keep only values inside this range
    filter: Option<(f64, f64)>,
    /// Sort samples row-major before writing
    sort: bool,
    /// Partitioning and output settings
    config: ScanConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ScanCommand<'a> {
    /// Create a new scan command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ScanCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ScanResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| ScanError::GenericError("Missing input file".to_string()))?
            .clone();
        info!("Input file: {}", input_file);

        let output_file = args.get_one::<String>("output").cloned();

        let raw_spec = if args.get_flag("raw") {
            Some(raw_spec_from_args(args)?)
        } else {
            None
        };
        info!("Raw geometry: {:?}", raw_spec);

        let filter = match args.get_one::<String>("filter") {
            Some(range) => Some(parse_range(range)?),
            None => None,
        };

        Ok(ScanCommand {
            input_file,
            output_file,
            raw_spec,
            filter,
            sort: args.get_flag("sort"),
            config: config_from_args(args)?,
            logger,
        })
    }

    fn load_raster(&self) -> ScanResult<RasterBuffer> {
        match &self.raw_spec {
            Some(spec) => read_raw(&self.input_file, spec),
            None => RasterBuffer::load_image(&self.input_file),
        }
    }
}

impl<'a> Command for ScanCommand<'a> {
    fn execute(&self) -> ScanResult<()> {
        let raster = self.load_raster()?;
        let engine = ScanEngine::new().with_partitioner(self.config.build_partitioner()?);

        let mut output = engine.scan(&raster.view())?;
        if let Some((min, max)) = self.filter {
            info!("Keeping values in [{}, {}]", min, max);
            output.retain_in_range(min, max);
        }
        if self.sort {
            output.sort_row_major();
        }

        self.logger.log_scan_output(&self.input_file, &output, 20)?;

        match &self.output_file {
            Some(path) => {
                output.save_to_file(path, &self.config.output_format)?;
                println!("{}: {} written to {}", self.input_file, output.summary(), path);
            },
            None => println!("{}: {}", self.input_file, output.summary()),
        }

        Ok(())
    }
}

fn raw_spec_from_args(args: &ArgMatches) -> ScanResult<RawRasterSpec> {
    let width = parse_arg::<u32>(args, "width")?
        .ok_or_else(|| ScanError::GenericError("--raw requires --width".to_string()))?;
    let height = parse_arg::<u32>(args, "height")?
        .ok_or_else(|| ScanError::GenericError("--raw requires --height".to_string()))?;
    let element_type = match args.get_one::<String>("type") {
        Some(name) => ElementType::parse(name)?,
        None => return Err(ScanError::GenericError("--raw requires --type".to_string())),
    };

    let mut spec = RawRasterSpec::new(width, height, element_type);
    if let Some(order) = args.get_one::<String>("byte-order") {
        spec.byte_order = ByteOrder::parse(order)?;
    }
    spec.stride = parse_arg::<usize>(args, "stride")?;
    spec.header_len = parse_arg::<u64>(args, "header")?.unwrap_or(0);

    Ok(spec)
}
