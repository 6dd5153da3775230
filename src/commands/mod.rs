//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod scan_command;
pub mod play_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use scan_command::ScanCommand;
pub use play_command::PlayCommand;

use std::time::Duration;

use clap::ArgMatches;
use log::info;

use crate::utils::config::ScanConfig;
use crate::utils::logger::Logger;
use crate::partition::{PartitionPolicy, DEFAULT_TILE_SIZE};
use crate::scan::errors::{ScanError, ScanResult};

/// Factory for creating command instances based on CLI arguments
pub struct RasterscanCommandFactory;

impl RasterscanCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RasterscanCommandFactory
    }
}

impl Default for RasterscanCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for RasterscanCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ScanResult<Box<dyn Command + 'a>> {
        if args.get_flag("directory") {
            Ok(Box::new(PlayCommand::new(args, logger)?))
        } else {
            Ok(Box::new(ScanCommand::new(args, logger)?))
        }
    }
}

/// Build the configuration from `--config` and apply command line overrides
pub(crate) fn config_from_args(args: &ArgMatches) -> ScanResult<ScanConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => {
            info!("Loading configuration from {}", path);
            ScanConfig::from_file(path)?
        },
        None => ScanConfig::default(),
    };

    if let Some(policy) = args.get_one::<String>("policy") {
        let strips = match parse_arg::<u32>(args, "strips")? {
            Some(0) => return Err(ScanError::ConfigError("--strips must be at least 1".to_string())),
            Some(count) => count,
            None => PartitionPolicy::default_strip_count(),
        };
        let (tile_width, tile_height) = match args.get_one::<String>("tile") {
            Some(tile) => parse_tile(tile)?,
            None => (DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE),
        };
        config.partition = PartitionPolicy::from_name(policy, strips, tile_width, tile_height)?;
    }

    if let Some(threads) = parse_arg::<usize>(args, "threads")? {
        config.threads = Some(threads);
    }
    if let Some(extension) = args.get_one::<String>("extension") {
        config.extension = extension.clone();
    }
    if args.get_flag("no-natural-sort") {
        config.natural_sort = false;
    }
    if let Some(delay) = parse_arg::<u64>(args, "frame-delay")? {
        config.frame_delay = Duration::from_millis(delay);
    }
    if let Some(format) = args.get_one::<String>("format") {
        config.output_format = format.to_lowercase();
    }

    Ok(config)
}

/// Parse an optional string argument into a number
pub(crate) fn parse_arg<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> ScanResult<Option<T>> {
    match args.get_one::<String>(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ScanError::GenericError(format!("Invalid value for --{}: {}", name, value))),
        None => Ok(None),
    }
}

/// Parse a "min,max" value filter
pub(crate) fn parse_range(range: &str) -> ScanResult<(f64, f64)> {
    let parts: Vec<&str> = range.split(',').map(|s| s.trim()).collect();
    if parts.len() != 2 {
        return Err(ScanError::GenericError(format!("Filter must be 'min,max', got '{}'", range)));
    }

    let min = parts[0].parse::<f64>()
        .map_err(|_| ScanError::GenericError(format!("Invalid filter minimum: {}", parts[0])))?;
    let max = parts[1].parse::<f64>()
        .map_err(|_| ScanError::GenericError(format!("Invalid filter maximum: {}", parts[1])))?;
    if min > max {
        return Err(ScanError::GenericError(format!("Filter minimum {} exceeds maximum {}", min, max)));
    }

    Ok((min, max))
}

fn parse_tile(tile: &str) -> ScanResult<(u32, u32)> {
    let (width, height) = tile
        .split_once(|c: char| c == 'x' || c == 'X' || c == ',')
        .ok_or_else(|| ScanError::GenericError(format!("Tile size must be 'WxH', got '{}'", tile)))?;

    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| ScanError::GenericError(format!("Invalid tile dimension: {}", s)))
    };

    Ok((parse(width)?, parse(height)?))
}
