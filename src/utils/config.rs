//! Scan configuration from TOML
//!
//! Every key is optional; a missing key keeps its default. Values of the
//! wrong type or out of range are reported as `ConfigError`.
//!
//! ```toml
//! [partition]
//! policy = "tiles"      # auto | single | strips | tiles
//! strips = 8           # omit for one strip per CPU
//! tile_width = 256
//! tile_height = 256
//! threads = 4           # 0 = one per CPU, omit for the global pool
//!
//! [source]
//! extension = "png"
//! natural_sort = true
//! frame_delay_ms = 1
//!
//! [output]
//! format = "csv"        # csv | json
//! ```

use std::fs;
use std::time::Duration;

use log::debug;

use crate::partition::{PartitionPolicy, RegionPartitioner, DEFAULT_TILE_SIZE};
use crate::scan::errors::{ScanError, ScanResult};
use crate::source::FileOrder;

/// Settings shared by the library facade and the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Region tiling
    pub partition: PartitionPolicy,
    /// Dedicated worker count, `None` for rayon's global pool
    pub threads: Option<usize>,
    /// Frame file extension for directory playback
    pub extension: String,
    /// Natural sort of frame file names
    pub natural_sort: bool,
    /// Delay between playback ticks
    pub frame_delay: Duration,
    /// Output format for saved results
    pub output_format: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            partition: PartitionPolicy::Auto,
            threads: None,
            extension: "png".to_string(),
            natural_sort: true,
            frame_delay: Duration::from_millis(1),
            output_format: "csv".to_string(),
        }
    }
}

impl ScanConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> ScanResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ScanError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let mut config = ScanConfig::default();

        if let Some(table) = toml_value.get("partition") {
            let policy_name = get_str(table, "partition", "policy")?.unwrap_or("auto");
            let strips = get_u32(table, "partition", "strips")?
                .unwrap_or_else(PartitionPolicy::default_strip_count);
            let tile_width = get_u32(table, "partition", "tile_width")?.unwrap_or(DEFAULT_TILE_SIZE);
            let tile_height = get_u32(table, "partition", "tile_height")?.unwrap_or(DEFAULT_TILE_SIZE);

            let policy = PartitionPolicy::from_name(policy_name, strips, tile_width, tile_height)?;
            if let PartitionPolicy::Strips(0) = policy {
                return Err(ScanError::ConfigError("partition.strips must be at least 1".to_string()));
            }
            if let PartitionPolicy::Tiles { width: 0, .. } | PartitionPolicy::Tiles { height: 0, .. } = policy {
                return Err(ScanError::ConfigError("partition tile size must be at least 1x1".to_string()));
            }
            config.partition = policy;
            config.threads = get_u32(table, "partition", "threads")?.map(|t| t as usize);
        }

        if let Some(table) = toml_value.get("source") {
            if let Some(extension) = get_str(table, "source", "extension")? {
                config.extension = extension.to_string();
            }
            if let Some(natural) = get_bool(table, "source", "natural_sort")? {
                config.natural_sort = natural;
            }
            if let Some(delay) = get_u32(table, "source", "frame_delay_ms")? {
                config.frame_delay = Duration::from_millis(delay as u64);
            }
        }

        if let Some(table) = toml_value.get("output") {
            if let Some(format) = get_str(table, "output", "format")? {
                match format.to_lowercase().as_str() {
                    "csv" | "json" => config.output_format = format.to_lowercase(),
                    _ => return Err(ScanError::ConfigError(format!("Unsupported output format: {}", format))),
                }
            }
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> ScanResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(ScanError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    /// Partitioner for the configured policy and worker count
    pub fn build_partitioner(&self) -> ScanResult<RegionPartitioner> {
        let partitioner = RegionPartitioner::new(self.partition);
        match self.threads {
            Some(threads) => partitioner.with_threads(threads),
            None => Ok(partitioner),
        }
    }

    pub fn file_order(&self) -> FileOrder {
        if self.natural_sort {
            FileOrder::Natural
        } else {
            FileOrder::Enumeration
        }
    }
}

fn get_str<'v>(table: &'v toml::Value, section: &str, key: &str) -> ScanResult<Option<&'v str>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            ScanError::ConfigError(format!("{}.{} must be a string", section, key))
        }),
    }
}

fn get_bool(table: &toml::Value, section: &str, key: &str) -> ScanResult<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or_else(|| {
            ScanError::ConfigError(format!("{}.{} must be a boolean", section, key))
        }),
    }
}

fn get_u32(table: &toml::Value, section: &str, key: &str) -> ScanResult<Option<u32>> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_integer()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                ScanError::ConfigError(format!("{}.{} must be a non-negative integer", section, key))
            }),
    }
}
