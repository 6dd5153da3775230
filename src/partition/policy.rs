//! Tiling policies

use crate::raster::Region;
use crate::scan::errors::{ScanError, ScanResult};

/// How a rectangle is split into regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// One horizontal strip per worker thread
    Auto,
    /// The whole rectangle as a single region
    Single,
    /// The given number of horizontal strips
    Strips(u32),
    /// Fixed-size tiles, clipped at the right and bottom edges
    Tiles { width: u32, height: u32 },
}

/// Tile edge used when the tiles policy is chosen without a size
pub const DEFAULT_TILE_SIZE: u32 = 256;

impl PartitionPolicy {
    /// Strip count used when the strips policy is chosen without a count:
    /// one strip per thread of the global rayon pool
    pub fn default_strip_count() -> u32 {
        rayon::current_num_threads() as u32
    }

    /// Parses a policy name ("auto", "single", "strips", "tiles")
    ///
    /// `strips` and the tile size only apply to the policies that use them.
    pub fn from_name(name: &str, strips: u32, tile_width: u32, tile_height: u32) -> ScanResult<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Ok(PartitionPolicy::Auto),
            "single" | "none" => Ok(PartitionPolicy::Single),
            "strips" | "rows" => Ok(PartitionPolicy::Strips(strips)),
            "tiles" => Ok(PartitionPolicy::Tiles { width: tile_width, height: tile_height }),
            _ => Err(ScanError::ConfigError(format!("Unknown partition policy: {}", name))),
        }
    }

    /// Returns a string representation of this policy
    pub fn name(&self) -> &'static str {
        match self {
            PartitionPolicy::Auto => "auto",
            PartitionPolicy::Single => "single",
            PartitionPolicy::Strips(_) => "strips",
            PartitionPolicy::Tiles { .. } => "tiles",
        }
    }
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        PartitionPolicy::Auto
    }
}

/// Split into `count` horizontal strips; the last strip takes the leftover rows
pub(crate) fn strips(width: u32, height: u32, count: u32) -> Vec<Region> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let count = count.clamp(1, height);
    let rows_per_strip = height / count;

    (0..count)
        .map(|i| {
            let y = i * rows_per_strip;
            let rows = if i == count - 1 { height - y } else { rows_per_strip };
            Region::new(0, y, width, rows)
        })
        .collect()
}

/// Split into tiles of at most `tile_width` x `tile_height`
pub(crate) fn tiles(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Vec<Region> {
    let tile_width = tile_width.max(1);
    let tile_height = tile_height.max(1);

    let mut regions = Vec::new();
    for y in (0..height).step_by(tile_height as usize) {
        for x in (0..width).step_by(tile_width as usize) {
            regions.push(Region::new(
                x,
                y,
                tile_width.min(width - x),
                tile_height.min(height - y),
            ));
        }
    }
    regions
}
