//! Integer pixel locations

use std::cmp::Ordering;
use std::fmt;

use crate::raster::Region;

/// Zero-based (column, row) position inside a raster
///
/// Locations order row-major: by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
}

impl Location {
    pub fn new(x: u32, y: u32) -> Self {
        Location { x, y }
    }

    /// Translate a region-local location into the coordinates of the
    /// raster the region was cut from
    pub fn offset_by(self, region: &Region) -> Self {
        Location {
            x: self.x + region.x,
            y: self.y + region.y,
        }
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Location {
    fn from((x, y): (u32, u32)) -> Self {
        Location { x, y }
    }
}
