pub mod io;
pub mod raster;
pub mod partition;
pub mod scan;
pub mod source;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{FrameScan, RasterScan};

pub use raster::{Element, ElementType, RasterBuffer, RasterView, Region};
pub use partition::{PartitionPolicy, RegionPartitioner};
pub use scan::{ScanEngine, ScanError, ScanOutput, ScanResult, Location};
pub use source::{DirectoryFrameSource, FileOrder, FrameEvent, SeekOrigin};
