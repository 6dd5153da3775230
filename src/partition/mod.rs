//! Region partitioning and parallel dispatch
//!
//! Splits a raster rectangle into non-overlapping regions and runs a
//! callback over each region on a rayon worker pool.

mod policy;
mod partitioner;
#[cfg(test)]
mod tests;

pub use policy::{PartitionPolicy, DEFAULT_TILE_SIZE};
pub use partitioner::RegionPartitioner;
