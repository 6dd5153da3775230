//! Parallel non-zero scanning
//!
//! This module holds the scan engine and the pieces it is built from: the
//! element type registry, per-type extraction routines, the merge step and
//! the output collections.

pub mod errors;
mod location;
pub(crate) mod values;
mod routine;
mod registry;
mod merge;
mod cancel;
mod output;
mod engine;
#[cfg(test)]
mod tests;

pub use errors::{ScanError, ScanResult};
pub use location::Location;
pub use values::ElementValues;
pub use routine::{ExtractionRoutine, NonZeroRoutine, RegionSamples};
pub use registry::{builtin_registry, ExtractionRegistry};
pub use merge::merge_region_samples;
pub use cancel::CancellationToken;
pub use output::ScanOutput;
pub use engine::ScanEngine;
