//! Single-threaded merge of per-region results
//!
//! Regions return their samples in region-local coordinates. The merge step
//! translates every location by its region's origin and appends the region's
//! locations and values together, so a batch is never split or interleaved.

use log::debug;

use crate::raster::{ElementType, Region};
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::output::ScanOutput;

use super::routine::RegionSamples;

/// Merge region batches into one output, in the order given
///
/// # Arguments
/// * `element_type` - Element type every batch must hold
/// * `batches` - Region and its region-local samples
///
/// # Returns
/// The merged output, or `RegionExtractionFailure` if a batch has a
/// different number of locations and values or the wrong value type
pub fn merge_region_samples<I>(element_type: ElementType, batches: I) -> ScanResult<ScanOutput>
where
    I: IntoIterator<Item = (Region, RegionSamples)>,
{
    let mut output = ScanOutput::empty(element_type);

    for (region, samples) in batches {
        if samples.locations.len() != samples.values.len() {
            return Err(ScanError::RegionExtractionFailure(region, format!(
                "{} locations but {} values", samples.locations.len(), samples.values.len()
            )));
        }

        let count = samples.locations.len();
        output.values
            .append(samples.values)
            .map_err(|e| ScanError::RegionExtractionFailure(region, e.to_string()))?;
        output.locations.extend(samples.locations.into_iter().map(|loc| loc.offset_by(&region)));

        debug!("Merged {} samples from region ({},{} {}x{})",
               count, region.x, region.y, region.width, region.height);
    }

    Ok(output)
}
