//! Parallel scan engine
//!
//! The engine resolves the raster's element type once, fans the extraction
//! routine out over the partitioner's regions and merges the region batches
//! into a single output.

use log::{debug, info};

use crate::raster::{Element, RasterView, Region};
use crate::partition::RegionPartitioner;
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::location::Location;
use crate::scan::output::ScanOutput;

use super::cancel::CancellationToken;
use super::merge::merge_region_samples;
use super::registry::{builtin_registry, ExtractionRegistry};

/// Finds non-zero samples of a raster in parallel
#[derive(Clone)]
pub struct ScanEngine<'r> {
    /// Routines by element type
    registry: &'r ExtractionRegistry,
    /// Region tiling and worker pool
    partitioner: RegionPartitioner,
    /// Optional cooperative cancellation
    cancellation: Option<CancellationToken>,
}

impl ScanEngine<'static> {
    /// Engine over the built-in registry with the default partitioner
    pub fn new() -> Self {
        Self::with_registry(builtin_registry())
    }
}

impl Default for ScanEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ScanEngine<'r> {
    /// Engine over a custom registry
    pub fn with_registry(registry: &'r ExtractionRegistry) -> Self {
        ScanEngine {
            registry,
            partitioner: RegionPartitioner::default(),
            cancellation: None,
        }
    }

    /// Replace the partitioner
    pub fn with_partitioner(mut self, partitioner: RegionPartitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Observe a cancellation token between regions
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn partitioner(&self) -> &RegionPartitioner {
        &self.partitioner
    }

    pub fn registry(&self) -> &'r ExtractionRegistry {
        self.registry
    }

    /// Scan a raster for non-zero elements
    ///
    /// The element type is resolved before any region is scheduled, so an
    /// unsupported type fails without touching the worker pool. Order between
    /// regions follows the partitioner's tiling; within a region it is
    /// row-major.
    ///
    /// # Arguments
    /// * `view` - Raster to scan
    ///
    /// # Returns
    /// Raster-global locations with their values, or the first error raised
    /// by any region
    pub fn scan(&self, view: &RasterView<'_>) -> ScanResult<ScanOutput> {
        let element_type = view.element_type();
        let routine = self.registry.lookup(element_type)?;

        info!("Scanning {}x{} {} raster (stride {}) with {} routine",
              view.width(), view.height(), element_type, view.stride(), routine.name());

        let cancellation = self.cancellation.as_ref();
        let batches = self.partitioner.process(
            view.width(),
            view.height(),
            view,
            || (),
            |source, _, region| {
                if cancellation.map_or(false, CancellationToken::is_cancelled) {
                    debug!("Skipping region ({},{} {}x{}) after cancellation",
                           region.x, region.y, region.width, region.height);
                    return Ok(None);
                }

                let sub_view = source.sub_view(region).map_err(|e| region_failure(region, e))?;
                let samples = routine.extract(&sub_view).map_err(|e| region_failure(region, e))?;
                debug!("Region ({},{} {}x{}) yielded {} samples",
                       region.x, region.y, region.width, region.height, samples.len());
                Ok(Some(samples))
            },
        )?;

        let region_count = batches.len();
        let complete = batches.iter().all(|(_, samples)| samples.is_some());
        let mut output = merge_region_samples(
            element_type,
            batches.into_iter().filter_map(|(region, samples)| samples.map(|s| (region, s))),
        )?;
        output.complete = complete;

        info!("Found {} non-zero samples in {} regions{}",
              output.len(), region_count, if complete { "" } else { " (cancelled)" });
        Ok(output)
    }

    /// Scan and unwrap the values as `T`
    ///
    /// # Returns
    /// `ElementTypeMismatch` if the raster does not hold `T` elements
    pub fn find_non_zero<T: Element>(&self, view: &RasterView<'_>) -> ScanResult<(Vec<Location>, Vec<T>)> {
        if view.element_type() != T::ELEMENT_TYPE {
            return Err(ScanError::ElementTypeMismatch {
                expected: view.element_type(),
                actual: T::ELEMENT_TYPE,
            });
        }

        self.scan(view)?.into_typed::<T>()
    }

    /// Locations only, discarding the values
    pub fn find_non_zero_locations(&self, view: &RasterView<'_>) -> ScanResult<Vec<Location>> {
        Ok(self.scan(view)?.locations)
    }
}

fn region_failure(region: Region, error: ScanError) -> ScanError {
    match error {
        ScanError::RegionExtractionFailure(..) => error,
        other => ScanError::RegionExtractionFailure(region, other.to_string()),
    }
}
