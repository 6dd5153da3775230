//! Parallel region processor
//!
//! The partitioner owns the tiling policy and, optionally, a dedicated rayon
//! pool. Each region is handed to the callback exactly once together with
//! the shared source and a per-worker state built by the init factory.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::raster::Region;
use crate::scan::errors::{ScanError, ScanResult};

use super::policy::{self, PartitionPolicy};

/// Splits rectangles into regions and processes them concurrently
#[derive(Clone)]
pub struct RegionPartitioner {
    /// Tiling policy
    policy: PartitionPolicy,
    /// Dedicated pool, or `None` to run on rayon's global pool
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl RegionPartitioner {
    /// Create a partitioner that runs on the global rayon pool
    pub fn new(policy: PartitionPolicy) -> Self {
        RegionPartitioner { policy, pool: None }
    }

    /// Partitioner that never splits, so results come back in row-major order
    pub fn single() -> Self {
        Self::new(PartitionPolicy::Single)
    }

    /// Run regions on a dedicated pool of `threads` workers
    ///
    /// # Arguments
    /// * `threads` - Worker count; 0 lets rayon pick one per CPU
    ///
    /// # Returns
    /// The partitioner, or an error if the pool could not be built
    pub fn with_threads(mut self, threads: usize) -> ScanResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rasterscan-worker-{}", i))
            .build()
            .map_err(|e| ScanError::GenericError(format!("Failed to initialize thread pool: {}", e)))?;

        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn policy(&self) -> PartitionPolicy {
        self.policy
    }

    /// Maximum number of regions processed at the same time
    pub fn parallelism(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Regions covering a `width` x `height` rectangle under the current policy
    ///
    /// Every pixel is covered by exactly one region. An empty rectangle
    /// yields no regions.
    pub fn regions(&self, width: u32, height: u32) -> Vec<Region> {
        if width == 0 || height == 0 {
            return Vec::new();
        }

        match self.policy {
            PartitionPolicy::Single => vec![Region::full(width, height)],
            PartitionPolicy::Auto => policy::strips(width, height, self.parallelism() as u32),
            PartitionPolicy::Strips(count) => policy::strips(width, height, count),
            PartitionPolicy::Tiles { width: tile_width, height: tile_height } =>
                policy::tiles(width, height, tile_width, tile_height),
        }
    }

    /// Run `callback` once per region of a `width` x `height` rectangle
    ///
    /// Regions run concurrently. `init` builds the per-worker state passed to
    /// the callback. The first callback error aborts the run and is returned;
    /// results of regions that already finished are dropped.
    ///
    /// # Returns
    /// One `(region, result)` pair per region, in tiling order
    pub fn process<S, St, R, I, F>(
        &self,
        width: u32,
        height: u32,
        source: &S,
        init: I,
        callback: F,
    ) -> ScanResult<Vec<(Region, R)>>
    where
        S: Sync + ?Sized,
        R: Send,
        I: Fn() -> St + Sync + Send,
        F: Fn(&S, &mut St, Region) -> ScanResult<R> + Sync + Send,
    {
        let regions = self.regions(width, height);
        debug!("Processing {} regions ({} policy) with up to {} workers",
               regions.len(), self.policy.name(), self.parallelism());

        let run = || {
            regions
                .par_iter()
                .map_init(&init, |state, region| {
                    callback(source, state, *region).map(|result| (*region, result))
                })
                .collect::<ScanResult<Vec<_>>>()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

impl Default for RegionPartitioner {
    fn default() -> Self {
        Self::new(PartitionPolicy::Auto)
    }
}
