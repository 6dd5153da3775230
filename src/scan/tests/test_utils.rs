use std::collections::HashSet;

use crate::partition::{PartitionPolicy, RegionPartitioner};
use crate::raster::RasterBuffer;
use crate::scan::ScanOutput;

/// 4x3 f32 raster: 5.0 at (2, 0) and -3.5 at (0, 2)
pub fn sparse_float_raster() -> RasterBuffer {
    let mut values = vec![0.0f32; 12];
    values[2] = 5.0;
    values[8] = -3.5;
    RasterBuffer::from_elements(4, 3, &values).unwrap()
}

/// Deterministic pseudo-random i16 raster with roughly a third of the cells set
pub fn patterned_raster(width: u32, height: u32) -> RasterBuffer {
    let values: Vec<i16> = (0..width * height)
        .map(|i| {
            let h = i.wrapping_mul(2654435761) >> 7;
            if h % 3 == 0 { (h % 2000) as i16 - 1000 } else { 0 }
        })
        .collect();
    RasterBuffer::from_elements(width, height, &values).unwrap()
}

/// Samples as a set of (x, y, value bits) so float values compare exactly
pub fn sample_set(output: &ScanOutput) -> HashSet<(u32, u32, u64)> {
    output
        .samples_f64()
        .map(|(loc, v)| (loc.x, loc.y, v.to_bits()))
        .collect()
}

/// Partitioners from a single region down to one region per row and tiny tiles
pub fn partitioners() -> Vec<RegionPartitioner> {
    vec![
        RegionPartitioner::single(),
        RegionPartitioner::new(PartitionPolicy::Strips(2)),
        RegionPartitioner::new(PartitionPolicy::Strips(1000)),
        RegionPartitioner::new(PartitionPolicy::Tiles { width: 1, height: 1 }),
        RegionPartitioner::new(PartitionPolicy::Tiles { width: 3, height: 2 }),
        RegionPartitioner::default().with_threads(4).unwrap(),
    ]
}
