//! Tests for region partitioning and parallel dispatch

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::partition::{PartitionPolicy, RegionPartitioner};
use crate::raster::Region;
use crate::scan::ScanError;

/// Every pixel must be covered by exactly one region
fn assert_exact_cover(regions: &[Region], width: u32, height: u32) {
    let mut hits = vec![0u32; (width * height) as usize];
    for region in regions {
        assert!(region.fits_within(width, height), "{:?} leaves {}x{}", region, width, height);
        for y in region.y..region.end_y() {
            for x in region.x..region.end_x() {
                hits[(y * width + x) as usize] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&h| h == 1));
}

#[test]
fn test_single_policy() {
    let regions = RegionPartitioner::single().regions(7, 5);
    assert_eq!(regions, vec![Region::new(0, 0, 7, 5)]);
}

#[test]
fn test_strips_cover_with_remainder_in_last_strip() {
    let regions = RegionPartitioner::new(PartitionPolicy::Strips(3)).regions(4, 10);
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0], Region::new(0, 0, 4, 3));
    assert_eq!(regions[2], Region::new(0, 6, 4, 4));
    assert_exact_cover(&regions, 4, 10);
}

#[test]
fn test_strips_clamped_to_height() {
    let regions = RegionPartitioner::new(PartitionPolicy::Strips(50)).regions(3, 4);
    assert_eq!(regions.len(), 4);
    assert_exact_cover(&regions, 3, 4);
}

#[test]
fn test_tiles_clip_at_edges() {
    let regions = RegionPartitioner::new(PartitionPolicy::Tiles { width: 3, height: 2 }).regions(7, 5);
    assert_eq!(regions.len(), 9);
    assert!(regions.contains(&Region::new(6, 4, 1, 1)));
    assert_exact_cover(&regions, 7, 5);
}

#[test]
fn test_auto_policy_covers() {
    let partitioner = RegionPartitioner::default().with_threads(3).unwrap();
    let regions = partitioner.regions(9, 17);
    assert_eq!(regions.len(), 3);
    assert_exact_cover(&regions, 9, 17);
}

#[test]
fn test_empty_rectangle_has_no_regions() {
    let partitioner = RegionPartitioner::new(PartitionPolicy::Tiles { width: 2, height: 2 });
    assert!(partitioner.regions(0, 10).is_empty());
    assert!(partitioner.regions(10, 0).is_empty());
}

#[test]
fn test_process_calls_once_per_region() {
    let partitioner = RegionPartitioner::new(PartitionPolicy::Tiles { width: 4, height: 4 })
        .with_threads(4)
        .unwrap();
    let calls = AtomicUsize::new(0);
    let source = vec![1u8; 16 * 12];

    let results = partitioner
        .process(16, 12, &source, || (), |data: &Vec<u8>, _, region| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(data.len() as u64 + region.area())
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 12);
    assert_eq!(results.len(), 12);
    assert!(results.iter().all(|(region, value)| *value == 192 + region.area()));
}

#[test]
fn test_process_state_comes_from_init() {
    let partitioner = RegionPartitioner::new(PartitionPolicy::Strips(8)).with_threads(2).unwrap();
    let inits = AtomicUsize::new(0);
    let seen = Mutex::new(Vec::new());

    partitioner
        .process(
            1,
            8,
            &(),
            || {
                inits.fetch_add(1, Ordering::SeqCst);
                Vec::<Region>::new()
            },
            |_, state: &mut Vec<Region>, region| {
                state.push(region);
                seen.lock().unwrap().push(region);
                Ok(())
            },
        )
        .unwrap();

    assert!(inits.load(Ordering::SeqCst) >= 1);
    assert_eq!(seen.lock().unwrap().len(), 8);
}

#[test]
fn test_process_propagates_first_error() {
    let partitioner = RegionPartitioner::new(PartitionPolicy::Strips(4));

    let result = partitioner.process(4, 4, &(), || (), |_, _, region| {
        if region.y == 2 {
            Err(ScanError::RegionExtractionFailure(region, "boom".to_string()))
        } else {
            Ok(region.y)
        }
    });

    match result {
        Err(ScanError::RegionExtractionFailure(region, msg)) => {
            assert_eq!(region, Region::new(0, 2, 4, 1));
            assert_eq!(msg, "boom");
        },
        other => panic!("expected region failure, got {:?}", other),
    }
}

#[test]
fn test_policy_from_name() {
    assert_eq!(PartitionPolicy::from_name("Strips", 6, 1, 1).unwrap(), PartitionPolicy::Strips(6));
    assert_eq!(
        PartitionPolicy::from_name("tiles", 0, 32, 16).unwrap(),
        PartitionPolicy::Tiles { width: 32, height: 16 }
    );
    assert!(PartitionPolicy::from_name("hexagons", 1, 1, 1).is_err());
}
