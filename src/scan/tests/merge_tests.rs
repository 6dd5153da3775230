use crate::raster::{ElementType, Region};
use crate::scan::{merge_region_samples, ElementValues, Location, RegionSamples, ScanError};

fn samples(locations: &[(u32, u32)], values: Vec<u16>) -> RegionSamples {
    RegionSamples {
        locations: locations.iter().copied().map(Location::from).collect(),
        values: ElementValues::U16(values),
    }
}

#[test]
fn test_merge_translates_and_keeps_batches_contiguous() {
    let batches = vec![
        (Region::new(0, 0, 4, 2), samples(&[(1, 0), (3, 1)], vec![10, 11])),
        (Region::new(0, 2, 4, 2), samples(&[], vec![])),
        (Region::new(4, 2, 4, 2), samples(&[(0, 0), (2, 1)], vec![20, 21])),
    ];

    let output = merge_region_samples(ElementType::U16, batches).unwrap();
    assert_eq!(
        output.locations,
        vec![Location::new(1, 0), Location::new(3, 1), Location::new(4, 2), Location::new(6, 3)]
    );
    assert_eq!(output.values, ElementValues::U16(vec![10, 11, 20, 21]));
    assert!(output.complete);
}

#[test]
fn test_merge_rejects_mismatched_counts() {
    let region = Region::new(2, 2, 2, 2);
    let batches = vec![(region, samples(&[(0, 0), (1, 1)], vec![5]))];

    match merge_region_samples(ElementType::U16, batches) {
        Err(ScanError::RegionExtractionFailure(failed, msg)) => {
            assert_eq!(failed, region);
            assert!(msg.contains("2 locations but 1 values"));
        },
        other => panic!("expected region failure, got {:?}", other),
    }
}

#[test]
fn test_merge_rejects_wrong_value_type() {
    let region = Region::new(0, 0, 1, 1);
    let batches = vec![(region, samples(&[(0, 0)], vec![1]))];

    let result = merge_region_samples(ElementType::F32, batches);
    assert!(matches!(result, Err(ScanError::RegionExtractionFailure(r, _)) if r == region));
}

#[test]
fn test_merge_of_nothing() {
    let output = merge_region_samples(ElementType::I8, Vec::new()).unwrap();
    assert!(output.is_empty());
    assert_eq!(output.values, ElementValues::I8(Vec::new()));
}
