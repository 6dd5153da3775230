//! Per-type extraction routines
//!
//! A routine walks one region's sub-view row by row and reports every
//! non-zero element with its region-local location.

use std::marker::PhantomData;

use byteorder::{BigEndian, LittleEndian};

use crate::io::byte_order::ByteOrder;
use crate::raster::{Element, ElementType, RasterView};
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::location::Location;
use crate::scan::values::ElementValues;

/// Samples produced by one routine call, in region-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSamples {
    /// Locations relative to the sub-view origin
    pub locations: Vec<Location>,
    /// Values in the same order as `locations`
    pub values: ElementValues,
}

impl RegionSamples {
    pub fn empty(element_type: ElementType) -> Self {
        RegionSamples {
            locations: Vec::new(),
            values: ElementValues::empty(element_type),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Strategy trait for extracting samples from one element type
pub trait ExtractionRoutine: Send + Sync {
    /// Extract matching samples from a region's sub-view
    ///
    /// Output is row-major: all of row 0 left to right, then row 1, and so on.
    fn extract(&self, view: &RasterView<'_>) -> ScanResult<RegionSamples>;

    /// Element type this routine reads
    fn element_type(&self) -> ElementType;

    /// Get the name of this routine
    fn name(&self) -> &'static str;
}

/// Finds every element that is not equal to zero
pub struct NonZeroRoutine<T: Element> {
    _element: PhantomData<fn() -> T>,
}

impl<T: Element> NonZeroRoutine<T> {
    pub fn new() -> Self {
        NonZeroRoutine { _element: PhantomData }
    }
}

impl<T: Element> Default for NonZeroRoutine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ExtractionRoutine for NonZeroRoutine<T> {
    fn extract(&self, view: &RasterView<'_>) -> ScanResult<RegionSamples> {
        if view.element_type() != T::ELEMENT_TYPE {
            return Err(ScanError::ElementTypeMismatch {
                expected: view.element_type(),
                actual: T::ELEMENT_TYPE,
            });
        }

        let mut locations = Vec::new();
        let mut values: Vec<T> = Vec::new();

        match view.byte_order() {
            ByteOrder::LittleEndian => collect_non_zero::<T, LittleEndian>(view, &mut locations, &mut values)?,
            ByteOrder::BigEndian => collect_non_zero::<T, BigEndian>(view, &mut locations, &mut values)?,
        }

        Ok(RegionSamples {
            locations,
            values: T::into_values(values),
        })
    }

    fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    fn name(&self) -> &'static str {
        "non-zero"
    }
}

// Each row is a bounds-checked slice of exactly `width * size` bytes taken at
// `row * stride`, so padding after the last element is never read.
fn collect_non_zero<T: Element, B: byteorder::ByteOrder>(
    view: &RasterView<'_>,
    locations: &mut Vec<Location>,
    values: &mut Vec<T>,
) -> ScanResult<()> {
    let size = T::ELEMENT_TYPE.size();

    for row in 0..view.height() {
        let bytes = view.row_bytes(row)?;
        for (col, chunk) in bytes.chunks_exact(size).enumerate() {
            let value = T::read::<B>(chunk);
            if !value.is_zero() {
                locations.push(Location::new(col as u32, row));
                values.push(value);
            }
        }
    }

    Ok(())
}
