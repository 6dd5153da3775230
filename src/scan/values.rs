//! Type-erased value collections
//!
//! The engine resolves the element type at run time, so extracted values
//! travel as one `ElementValues` variant per primitive and are unwrapped by
//! typed callers with `Element::from_values`.

use crate::raster::ElementType;
use crate::scan::errors::{ScanError, ScanResult};

/// Values extracted from a raster, in the raster's element type
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValues {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

// Runs `$body` with `$v` bound to the inner vector of any variant.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            ElementValues::U8($v) => $body,
            ElementValues::I8($v) => $body,
            ElementValues::U16($v) => $body,
            ElementValues::I16($v) => $body,
            ElementValues::U32($v) => $body,
            ElementValues::I32($v) => $body,
            ElementValues::F32($v) => $body,
            ElementValues::F64($v) => $body,
        }
    };
}

impl ElementValues {
    /// Empty collection of the given type
    pub fn empty(element_type: ElementType) -> Self {
        match element_type {
            ElementType::U8 => ElementValues::U8(Vec::new()),
            ElementType::I8 => ElementValues::I8(Vec::new()),
            ElementType::U16 => ElementValues::U16(Vec::new()),
            ElementType::I16 => ElementValues::I16(Vec::new()),
            ElementType::U32 => ElementValues::U32(Vec::new()),
            ElementType::I32 => ElementValues::I32(Vec::new()),
            ElementType::F32 => ElementValues::F32(Vec::new()),
            ElementType::F64 => ElementValues::F64(Vec::new()),
        }
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ElementValues::U8(_) => ElementType::U8,
            ElementValues::I8(_) => ElementType::I8,
            ElementValues::U16(_) => ElementType::U16,
            ElementValues::I16(_) => ElementType::I16,
            ElementValues::U32(_) => ElementType::U32,
            ElementValues::I32(_) => ElementType::I32,
            ElementValues::F32(_) => ElementType::F32,
            ElementValues::F64(_) => ElementType::F64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move every value of `other` onto the end of `self`
    pub fn append(&mut self, other: ElementValues) -> ScanResult<()> {
        match (self, other) {
            (ElementValues::U8(a), ElementValues::U8(mut b)) => a.append(&mut b),
            (ElementValues::I8(a), ElementValues::I8(mut b)) => a.append(&mut b),
            (ElementValues::U16(a), ElementValues::U16(mut b)) => a.append(&mut b),
            (ElementValues::I16(a), ElementValues::I16(mut b)) => a.append(&mut b),
            (ElementValues::U32(a), ElementValues::U32(mut b)) => a.append(&mut b),
            (ElementValues::I32(a), ElementValues::I32(mut b)) => a.append(&mut b),
            (ElementValues::F32(a), ElementValues::F32(mut b)) => a.append(&mut b),
            (ElementValues::F64(a), ElementValues::F64(mut b)) => a.append(&mut b),
            (a, b) => {
                return Err(ScanError::ElementTypeMismatch {
                    expected: a.element_type(),
                    actual: b.element_type(),
                })
            },
        }
        Ok(())
    }

    /// Value at `index` widened to f64
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_values!(self, v => v.get(index).map(|x| *x as f64))
    }

    /// Value at `index` formatted with the type's own `Display`
    pub fn format_value(&self, index: usize) -> Option<String> {
        with_values!(self, v => v.get(index).map(|x| x.to_string()))
    }

    /// Keep only the values whose position is `true` in `keep`
    pub(crate) fn retain_mask(&mut self, keep: &[bool]) {
        with_values!(self, v => {
            let mut flags = keep.iter();
            v.retain(|_| flags.next().copied().unwrap_or(false));
        })
    }

    /// Reorder so that position `i` holds the value previously at `order[i]`
    pub(crate) fn permute(&mut self, order: &[usize]) {
        with_values!(self, v => {
            let reordered = order.iter().map(|&i| v[i]).collect();
            *v = reordered;
        })
    }
}
