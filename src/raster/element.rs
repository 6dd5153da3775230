//! Element (channel) types and their raw byte representation
//!
//! `ElementType` is the runtime tag a raster declares for its samples, and
//! `Element` ties each tag to the Rust primitive that reads it.

use std::fmt;

use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::values::ElementValues;

/// Runtime identity of a raster's element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ElementType {
    /// All element types known to the crate
    pub const ALL: [ElementType; 8] = [
        ElementType::U8,
        ElementType::I8,
        ElementType::U16,
        ElementType::I16,
        ElementType::U32,
        ElementType::I32,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Size of one element in bytes
    pub const fn size(&self) -> usize {
        match self {
            ElementType::U8 | ElementType::I8 => 1,
            ElementType::U16 | ElementType::I16 => 2,
            ElementType::U32 | ElementType::I32 | ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }

    /// Short name of the type, matching the Rust primitive
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::U8 => "u8",
            ElementType::I8 => "i8",
            ElementType::U16 => "u16",
            ElementType::I16 => "i16",
            ElementType::U32 => "u32",
            ElementType::I32 => "i32",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        }
    }

    /// Parses a type name as given on the command line or in config
    pub fn parse(name: &str) -> ScanResult<Self> {
        match name.to_lowercase().as_str() {
            "u8" | "byte" => Ok(ElementType::U8),
            "i8" | "sbyte" => Ok(ElementType::I8),
            "u16" => Ok(ElementType::U16),
            "i16" | "short" => Ok(ElementType::I16),
            "u32" => Ok(ElementType::U32),
            "i32" | "int" => Ok(ElementType::I32),
            "f32" | "float" => Ok(ElementType::F32),
            "f64" | "double" => Ok(ElementType::F64),
            _ => Err(ScanError::GenericError(format!("Unknown element type: {}", name))),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive that can be stored as a raster element
///
/// Implementors decode themselves from a byte run of exactly
/// `ELEMENT_TYPE.size()` bytes. The zero test uses the type's own equality,
/// so for floats `-0.0` counts as zero and `NaN` does not.
pub trait Element: Copy + PartialEq + Send + Sync + fmt::Debug + fmt::Display + 'static {
    /// Runtime tag of this type
    const ELEMENT_TYPE: ElementType;

    /// The zero value of this type
    const ZERO: Self;

    /// Decode from `bytes` in byte order `B`
    fn read<B: byteorder::ByteOrder>(bytes: &[u8]) -> Self;

    /// Encode into `bytes` in byte order `B`
    fn write<B: byteorder::ByteOrder>(self, bytes: &mut [u8]);

    /// Widen to f64 for range filtering and reporting
    fn to_f64(self) -> f64;

    /// Wrap a typed vector in the type-erased collection
    fn into_values(values: Vec<Self>) -> ElementValues;

    /// Unwrap the type-erased collection if it holds this type
    fn from_values(values: ElementValues) -> Option<Vec<Self>>;

    /// Whether the value equals zero
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Element for u8 {
    const ELEMENT_TYPE: ElementType = ElementType::U8;
    const ZERO: Self = 0;

    fn read<B: byteorder::ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0]
    }

    fn write<B: byteorder::ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn into_values(values: Vec<Self>) -> ElementValues {
        ElementValues::U8(values)
    }

    fn from_values(values: ElementValues) -> Option<Vec<Self>> {
        match values {
            ElementValues::U8(v) => Some(v),
            _ => None,
        }
    }
}

impl Element for i8 {
    const ELEMENT_TYPE: ElementType = ElementType::I8;
    const ZERO: Self = 0;

    fn read<B: byteorder::ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0] as i8
    }

    fn write<B: byteorder::ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self as u8;
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn into_values(values: Vec<Self>) -> ElementValues {
        ElementValues::I8(values)
    }

    fn from_values(values: ElementValues) -> Option<Vec<Self>> {
        match values {
            ElementValues::I8(v) => Some(v),
            _ => None,
        }
    }
}

// Multi-byte primitives all go through the byteorder read/write pairs.
macro_rules! impl_multibyte_element {
    ($ty:ty, $tag:ident, $zero:expr, $read:ident, $write:ident) => {
        impl Element for $ty {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;
            const ZERO: Self = $zero;

            fn read<B: byteorder::ByteOrder>(bytes: &[u8]) -> Self {
                B::$read(bytes)
            }

            fn write<B: byteorder::ByteOrder>(self, bytes: &mut [u8]) {
                B::$write(bytes, self)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn into_values(values: Vec<Self>) -> ElementValues {
                ElementValues::$tag(values)
            }

            fn from_values(values: ElementValues) -> Option<Vec<Self>> {
                match values {
                    ElementValues::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_multibyte_element!(u16, U16, 0, read_u16, write_u16);
impl_multibyte_element!(i16, I16, 0, read_i16, write_i16);
impl_multibyte_element!(u32, U32, 0, read_u32, write_u32);
impl_multibyte_element!(i32, I32, 0, read_i32, write_i32);
impl_multibyte_element!(f32, F32, 0.0, read_f32, write_f32);
impl_multibyte_element!(f64, F64, 0.0, read_f64, write_f64);
