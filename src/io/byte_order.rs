//! Byte order handling for raster element data
//!
//! Raster buffers carry the byte order their elements were written in, so a
//! raw file written on a big-endian machine can be scanned without first
//! swapping it in memory.

use byteorder::{BigEndian, LittleEndian};

use crate::raster::Element;
use crate::scan::errors::{ScanError, ScanResult};

/// Represents the byte order of raster elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian byte order
    LittleEndian,
    /// Big-endian byte order
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the running machine
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// Parses a byte order name ("le", "little", "be", "big", "native")
    pub fn parse(name: &str) -> ScanResult<Self> {
        match name.to_lowercase().as_str() {
            "le" | "little" | "little-endian" | "ii" => Ok(ByteOrder::LittleEndian),
            "be" | "big" | "big-endian" | "mm" => Ok(ByteOrder::BigEndian),
            "native" => Ok(ByteOrder::native()),
            _ => Err(ScanError::GenericError(format!("Unknown byte order: {}", name))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian",
            ByteOrder::BigEndian => "Big Endian",
        }
    }

    /// Decodes one element from exactly `T::ELEMENT_TYPE.size()` bytes
    pub fn read_element<T: Element>(&self, bytes: &[u8]) -> T {
        match self {
            ByteOrder::LittleEndian => T::read::<LittleEndian>(bytes),
            ByteOrder::BigEndian => T::read::<BigEndian>(bytes),
        }
    }

    /// Encodes one element into exactly `T::ELEMENT_TYPE.size()` bytes
    pub fn write_element<T: Element>(&self, value: T, bytes: &mut [u8]) {
        match self {
            ByteOrder::LittleEndian => value.write::<LittleEndian>(bytes),
            ByteOrder::BigEndian => value.write::<BigEndian>(bytes),
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::native()
    }
}
