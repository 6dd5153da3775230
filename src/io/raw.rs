//! Headerless raw raster files
//!
//! Raw files carry no metadata, so the caller describes the geometry with a
//! `RawRasterSpec`. An optional header length is skipped before the first row.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info};

use crate::io::byte_order::ByteOrder;
use crate::raster::{ElementType, RasterBuffer};
use crate::scan::errors::{ScanError, ScanResult};

/// Geometry of a headerless raw raster file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRasterSpec {
    /// Width in elements
    pub width: u32,
    /// Height in rows
    pub height: u32,
    /// Element type of every sample
    pub element_type: ElementType,
    /// Byte order the file was written in
    pub byte_order: ByteOrder,
    /// Bytes per row, `None` for tightly packed rows
    pub stride: Option<usize>,
    /// Bytes to skip before the first row
    pub header_len: u64,
}

impl RawRasterSpec {
    /// Tightly packed, native-order raster without a header
    pub fn new(width: u32, height: u32, element_type: ElementType) -> Self {
        RawRasterSpec {
            width,
            height,
            element_type,
            byte_order: ByteOrder::native(),
            stride: None,
            header_len: 0,
        }
    }

    /// Bytes per row this spec resolves to
    pub fn effective_stride(&self) -> usize {
        self.stride
            .unwrap_or(self.width as usize * self.element_type.size())
    }

    /// Number of bytes read from the file after the header
    pub fn data_len(&self) -> usize {
        self.effective_stride() * self.height as usize
    }
}

/// Read a raw raster file into an owned buffer
///
/// # Arguments
/// * `path` - File to read
/// * `spec` - Geometry of the data
///
/// # Returns
/// The raster, or an error if the file is shorter than the geometry requires
pub fn read_raw<P: AsRef<Path>>(path: P, spec: &RawRasterSpec) -> ScanResult<RasterBuffer> {
    let path = path.as_ref();
    info!("Reading raw {}x{} {} raster from {}",
          spec.width, spec.height, spec.element_type, path.display());

    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let needed = spec.header_len + spec.data_len() as u64;
    if file_len < needed {
        return Err(ScanError::InvalidRaster(format!(
            "{} holds {} bytes, geometry needs {}", path.display(), file_len, needed
        )));
    }

    file.seek(SeekFrom::Start(spec.header_len))?;
    let mut data = vec![0u8; spec.data_len()];
    file.read_exact(&mut data)?;
    debug!("Read {} bytes of raster data ({})", data.len(), spec.byte_order.name());

    RasterBuffer::from_raw(data, spec.width, spec.height, spec.effective_stride(),
                           spec.element_type, spec.byte_order)
}
