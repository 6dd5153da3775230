//! Borrowed, stride-aware view over raster bytes
//!
//! A view never copies pixel data. Sub-views share the parent's bytes and
//! stride and only move the base offset, so a region of a large raster can be
//! handed to a worker thread for free.

use crate::io::byte_order::ByteOrder;
use crate::scan::errors::{ScanError, ScanResult};

use super::element::{Element, ElementType};
use super::region::Region;

/// Read-only 2-D view over raw raster bytes
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    /// Bytes starting at the first element of row 0
    data: &'a [u8],
    /// Width in elements
    width: u32,
    /// Height in rows
    height: u32,
    /// Bytes between the starts of consecutive rows
    stride: usize,
    /// Declared element type
    element_type: ElementType,
    /// Byte order of the elements
    byte_order: ByteOrder,
}

impl<'a> RasterView<'a> {
    /// Create a view, validating the geometry against the buffer
    ///
    /// # Arguments
    /// * `data` - Bytes beginning at pixel (0, 0)
    /// * `width` - Width in elements
    /// * `height` - Height in rows
    /// * `stride` - Bytes between consecutive rows
    /// * `element_type` - Declared element type
    /// * `byte_order` - Byte order of the stored elements
    ///
    /// # Returns
    /// The view, or `InvalidRaster` if the stride is shorter than a row or
    /// the buffer cannot hold every row
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        element_type: ElementType,
        byte_order: ByteOrder,
    ) -> ScanResult<Self> {
        let row_len = width as usize * element_type.size();
        if stride < row_len {
            return Err(ScanError::InvalidRaster(format!(
                "stride {} is shorter than a row of {} bytes", stride, row_len
            )));
        }

        let required = required_len(height, stride, row_len);
        if data.len() < required {
            return Err(ScanError::InvalidRaster(format!(
                "{}x{} {} raster with stride {} needs {} bytes, buffer has {}",
                width, height, element_type, stride, required, data.len()
            )));
        }

        Ok(RasterView {
            data,
            width,
            height,
            stride,
            element_type,
            byte_order,
        })
    }

    /// Build a view from geometry that an owner has already validated
    pub(crate) fn from_validated(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        element_type: ElementType,
        byte_order: ByteOrder,
    ) -> Self {
        debug_assert!(data.len() >= required_len(height, stride, width as usize * element_type.size()));
        RasterView {
            data,
            width,
            height,
            stride,
            element_type,
            byte_order,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Number of meaningful bytes in one row (excludes padding)
    pub fn row_len(&self) -> usize {
        self.width as usize * self.element_type.size()
    }

    /// Full rectangle of this view
    pub fn bounds(&self) -> Region {
        Region::full(self.width, self.height)
    }

    /// Element bytes of one row, without trailing padding
    ///
    /// The row starts at `row * stride` from the view's base, and the slice
    /// is exactly `width * element size` bytes long.
    pub fn row_bytes(&self, row: u32) -> ScanResult<&'a [u8]> {
        if row >= self.height {
            return Err(ScanError::InvalidRaster(format!(
                "row {} is outside a raster of height {}", row, self.height
            )));
        }

        if self.row_len() == 0 {
            return Ok(&[]);
        }

        let start = row as usize * self.stride;
        self.data.get(start..start + self.row_len()).ok_or_else(|| {
            ScanError::InvalidRaster(format!("row {} runs past the end of the buffer", row))
        })
    }

    /// Zero-copy view of a rectangle inside this view
    pub fn sub_view(&self, region: Region) -> ScanResult<RasterView<'a>> {
        if !region.fits_within(self.width, self.height) {
            return Err(ScanError::InvalidRaster(format!(
                "region ({},{} {}x{}) exceeds raster bounds {}x{}",
                region.x, region.y, region.width, region.height, self.width, self.height
            )));
        }

        if region.is_empty() {
            return RasterView::new(&[], region.width, region.height, self.stride,
                                   self.element_type, self.byte_order);
        }

        let offset = region.y as usize * self.stride + region.x as usize * self.element_type.size();
        let data = self.data.get(offset..).ok_or_else(|| {
            ScanError::InvalidRaster(format!("sub-view offset {} is past the end of the buffer", offset))
        })?;

        RasterView::new(data, region.width, region.height, self.stride,
                        self.element_type, self.byte_order)
    }

    /// Read the element at (x, y)
    pub fn get<T: Element>(&self, x: u32, y: u32) -> ScanResult<T> {
        if T::ELEMENT_TYPE != self.element_type {
            return Err(ScanError::ElementTypeMismatch {
                expected: self.element_type,
                actual: T::ELEMENT_TYPE,
            });
        }
        if x >= self.width {
            return Err(ScanError::InvalidRaster(format!(
                "column {} is outside a raster of width {}", x, self.width
            )));
        }

        let row = self.row_bytes(y)?;
        let size = self.element_type.size();
        let start = x as usize * size;
        Ok(self.byte_order.read_element(&row[start..start + size]))
    }
}

/// Minimum buffer length for the given geometry
pub(crate) fn required_len(height: u32, stride: usize, row_len: usize) -> usize {
    if height == 0 || row_len == 0 {
        0
    } else {
        (height as usize - 1) * stride + row_len
    }
}
