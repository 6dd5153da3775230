//! Owned raster storage
//!
//! `RasterBuffer` owns its bytes and hands out `RasterView`s for scanning.
//! Frames decoded from image files and raw files both end up here.

use std::path::Path;

use image::DynamicImage;
use log::debug;

use crate::io::byte_order::ByteOrder;
use crate::scan::errors::{ScanError, ScanResult};

use super::element::{Element, ElementType};
use super::view::RasterView;

/// Owned 2-D raster with explicit stride and element type
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
    element_type: ElementType,
    byte_order: ByteOrder,
}

impl RasterBuffer {
    /// Wrap existing bytes, validating the geometry
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        element_type: ElementType,
        byte_order: ByteOrder,
    ) -> ScanResult<Self> {
        // Validation is shared with the view constructor
        RasterView::new(&data, width, height, stride, element_type, byte_order)?;

        Ok(RasterBuffer {
            data,
            width,
            height,
            stride,
            element_type,
            byte_order,
        })
    }

    /// All-zero raster with tightly packed rows in native byte order
    pub fn zeros(element_type: ElementType, width: u32, height: u32) -> Self {
        let stride = width as usize * element_type.size();
        RasterBuffer {
            data: vec![0u8; stride * height as usize],
            width,
            height,
            stride,
            element_type,
            byte_order: ByteOrder::native(),
        }
    }

    /// Raster from row-major values with tightly packed rows
    pub fn from_elements<T: Element>(width: u32, height: u32, values: &[T]) -> ScanResult<Self> {
        Self::with_stride(width, height, width as usize * T::ELEMENT_TYPE.size(), values)
    }

    /// Raster from row-major values laid out with `stride` bytes per row
    ///
    /// Padding bytes after each row are filled with `0xAB` so that nothing
    /// can rely on them reading as zero.
    pub fn with_stride<T: Element>(width: u32, height: u32, stride: usize, values: &[T]) -> ScanResult<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(ScanError::InvalidRaster(format!(
                "expected {} values for a {}x{} raster, got {}",
                expected, width, height, values.len()
            )));
        }

        let size = T::ELEMENT_TYPE.size();
        let row_len = width as usize * size;
        if stride < row_len {
            return Err(ScanError::InvalidRaster(format!(
                "stride {} is shorter than a row of {} bytes", stride, row_len
            )));
        }

        let byte_order = ByteOrder::native();
        let mut data = vec![0xABu8; stride * height as usize];
        for (i, value) in values.iter().enumerate() {
            let row = i / width as usize;
            let col = i % width as usize;
            let start = row * stride + col * size;
            byte_order.write_element(*value, &mut data[start..start + size]);
        }

        Ok(RasterBuffer {
            data,
            width,
            height,
            stride,
            element_type: T::ELEMENT_TYPE,
            byte_order,
        })
    }

    /// Convert a decoded single-channel image without copying through a color space
    ///
    /// Luma8 maps to `u8` and Luma16 to `u16`. Every other layout is
    /// rejected, since picking a channel or converting color is up to the
    /// caller.
    pub fn from_image(image: DynamicImage) -> ScanResult<Self> {
        match image {
            DynamicImage::ImageLuma8(gray) => {
                let (width, height) = gray.dimensions();
                Self::from_raw(gray.into_raw(), width, height, width as usize,
                               ElementType::U8, ByteOrder::native())
            },
            DynamicImage::ImageLuma16(gray) => {
                let (width, height) = gray.dimensions();
                let values = gray.into_raw();
                Self::from_elements::<u16>(width, height, &values)
            },
            other => Err(ScanError::UnsupportedImageLayout(format!("{:?}", other.color()))),
        }
    }

    /// Decode an image file and convert it with `from_image`
    pub fn load_image<P: AsRef<Path>>(path: P) -> ScanResult<Self> {
        let path = path.as_ref();
        debug!("Decoding image {}", path.display());
        let image = image::open(path)?;
        Self::from_image(image)
    }

    /// Borrow the whole raster as a view
    pub fn view(&self) -> RasterView<'_> {
        RasterView::from_validated(&self.data, self.width, self.height, self.stride,
                                   self.element_type, self.byte_order)
    }

    /// Write one element at (x, y)
    pub fn put<T: Element>(&mut self, x: u32, y: u32, value: T) -> ScanResult<()> {
        if T::ELEMENT_TYPE != self.element_type {
            return Err(ScanError::ElementTypeMismatch {
                expected: self.element_type,
                actual: T::ELEMENT_TYPE,
            });
        }
        if x >= self.width || y >= self.height {
            return Err(ScanError::InvalidRaster(format!(
                "({}, {}) is outside a {}x{} raster", x, y, self.width, self.height
            )));
        }

        let size = self.element_type.size();
        let start = y as usize * self.stride + x as usize * size;
        self.byte_order.write_element(value, &mut self.data[start..start + size]);
        Ok(())
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

    /// Raw bytes including row padding
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
