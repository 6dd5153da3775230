//! Custom error types for raster scanning

use std::fmt;
use std::io;

use crate::raster::{ElementType, Region};

/// Scan-specific error types
#[derive(Debug)]
pub enum ScanError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding error
    ImageError(image::ImageError),
    /// No extraction routine is registered for the element type
    UnsupportedElementType(ElementType),
    /// An extraction routine failed inside one region
    RegionExtractionFailure(Region, String),
    /// An element type was registered twice
    DuplicateRegistration(ElementType),
    /// Raster geometry does not fit its buffer
    InvalidRaster(String),
    /// Decoded image is not a single-channel layout
    UnsupportedImageLayout(String),
    /// A typed access or registration used a different element type than the
    /// data holds; `expected` is the type the raster, collection or registry
    /// slot declares and `actual` is the type that was supplied
    ElementTypeMismatch { expected: ElementType, actual: ElementType },
    /// Configuration file or value error
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::IoError(e) => write!(f, "I/O error: {}", e),
            ScanError::ImageError(e) => write!(f, "Image error: {}", e),
            ScanError::UnsupportedElementType(t) =>
                write!(f, "Can not scan a raster of element type {}", t.name()),
            ScanError::RegionExtractionFailure(r, msg) =>
                write!(f, "Extraction failed in region ({},{} {}x{}): {}", r.x, r.y, r.width, r.height, msg),
            ScanError::DuplicateRegistration(t) =>
                write!(f, "Element type {} is already registered", t.name()),
            ScanError::InvalidRaster(msg) => write!(f, "Invalid raster: {}", msg),
            ScanError::UnsupportedImageLayout(layout) => write!(f, "Unsupported image layout: {}", layout),
            ScanError::ElementTypeMismatch { expected, actual } =>
                write!(f, "Element type mismatch: expected {}, found {}", expected.name(), actual.name()),
            ScanError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScanError::GenericError(msg) => write!(f, "Scan error: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::IoError(e) => Some(e),
            ScanError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScanError {
    fn from(error: io::Error) -> Self {
        ScanError::IoError(error)
    }
}

impl From<image::ImageError> for ScanError {
    fn from(error: image::ImageError) -> Self {
        ScanError::ImageError(error)
    }
}

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl From<String> for ScanError {
    fn from(msg: String) -> Self {
        ScanError::GenericError(msg)
    }
}
