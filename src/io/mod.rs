//! I/O utilities for raster data
//!
//! This module provides byte order handling and headerless raw raster loading.

pub mod byte_order;
pub mod raw;
