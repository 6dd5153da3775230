//! Utility modules for common functionality
//!
//! Logging, progress reporting and configuration used by the library facade
//! and the CLI.

pub mod logger;
pub mod progress;
pub mod config;
