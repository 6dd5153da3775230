//! Logger utility for application-wide logging
//!
//! This module provides a file-backed logger that works alongside the
//! standard log crate and echoes records to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

use crate::scan::ScanOutput;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: Level,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: Level::Debug,
        })
    }

    /// Logger that discards plain messages, for library use without a log file
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            level: Level::Info,
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the outcome of one scan in a formatted way
    ///
    /// # Arguments
    ///
    /// * `label` - Name of the scanned raster (file or frame)
    /// * `output` - Scan result to describe
    /// * `max_samples` - How many samples to list individually
    pub fn log_scan_output(&self, label: &str, output: &ScanOutput, max_samples: usize) -> io::Result<()> {
        self.log(&format!("Scan of {}: {}", label, output.summary()))?;

        for (i, loc) in output.locations.iter().take(max_samples).enumerate() {
            let value = output.values.format_value(i).unwrap_or_default();
            self.log(&format!("  {} = {}", loc, value))?;
        }
        if output.len() > max_samples {
            self.log(&format!("  ... {} more", output.len() - max_samples))?;
        }

        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str, level: LevelFilter) -> io::Result<()> {
        let mut global_logger = Logger::new(log_file)?;
        global_logger.level = level.to_level().unwrap_or(Level::Error);

        // Only the first call can install a logger
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Also print to console
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
