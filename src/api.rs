use std::path::Path;
use log::info;
use crate::scan::errors::ScanResult;
use crate::utils::logger::Logger;
use crate::utils::config::ScanConfig;
use crate::utils::progress::ProgressTracker;
use crate::io::raw::{read_raw, RawRasterSpec};
use crate::raster::RasterBuffer;
use crate::scan::{ScanEngine, ScanOutput};
use crate::source::{DirectoryFrameSource, FrameEvent};

/// Outcome of scanning one frame of a directory
#[derive(Debug)]
pub struct FrameScan {
    /// Position of the frame in the source
    pub index: usize,
    /// File name of the frame
    pub label: String,
    /// Scan result, or the load/scan error for this frame
    pub outcome: ScanResult<ScanOutput>,
}

/// Main interface to the RasterScan library
pub struct RasterScan {
    logger: Logger,
    config: ScanConfig,
}

impl RasterScan {
    /// Create a new RasterScan instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to a log file; without one, plain
    ///   messages are discarded and only the `log` facade is used
    ///
    /// # Returns
    /// A RasterScan instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> ScanResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(RasterScan { logger, config: ScanConfig::default() })
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Engine over the built-in registry using the configured partitioning
    pub fn engine(&self) -> ScanResult<ScanEngine<'static>> {
        Ok(ScanEngine::new().with_partitioner(self.config.build_partitioner()?))
    }

    /// Scan an in-memory raster
    pub fn scan_raster(&self, raster: &RasterBuffer) -> ScanResult<ScanOutput> {
        self.engine()?.scan(&raster.view())
    }

    /// Decode a single-channel image file and scan it
    ///
    /// # Arguments
    /// * `input_path` - Path to a Luma8 or Luma16 image
    ///
    /// # Returns
    /// Non-zero samples of the image or an error
    pub fn scan_image(&self, input_path: &str) -> ScanResult<ScanOutput> {
        info!("Scanning image {}", input_path);
        let raster = RasterBuffer::load_image(input_path)?;
        let output = self.scan_raster(&raster)?;
        self.logger.log_scan_output(input_path, &output, 10)?;
        Ok(output)
    }

    /// Read a headerless raw raster and scan it
    ///
    /// # Arguments
    /// * `input_path` - Path to the raw file
    /// * `spec` - Geometry of the file
    ///
    /// # Returns
    /// Non-zero samples of the raster or an error
    pub fn scan_raw(&self, input_path: &str, spec: &RawRasterSpec) -> ScanResult<ScanOutput> {
        info!("Scanning raw raster {}", input_path);
        let raster = read_raw(input_path, spec)?;
        let output = self.scan_raster(&raster)?;
        self.logger.log_scan_output(input_path, &output, 10)?;
        Ok(output)
    }

    /// Open a directory as a frame source using the configured extension and order
    pub fn open_directory<P: AsRef<Path>>(&self, directory: P) -> ScanResult<DirectoryFrameSource> {
        let source = DirectoryFrameSource::open(directory, &self.config.extension, self.config.file_order())?;
        Ok(source.with_frame_delay(self.config.frame_delay))
    }

    /// Step through every frame of a directory and scan each one
    ///
    /// A frame that fails to load or scan is reported in its `FrameScan`
    /// and does not stop the remaining frames.
    ///
    /// # Arguments
    /// * `directory` - Directory of frame files
    /// * `progress` - Tracker advanced once per frame
    ///
    /// # Returns
    /// One entry per frame in playback order
    pub fn scan_directory<P: AsRef<Path>>(&self, directory: P, progress: &ProgressTracker) -> ScanResult<Vec<FrameScan>> {
        let source = self.open_directory(directory)?;
        let engine = self.engine()?;
        let mut scans = Vec::with_capacity(source.length());

        loop {
            let scan = match source.next_event() {
                FrameEvent::Frame(frame) => FrameScan {
                    index: frame.index,
                    outcome: engine.scan(&frame.raster.view()),
                    label: frame.label,
                },
                FrameEvent::Failed { index, label, error } => FrameScan {
                    index,
                    label,
                    outcome: Err(error),
                },
                FrameEvent::EndOfStream => break,
            };

            progress.set_message(&scan.label);
            progress.increment(1);
            if let Ok(output) = &scan.outcome {
                self.logger.log_scan_output(&scan.label, output, 0)?;
            }
            scans.push(scan);
        }

        progress.finish();
        info!("Scanned {} frames", scans.len());
        Ok(scans)
    }
}
