//! Directory playback command
//!
//! Plays a directory of frame files through the timer-driven frame source
//! and scans each frame as it arrives.

use std::time::Duration;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::commands::config_from_args;
use crate::scan::errors::{ScanError, ScanResult};
use crate::scan::ScanEngine;
use crate::source::{DirectoryFrameSource, FrameEvent};
use crate::utils::config::ScanConfig;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

// Upper bound on the wait for one frame; decoding large frames can be slow.
const FRAME_TIMEOUT: Duration = Duration::from_secs(30);

/// Command for scanning every frame of a directory
pub struct PlayCommand<'a> {
    /// Directory of frame files
    directory: String,
    /// Write per-frame counts to this CSV file
    output_file: Option<String>,
    /// Playback and partitioning settings
    config: ScanConfig,
    /// Hide the progress bar
    quiet: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PlayCommand<'a> {
    /// Create a new play command
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ScanResult<Self> {
        let directory = args.get_one::<String>("input")
            .ok_or_else(|| ScanError::GenericError("Missing input directory".to_string()))?
            .clone();
        info!("Frame directory: {}", directory);

        Ok(PlayCommand {
            directory,
            output_file: args.get_one::<String>("output").cloned(),
            config: config_from_args(args)?,
            quiet: args.get_flag("quiet"),
            logger,
        })
    }
}

impl<'a> Command for PlayCommand<'a> {
    fn execute(&self) -> ScanResult<()> {
        let source = DirectoryFrameSource::open(&self.directory, &self.config.extension, self.config.file_order())?
            .with_frame_delay(self.config.frame_delay);
        let engine = ScanEngine::new().with_partitioner(self.config.build_partitioner()?);

        let progress = if self.quiet {
            ProgressTracker::hidden()
        } else {
            ProgressTracker::new(source.length() as u64, "Scanning frames")
        };

        let mut rows = Vec::with_capacity(source.length());
        let playback = source.start();
        loop {
            let event = playback.next_event(FRAME_TIMEOUT).ok_or_else(|| {
                ScanError::GenericError(format!("No frame within {:?}", FRAME_TIMEOUT))
            })?;

            match event {
                FrameEvent::Frame(frame) => {
                    let output = engine.scan(&frame.raster.view())?;
                    self.logger.log_scan_output(&frame.label, &output, 0)?;
                    progress.set_message(&frame.label);
                    rows.push(format!("{},{},{}", frame.index, frame.label, output.len()));
                },
                FrameEvent::Failed { index, label, error } => {
                    warn!("Skipping frame {} ({}): {}", index, label, error);
                    rows.push(format!("{},{},", index, label));
                },
                FrameEvent::EndOfStream => break,
            }
            progress.increment(1);
        }
        playback.stop();
        progress.finish();

        match &self.output_file {
            Some(path) => {
                let mut content = String::from("frame,label,non_zero\n");
                for row in &rows {
                    content.push_str(row);
                    content.push('\n');
                }
                std::fs::write(path, content)?;
                println!("{} frames scanned, counts written to {}", rows.len(), path);
            },
            None => println!("{} frames scanned", rows.len()),
        }

        Ok(())
    }
}
