//! Frame source over the files of one directory

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};

use crate::raster::RasterBuffer;
use crate::scan::errors::{ScanError, ScanResult};

use super::natural_sort::natural_cmp;
use super::playback::Playback;

/// Turns a file into a raster
pub type FrameLoader = Arc<dyn Fn(&Path) -> ScanResult<RasterBuffer> + Send + Sync>;

/// Order in which directory entries become frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrder {
    /// Natural (human) sort by file name
    Natural,
    /// Whatever order the file system enumerates entries in
    Enumeration,
}

/// Reference point for `seek`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Begin,
    Current,
    End,
}

/// One decoded frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Position of the frame in the source
    pub index: usize,
    /// File name the frame was loaded from
    pub label: String,
    /// Decoded raster
    pub raster: RasterBuffer,
}

/// Emitted on every tick of the source
#[derive(Debug)]
pub enum FrameEvent {
    /// The frame at the position was loaded
    Frame(Frame),
    /// The file at the position could not be loaded; the position still advances
    Failed { index: usize, label: String, error: ScanError },
    /// The position is past the last frame
    EndOfStream,
}

/// Plays the files of a directory as frames
pub struct DirectoryFrameSource {
    /// Frame files in playback order
    files: Arc<Vec<PathBuf>>,
    /// Index of the next frame, shared with the timer thread
    position: Arc<Mutex<usize>>,
    /// Decoder for one file
    loader: FrameLoader,
    /// Delay between timer ticks
    frame_delay: Duration,
}

impl DirectoryFrameSource {
    /// Open a directory and list its frame files
    ///
    /// # Arguments
    /// * `directory` - Directory to list (top level only)
    /// * `extension` - File extension to accept, e.g. "png", ".png" or "*.png";
    ///   empty or "*" accepts every file
    /// * `order` - Natural sort by name, or raw enumeration order
    ///
    /// # Returns
    /// A source positioned at frame 0 that decodes files with the `image` crate
    pub fn open<P: AsRef<Path>>(directory: P, extension: &str, order: FileOrder) -> ScanResult<Self> {
        let directory = directory.as_ref();
        let files = list_frame_files(directory, extension, order)?;
        info!("Opened {} with {} frame files ({:?} order)", directory.display(), files.len(), order);

        Ok(DirectoryFrameSource {
            files: Arc::new(files),
            position: Arc::new(Mutex::new(0)),
            loader: Arc::new(|path: &Path| RasterBuffer::load_image(path)),
            frame_delay: Duration::from_millis(1),
        })
    }

    /// Replace the file decoder
    pub fn with_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&Path) -> ScanResult<RasterBuffer> + Send + Sync + 'static,
    {
        self.loader = Arc::new(loader);
        self
    }

    /// Set the delay between timer ticks
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Number of frames
    pub fn length(&self) -> usize {
        self.files.len()
    }

    /// Index of the next frame to be emitted
    pub fn position(&self) -> usize {
        *lock_position(&self.position)
    }

    /// Frame files in playback order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The source can always be paused
    pub fn can_pause(&self) -> bool {
        true
    }

    /// File name of the frame at the current position, `None` at the end
    pub fn current_frame_label(&self) -> Option<String> {
        self.files.get(self.position()).map(|path| file_label(path))
    }

    /// Move the position and return the new one
    ///
    /// The result is clamped to `[0, length]`.
    pub fn seek(&self, offset: i64, origin: SeekOrigin) -> usize {
        let mut position = lock_position(&self.position);
        let length = self.files.len() as i64;
        let target = match origin {
            SeekOrigin::Begin => offset,
            SeekOrigin::Current => *position as i64 + offset,
            SeekOrigin::End => length + offset,
        };

        *position = target.clamp(0, length) as usize;
        debug!("Seek {:?} {:+} -> frame {}", origin, offset, *position);
        *position
    }

    /// Produce the event for the current position and advance
    pub fn next_event(&self) -> FrameEvent {
        tick(&self.files, &self.position, &self.loader)
    }

    /// Start the timer thread
    ///
    /// Events arrive on the returned handle every `frame_delay`. The timer
    /// stops when the handle is stopped or dropped.
    pub fn start(&self) -> Playback<'_> {
        info!("Starting playback with {:?} frame delay", self.frame_delay);
        Playback::spawn(
            self,
            Arc::clone(&self.files),
            Arc::clone(&self.position),
            Arc::clone(&self.loader),
            self.frame_delay,
        )
    }

    /// Rewind to the first frame
    pub(crate) fn rewind(&self) {
        *lock_position(&self.position) = 0;
    }
}

/// Shared by manual stepping and the timer thread
pub(crate) fn tick(files: &[PathBuf], position: &Mutex<usize>, loader: &FrameLoader) -> FrameEvent {
    // Claim the index, then decode without holding the lock
    let (index, path) = {
        let mut position = lock_position(position);
        let index = *position;
        match files.get(index) {
            Some(path) => {
                *position = index + 1;
                (index, path)
            },
            None => return FrameEvent::EndOfStream,
        }
    };

    let label = file_label(path);
    match loader(path) {
        Ok(raster) => FrameEvent::Frame(Frame { index, label, raster }),
        Err(error) => {
            warn!("Failed to load frame {} ({}): {}", index, label, error);
            FrameEvent::Failed { index, label, error }
        },
    }
}

// A poisoned position is still a valid index.
fn lock_position(position: &Mutex<usize>) -> MutexGuard<'_, usize> {
    position.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn list_frame_files(directory: &Path, extension: &str, order: FileOrder) -> ScanResult<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches(|c: char| c == '.' || c == '*').to_lowercase();

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let matches = wanted.is_empty()
            || path.extension()
                .and_then(std::ffi::OsStr::to_str)
                .map_or(false, |ext| ext.to_lowercase() == wanted);
        if matches {
            files.push(path);
        }
    }

    if order == FileOrder::Natural {
        files.sort_by(|a, b| natural_cmp(&file_label(a), &file_label(b)));
    }

    Ok(files)
}
