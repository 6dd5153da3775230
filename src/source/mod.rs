//! Directory-backed frame source
//!
//! Plays the image files of a directory as a sequence of frames, either by
//! stepping manually or from a timer thread owned by a `Playback` handle.

mod natural_sort;
mod directory;
mod playback;
#[cfg(test)]
mod tests;

pub use natural_sort::natural_cmp;
pub use directory::{DirectoryFrameSource, FileOrder, Frame, FrameEvent, FrameLoader, SeekOrigin};
pub use playback::Playback;
