//! Timer-driven playback handle
//!
//! The timer thread lives exactly as long as the `Playback` value: stopping
//! or dropping the handle signals the thread and joins it. At most one event
//! waits in the queue; the timer stops decoding until the consumer takes it.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use super::directory::{tick, DirectoryFrameSource, FrameEvent, FrameLoader};

const EVENT_QUEUE_LEN: usize = 1;

enum Control {
    Pause,
    Resume,
    Stop,
}

/// Running playback of a `DirectoryFrameSource`
pub struct Playback<'a> {
    source: &'a DirectoryFrameSource,
    control: Sender<Control>,
    events: Receiver<FrameEvent>,
    worker: Option<JoinHandle<()>>,
}

impl<'a> Playback<'a> {
    pub(crate) fn spawn(
        source: &'a DirectoryFrameSource,
        files: Arc<Vec<PathBuf>>,
        position: Arc<Mutex<usize>>,
        loader: FrameLoader,
        frame_delay: Duration,
    ) -> Self {
        let (control_tx, control_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::sync_channel(EVENT_QUEUE_LEN);

        let worker = thread::spawn(move || {
            let mut paused = false;
            loop {
                match control_rx.recv_timeout(frame_delay) {
                    Ok(Control::Pause) => paused = true,
                    Ok(Control::Resume) => paused = false,
                    Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        if paused {
                            continue;
                        }
                        let event = tick(&files, &position, &loader);
                        if !deliver(event, &event_tx, &control_rx, frame_delay, &mut paused) {
                            break;
                        }
                    },
                }
            }
            debug!("Playback timer stopped");
        });

        Playback {
            source,
            control: control_tx,
            events: event_rx,
            worker: Some(worker),
        }
    }

    /// Stop emitting events until `resume`
    pub fn pause(&self) {
        let _ = self.control.send(Control::Pause);
    }

    pub fn resume(&self) {
        let _ = self.control.send(Control::Resume);
    }

    /// Channel the timer delivers events on
    pub fn events(&self) -> &Receiver<FrameEvent> {
        &self.events
    }

    /// Wait up to `timeout` for the next event
    pub fn next_event(&self, timeout: Duration) -> Option<FrameEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Stop the timer and rewind the source to its first frame
    pub fn stop(mut self) {
        self.shutdown();
        self.source.rewind();
    }

    fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.control.send(Control::Stop);
            if worker.join().is_err() {
                warn!("Playback timer thread panicked");
            }
        }
    }
}

impl Drop for Playback<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// Retries a full queue once per frame delay while still obeying control
// messages. Returns false when the timer should exit.
fn deliver(
    mut event: FrameEvent,
    events: &SyncSender<FrameEvent>,
    control: &Receiver<Control>,
    frame_delay: Duration,
    paused: &mut bool,
) -> bool {
    loop {
        if !*paused {
            match events.try_send(event) {
                Ok(()) => return true,
                Err(TrySendError::Full(rejected)) => event = rejected,
                Err(TrySendError::Disconnected(_)) => return false,
            }
        }

        match control.recv_timeout(frame_delay) {
            Ok(Control::Pause) => *paused = true,
            Ok(Control::Resume) => *paused = false,
            Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => {},
        }
    }
}
