use std::thread;
use std::time::Duration;

use crate::source::{DirectoryFrameSource, FileOrder, FrameEvent};

use super::directory_tests::{byte_loader, frame_directory};

const WAIT: Duration = Duration::from_secs(5);

fn source_with_frames(dir: &tempfile::TempDir) -> DirectoryFrameSource {
    DirectoryFrameSource::open(dir.path(), "png", FileOrder::Natural)
        .unwrap()
        .with_loader(byte_loader)
        .with_frame_delay(Duration::from_millis(2))
}

#[test]
fn test_playback_emits_every_frame_then_end_of_stream() {
    let dir = frame_directory(&["1.png", "2.png", "3.png"]);
    let source = source_with_frames(&dir);

    let playback = source.start();
    let mut indices = Vec::new();
    loop {
        match playback.next_event(WAIT) {
            Some(FrameEvent::Frame(frame)) => indices.push(frame.index),
            Some(FrameEvent::Failed { error, .. }) => panic!("unexpected failure: {}", error),
            Some(FrameEvent::EndOfStream) => break,
            None => panic!("timed out waiting for playback"),
        }
    }
    assert_eq!(indices, vec![0, 1, 2]);

    playback.stop();
    assert_eq!(source.position(), 0);
}

#[test]
fn test_pause_holds_position() {
    let dir = frame_directory(&["1.png", "2.png", "3.png", "4.png", "5.png", "6.png"]);
    let source = source_with_frames(&dir);
    let playback = source.start();

    assert!(matches!(playback.next_event(WAIT), Some(FrameEvent::Frame(_))));
    playback.pause();
    thread::sleep(Duration::from_millis(50));
    while playback.events().try_recv().is_ok() {}

    let held = source.position();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(source.position(), held);
    assert!(playback.events().try_recv().is_err());

    playback.resume();
    loop {
        match playback.next_event(WAIT) {
            Some(FrameEvent::EndOfStream) => break,
            Some(_) => {},
            None => panic!("timed out waiting for playback"),
        }
    }
    assert_eq!(source.position(), source.length());
}

#[test]
fn test_dropping_playback_keeps_position() {
    let dir = frame_directory(&["1.png", "2.png"]);
    let source = source_with_frames(&dir);

    {
        let playback = source.start();
        assert!(playback.next_event(WAIT).is_some());
    }

    assert!(source.position() >= 1);
    source.seek(0, crate::source::SeekOrigin::Begin);
    assert_eq!(source.position(), 0);
}

#[test]
fn test_slow_consumer_keeps_queue_bounded() {
    let names: Vec<String> = (1..=20).map(|i| format!("{}.png", i)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let dir = frame_directory(&names);
    let source = DirectoryFrameSource::open(dir.path(), "png", FileOrder::Natural)
        .unwrap()
        .with_loader(byte_loader)
        .with_frame_delay(Duration::from_millis(1));

    let playback = source.start();
    thread::sleep(Duration::from_millis(200));

    // one queued event and one waiting in the timer
    assert!(source.position() <= 2, "timer decoded {} frames ahead", source.position());

    let mut queued = 0;
    while playback.events().try_recv().is_ok() {
        queued += 1;
    }
    assert!(queued <= 2, "{} events were queued", queued);

    let mut indices = Vec::new();
    loop {
        match playback.next_event(WAIT) {
            Some(FrameEvent::Frame(frame)) => indices.push(frame.index),
            Some(FrameEvent::Failed { error, .. }) => panic!("unexpected failure: {}", error),
            Some(FrameEvent::EndOfStream) => break,
            None => panic!("timed out waiting for playback"),
        }
    }
    assert_eq!(indices.last(), Some(&19));
    playback.stop();
}

#[test]
fn test_end_of_stream_does_not_pile_up() {
    let dir = frame_directory(&["1.png", "2.png", "3.png"]);
    let source = DirectoryFrameSource::open(dir.path(), "png", FileOrder::Natural)
        .unwrap()
        .with_loader(byte_loader)
        .with_frame_delay(Duration::from_millis(1));

    let playback = source.start();
    let mut frames = 0;
    let mut end_events = 0;
    let deadline = std::time::Instant::now() + Duration::from_millis(500);
    while std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(100));
        while let Ok(event) = playback.events().try_recv() {
            match event {
                FrameEvent::Frame(_) => frames += 1,
                FrameEvent::EndOfStream => end_events += 1,
                FrameEvent::Failed { error, .. } => panic!("unexpected failure: {}", error),
            }
        }
    }

    assert_eq!(frames, 3);
    // at most a couple of end markers per drain, not one per tick
    assert!(end_events <= 10, "{} end-of-stream events were queued", end_events);
    playback.stop();
}
