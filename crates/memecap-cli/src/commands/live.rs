//! Live command implementation
//!
//! A reader thread turns stdin lines into caption events. The main loop
//! folds them into the current caption text and redraws at most once per
//! frame tick, so a burst of edits costs one render.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use memecap_core::{
    error::{MemecapError, Result},
    CaptionText, FrameScheduler, SurfaceSize, Writer,
};
use memecap_input::{load_image, CaptionEvent, CaptionState, EventSource};

use super::{caption_options, write_frame, FontSetup};
use crate::cli::{LiveArgs, OutputFormat};

pub fn run(args: &LiveArgs) -> Result<()> {
    if args.frame_ms == 0 {
        return Err(MemecapError::InvalidArgument(
            "--frame-ms must be at least 1".to_string(),
        ));
    }

    let background = load_image(&args.image)?;
    let size = SurfaceSize::doubled(&background);
    let setup = FontSetup::from_args(&args.font)?;
    let (top, bottom) = caption_options(&args.style, setup.family.clone())?;
    let writer = Writer::new(size, background)?.with_options(top, bottom);
    let format = OutputFormat::resolve(args.format, &args.output);

    let events = spawn_reader();
    let mut state = CaptionState::new(CaptionText::default());
    let mut scheduler = FrameScheduler::new();
    let tick = Duration::from_millis(args.frame_ms);

    // The first frame shows the bare image
    scheduler.request(state.text().clone());

    let mut open = true;
    while open || scheduler.has_pending() {
        if open {
            open = drain(&events, tick, &mut state, &mut scheduler);
        }

        if let Some(result) = scheduler.run_frame(|text: CaptionText| {
            write_frame(&writer, &text, &setup, format, &args.output)
        }) {
            match result {
                Ok(()) => log::debug!("Frame {} written", scheduler.frames()),
                Err(e) => log::warn!("Frame {} failed: {}", scheduler.frames(), e),
            }
        }
    }

    log::info!(
        "{} caption updates, {} frames, {} skipped",
        scheduler.requests(),
        scheduler.frames(),
        scheduler.superseded()
    );
    Ok(())
}

/// Read caption events from stdin on a background thread
fn spawn_reader() -> Receiver<Result<CaptionEvent>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for event in EventSource::new(stdin.lock()) {
            if sender.send(event).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Wait up to one tick for events, then take everything queued
///
/// Returns `false` once the reader has hung up.
fn drain(
    events: &Receiver<Result<CaptionEvent>>,
    tick: Duration,
    state: &mut CaptionState,
    scheduler: &mut FrameScheduler<CaptionText>,
) -> bool {
    let first = match events.recv_timeout(tick) {
        Ok(event) => event,
        Err(RecvTimeoutError::Timeout) => return true,
        Err(RecvTimeoutError::Disconnected) => return false,
    };

    for event in std::iter::once(first).chain(events.try_iter()) {
        match event {
            Ok(event) => {
                log::debug!("{} caption: {:?}", event.slot, event.text);
                if state.apply(event) {
                    scheduler.request(state.text().clone());
                }
            }
            Err(e) => log::warn!("Ignoring input line: {}", e),
        }
    }
    true
}
