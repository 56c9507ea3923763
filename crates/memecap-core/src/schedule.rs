//! Render coalescing: at most one pending frame, newest request wins
//!
//! Typing fires an event per keystroke but only the latest text is worth
//! drawing. Requests overwrite each other until the next frame tick takes
//! whatever is pending.

/// Holds the one value waiting for the next frame
#[derive(Debug)]
pub struct FrameScheduler<T> {
    pending: Option<T>,
    requests: u64,
    superseded: u64,
    frames: u64,
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            requests: 0,
            superseded: 0,
            frames: 0,
        }
    }

    /// Queue `value` for the next frame
    ///
    /// Returns `true` if it replaced a request that never got drawn.
    pub fn request(&mut self, value: T) -> bool {
        self.requests += 1;
        let replaced = self.pending.replace(value).is_some();
        if replaced {
            self.superseded += 1;
        }
        replaced
    }

    /// Run `frame` on the pending value, if there is one
    pub fn run_frame<R>(&mut self, frame: impl FnOnce(T) -> R) -> Option<R> {
        let value = self.pending.take()?;
        self.frames += 1;
        Some(frame(value))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Total requests made
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Requests overwritten before they were drawn
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Frames that actually ran
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
