//! Caption text arriving over time
//!
//! Each input line sets one slot: `top: text` or `bottom: text`. Blank
//! lines and lines starting with `#` are ignored.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use memecap_core::{
    error::{MemecapError, Result},
    CaptionText,
};

/// Which caption an event updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionSlot {
    Top,
    Bottom,
}

impl fmt::Display for CaptionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// The full new text of one caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEvent {
    pub slot: CaptionSlot,
    pub text: String,
}

impl FromStr for CaptionEvent {
    type Err = MemecapError;

    fn from_str(line: &str) -> Result<Self> {
        let (slot, text) = line.split_once(':').ok_or_else(|| {
            MemecapError::InvalidArgument(format!("expected 'top: …' or 'bottom: …', got {:?}", line))
        })?;

        let slot = match slot.trim().to_ascii_lowercase().as_str() {
            "top" => CaptionSlot::Top,
            "bottom" => CaptionSlot::Bottom,
            other => {
                return Err(MemecapError::InvalidArgument(format!(
                    "unknown caption slot {:?}",
                    other
                )))
            }
        };

        // One space after the colon is separator, the rest is caption
        let text = text.strip_prefix(' ').unwrap_or(text);
        Ok(Self {
            slot,
            text: text.to_string(),
        })
    }
}

/// The latest text of both captions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionState {
    text: CaptionText,
}

impl CaptionState {
    pub fn new(initial: CaptionText) -> Self {
        Self { text: initial }
    }

    /// Apply `event`, reporting whether anything changed
    pub fn apply(&mut self, event: CaptionEvent) -> bool {
        let slot = match event.slot {
            CaptionSlot::Top => &mut self.text.top,
            CaptionSlot::Bottom => &mut self.text.bottom,
        };
        if *slot == event.text {
            return false;
        }
        *slot = event.text;
        true
    }

    pub fn text(&self) -> &CaptionText {
        &self.text
    }
}

/// Parses caption events line by line from a reader
pub struct EventSource<R> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> EventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for EventSource<R> {
    type Item = Result<CaptionEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = self.buffer.trim_end_matches(['\n', '\r']);
                    if line.trim().is_empty() || line.trim_start().starts_with('#') {
                        continue;
                    }
                    return Some(line.parse());
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
