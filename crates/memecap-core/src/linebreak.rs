//! Greedy word wrapping against a pixel budget
//!
//! Text is split on single spaces. Every word is measured with one trailing
//! space and added to the current line while the line still fits; the first
//! word that would overflow opens the next line. Words are never split, so a
//! word wider than the budget sits alone on its own line.
//!
//! Splitting on single spaces keeps empty words. Leading, trailing, and
//! doubled spaces therefore take up room (one space each) and survive the
//! round trip: joining a line's words with `" "` gives back the exact source
//! text of that line.

use crate::{
    error::{MemecapError, Result},
    measure::TextMeasurer,
    FontFamily,
};

/// One wrapped line: consecutive words that share a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    key: u64,
    words: Vec<String>,
}

impl Line {
    pub fn new(key: u64, words: Vec<String>) -> Self {
        Self { key, words }
    }

    /// The partition key, starting at 1 and strictly increasing per line
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words joined with single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Rendered width of [`text`](Self::text), without a trailing space
    pub fn width(&self, measurer: &TextMeasurer<'_>, family: &FontFamily, size_px: f32) -> Result<f32> {
        measurer.measure(&self.text(), family, size_px)
    }
}

/// Breaks text into [`Line`]s that fit a width budget
#[derive(Clone, Copy)]
pub struct LineBreaker<'a> {
    measurer: TextMeasurer<'a>,
}

impl<'a> LineBreaker<'a> {
    pub fn new(measurer: TextMeasurer<'a>) -> Self {
        Self { measurer }
    }

    pub fn measurer(&self) -> &TextMeasurer<'a> {
        &self.measurer
    }

    /// Partition `text` into lines no wider than `width_budget`
    ///
    /// A budget of zero or less puts every word on its own line. An infinite
    /// budget keeps everything on one line. Empty text gives a single line
    /// holding one empty word.
    pub fn break_into_lines(
        &self,
        text: &str,
        width_budget: f32,
        family: &FontFamily,
        size_px: f32,
    ) -> Result<Vec<Line>> {
        if width_budget.is_nan() {
            return Err(MemecapError::InvalidArgument(
                "line width budget is NaN".to_string(),
            ));
        }
        if !size_px.is_finite() {
            return Err(MemecapError::InvalidArgument(format!(
                "font size must be a finite number, got {}",
                size_px
            )));
        }

        let words = text.split(' ');

        if width_budget <= 0.0 {
            let lines: Vec<Line> = words
                .enumerate()
                .map(|(position, word)| Line::new(position as u64 + 1, vec![word.to_string()]))
                .collect();
            log::debug!(
                "Budget {} leaves no room, {} words on {} lines",
                width_budget,
                lines.len(),
                lines.len()
            );
            return Ok(lines);
        }

        let mut lines = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut used = 0.0_f32;

        for word in words {
            let piece = format!("{} ", word);
            // Continue the line's running sum so it rounds like one measure() call
            let total = self.measurer.extend(used, &piece, family, size_px)?;

            if !current.is_empty() && total > width_budget {
                let key = lines.len() as u64 + 1;
                lines.push(Line::new(key, std::mem::take(&mut current)));
                used = self.measurer.measure(&piece, family, size_px)?;
            } else {
                used = total;
            }
            current.push(word.to_string());
        }

        let key = lines.len() as u64 + 1;
        lines.push(Line::new(key, current));

        log::debug!(
            "Broke {} chars into {} lines at {}px {} (budget {})",
            text.len(),
            lines.len(),
            size_px,
            family,
            width_budget
        );
        Ok(lines)
    }
}
