//! Text width from cached per-character ratios
//!
//! Widths scale linearly: a ratio probed at 1px times the font size. This
//! skips re-probing for every size at the cost of sub-pixel drift against a
//! native measurement at the target size. Kerning is ignored.

use crate::{
    error::{MemecapError, Result},
    metrics::MetricsCache,
    traits::WidthProbe,
    FontFamily,
};

/// Measures strings against a [`MetricsCache`], probing through a [`WidthProbe`]
#[derive(Clone, Copy)]
pub struct TextMeasurer<'a> {
    cache: &'a MetricsCache,
    probe: &'a dyn WidthProbe,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(cache: &'a MetricsCache, probe: &'a dyn WidthProbe) -> Self {
        Self { cache, probe }
    }

    /// Measure with the process-wide cache
    ///
    /// The global cache holds one table per family, built by whichever probe
    /// asked first; see [`MetricsCache::global`].
    pub fn global(probe: &'a dyn WidthProbe) -> Self {
        Self::new(MetricsCache::global(), probe)
    }

    /// Width of `ch` at 1px
    pub fn width_ratio(&self, ch: char, family: &FontFamily) -> Result<f32> {
        self.cache.width_ratio(ch, family, self.probe)
    }

    /// Pixel width of `text` at `size_px`
    ///
    /// The empty string is 0 wide. A non-finite size is rejected before any
    /// table is touched.
    pub fn measure(&self, text: &str, family: &FontFamily, size_px: f32) -> Result<f32> {
        self.extend(0.0, text, family, size_px)
    }

    /// `start` plus the width of `text`, summed left to right
    ///
    /// Continuing a running width this way rounds exactly like measuring the
    /// whole string at once, so `extend(measure(a), b)` equals `measure(a + b)`
    /// bit for bit. A sum that overflows to infinity is `InvalidArgument`.
    pub fn extend(&self, start: f32, text: &str, family: &FontFamily, size_px: f32) -> Result<f32> {
        if !size_px.is_finite() {
            return Err(MemecapError::InvalidArgument(format!(
                "font size must be a finite number, got {}",
                size_px
            )));
        }
        if text.is_empty() {
            return Ok(start);
        }

        let table = self.cache.table(family, self.probe)?;
        let total = text.chars().try_fold(start, |total, ch| {
            let ratio = table.ratio(ch).ok_or_else(|| MemecapError::MissingMetric {
                ch,
                family: family.to_string(),
            })?;
            Ok::<f32, MemecapError>(total + ratio * size_px)
        })?;

        if !total.is_finite() {
            return Err(MemecapError::InvalidArgument(format!(
                "width of {:?} at {}px overflows",
                text, size_px
            )));
        }
        Ok(total)
    }

    pub fn cache(&self) -> &'a MetricsCache {
        self.cache
    }

    pub fn probe(&self) -> &'a dyn WidthProbe {
        self.probe
    }
}
