//! Two captions over a background image
//!
//! A [`Writer`] can only exist once the background has been loaded, so a
//! render never runs against a missing image.

use serde::{Deserialize, Serialize};

use crate::{
    caption::{Caption, CaptionBlock, CaptionOptions},
    error::{RenderError, Result},
    measure::TextMeasurer,
    traits::Surface,
    types::BitmapData,
};

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Twice the image's natural size, for crisp text on high-density screens
    pub fn doubled(image: &BitmapData) -> Self {
        Self {
            width: image.width.saturating_mul(2),
            height: image.height.saturating_mul(2),
        }
    }
}

/// The text in each caption slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionText {
    pub top: String,
    pub bottom: String,
}

impl CaptionText {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }
}

/// Draws a background plus top and bottom captions onto a surface
#[derive(Debug, Clone)]
pub struct Writer {
    size: SurfaceSize,
    background: BitmapData,
    top: CaptionOptions,
    bottom: CaptionOptions,
}

impl Writer {
    /// Wrap a loaded background, checking its buffer matches its dimensions
    pub fn new(size: SurfaceSize, background: BitmapData) -> Result<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: size.width,
                height: size.height,
            }
            .into());
        }
        if background.data.len() != background.expected_len() {
            return Err(RenderError::BufferSizeMismatch {
                expected: background.expected_len(),
                actual: background.data.len(),
            }
            .into());
        }

        Ok(Self {
            size,
            background,
            top: CaptionOptions::top(),
            bottom: CaptionOptions::bottom(),
        })
    }

    /// Replace the per-slot caption options
    pub fn with_options(mut self, top: CaptionOptions, bottom: CaptionOptions) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    /// The surface size this writer expects to draw on
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn background(&self) -> &BitmapData {
        &self.background
    }

    pub fn top_options(&self) -> &CaptionOptions {
        &self.top
    }

    pub fn bottom_options(&self) -> &CaptionOptions {
        &self.bottom
    }

    /// Clear, blit the background over the whole surface, then draw both captions
    ///
    /// Returns the top and bottom blocks as laid out.
    pub fn write<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        measurer: &TextMeasurer<'_>,
        text: &CaptionText,
    ) -> Result<(CaptionBlock, CaptionBlock)> {
        if surface.width() != self.size.width || surface.height() != self.size.height {
            log::debug!(
                "{} is {}x{}, writer was sized for {}x{}",
                surface.name(),
                surface.width(),
                surface.height(),
                self.size.width,
                self.size.height
            );
        }

        surface.clear();
        surface.draw_image(
            &self.background,
            0.0,
            0.0,
            surface.width() as f32,
            surface.height() as f32,
        )?;

        let top = Caption::new(text.top.clone(), self.top.clone()).draw(surface, measurer)?;
        let bottom =
            Caption::new(text.bottom.clone(), self.bottom.clone()).draw(surface, measurer)?;
        Ok((top, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemecapError;

    #[test]
    fn test_doubled_size() {
        let image = BitmapData::rgba(320, 240, vec![0; 320 * 240 * 4]);
        assert_eq!(SurfaceSize::doubled(&image), SurfaceSize::new(640, 480));
    }

    #[test]
    fn test_writer_rejects_short_buffer() {
        let image = BitmapData::rgba(4, 4, vec![0; 10]);
        let err = Writer::new(SurfaceSize::new(8, 8), image).unwrap_err();
        assert!(matches!(
            err,
            MemecapError::RenderingFailed(RenderError::BufferSizeMismatch {
                expected: 64,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_writer_rejects_empty_surface() {
        let image = BitmapData::rgba(1, 1, vec![0; 4]);
        assert!(Writer::new(SurfaceSize::new(0, 2), image).is_err());
    }

    #[test]
    fn test_caption_text_deserializes_partially() {
        let text: CaptionText = serde_json::from_str(r#"{"top":"hello"}"#).unwrap();
        assert_eq!(text, CaptionText::new("hello", ""));
    }
}
