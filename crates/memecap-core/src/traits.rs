//! The contracts between caption layout and the outside world
//!
//! Layout never touches fonts or pixels directly. It asks a [`WidthProbe`]
//! how wide characters are, tells a [`Surface`] what to draw, and hands the
//! finished pixels to an [`Exporter`].

use crate::{
    error::Result,
    types::BitmapData,
    FontFamily, TextStyle,
};

/// Where character widths come from
///
/// A probe renders (or looks up) one character at a 1px nominal size and
/// reports its advance. The answer must depend only on the character and the
/// family, because the [`MetricsCache`](crate::MetricsCache) keeps it for the
/// rest of the process.
///
/// ```ignore
/// struct FixedProbe;
///
/// impl WidthProbe for FixedProbe {
///     fn name(&self) -> &'static str {
///         "fixed"
///     }
///
///     fn probe(&self, _ch: char, _family: &FontFamily) -> Result<f32> {
///         Ok(0.6)
///     }
/// }
/// ```
pub trait WidthProbe: Send + Sync {
    /// Used in logs when a metrics table gets built
    fn name(&self) -> &'static str;

    /// Width of `ch` in `family` at a 1px font size
    fn probe(&self, ch: char, family: &FontFamily) -> Result<f32>;
}

/// A 2D drawing target with canvas-like state
///
/// Text commands use whatever [`TextStyle`] was last set. Shape fills use the
/// style's fill color. Coordinates are in surface pixels with the origin at
/// the top-left corner.
pub trait Surface {
    /// Identify the backend in logs
    fn name(&self) -> &'static str;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Blit `image` scaled into the `width` x `height` box at (`x`, `y`)
    fn draw_image(
        &mut self,
        image: &BitmapData,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()>;

    /// Replace the drawing-context style
    fn set_style(&mut self, style: TextStyle);

    /// The style text commands currently use
    fn style(&self) -> &TextStyle;

    /// Outline `text` with the current stroke width, join, and stroke color
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;

    /// Paint `text` with the current fill color
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;

    /// Native width of `text` under the current font
    fn measure_text(&self, text: &str) -> Result<f32>;

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()>;

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()>;
}

/// The final step: pixels become files
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the bitmap as bytes
    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
