//! Memecap Core: from typed text to captioned pixels
//!
//! A caption is just a string until something decides where its lines break.
//! This crate holds that decision and everything it leans on.
//!
//! ## The Flow
//!
//! Every caption follows the same path:
//!
//! 1. **Probing** - A [`WidthProbe`] reports how wide each character is at 1px
//! 2. **Caching** - The [`MetricsCache`] remembers those ratios per font family
//! 3. **Measuring** - The [`TextMeasurer`] scales ratios to any pixel size
//! 4. **Breaking** - The [`LineBreaker`] groups words into lines that fit
//! 5. **Placing** - The [`Caption`] anchors lines to the top, middle, or bottom
//! 6. **Drawing** - A [`Surface`] receives stroke and fill commands
//!
//! ## Lay Out Your First Caption
//!
//! ```rust
//! use memecap_core::{FontFamily, LineBreaker, MetricsCache, TextMeasurer, WidthProbe};
//!
//! struct Monospace;
//!
//! impl WidthProbe for Monospace {
//!     fn name(&self) -> &'static str {
//!         "monospace"
//!     }
//!
//!     fn probe(&self, _ch: char, _family: &FontFamily) -> memecap_core::Result<f32> {
//!         Ok(0.5)
//!     }
//! }
//!
//! let cache = MetricsCache::new();
//! let measurer = TextMeasurer::new(&cache, &Monospace);
//! let breaker = LineBreaker::new(measurer);
//!
//! let lines = breaker.break_into_lines("one does not simply", 130.0, &FontFamily::impact(), 20.0)?;
//! assert_eq!(lines[0].text(), "one does not");
//! # Ok::<(), memecap_core::MemecapError>(())
//! ```
//!
//! ## The Traits That Hold It Together
//!
//! - [`WidthProbe`] - Where font metrics come from
//! - [`Surface`] - Where draw commands go
//! - [`Exporter`] - Where finished pixels become files

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod caption;
pub mod error;
pub mod linebreak;
pub mod measure;
pub mod metrics;
pub mod schedule;
pub mod shapes;
pub mod traits;
pub mod writer;

#[cfg(test)]
mod proptests;

pub use caption::{
    vertical_position, Caption, CaptionBlock, CaptionOptions, CaptionOverrides, PlacedLine,
};
pub use error::{MemecapError, Result};
pub use linebreak::{Line, LineBreaker};
pub use measure::TextMeasurer;
pub use metrics::{MetricsCache, MetricsTable, PRESET_SOURCE, REFERENCE_RANGE};
pub use schedule::FrameScheduler;
pub use shapes::{Artist, Circle, Rectangle, Square};
pub use traits::{Exporter, Surface, WidthProbe};
pub use writer::{CaptionText, SurfaceSize, Writer};

/// Pixel buffers that move between loaders, surfaces, and exporters
pub mod types {
    /// Raw pixel data, row-major, no padding between rows
    #[derive(Debug, Clone, PartialEq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub format: BitmapFormat,
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// Wrap straight-alpha RGBA pixels
        pub fn rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
            Self {
                width,
                height,
                format: BitmapFormat::Rgba8,
                data,
            }
        }

        /// Bytes the buffer must hold for its dimensions and format
        pub fn expected_len(&self) -> usize {
            let pixels = self.width as usize * self.height as usize;
            pixels * self.format.bytes_per_pixel()
        }
    }

    /// How pixels are arranged in the bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitmapFormat {
        Rgba8,
        Rgb8,
        Gray8,
    }

    impl BitmapFormat {
        pub fn bytes_per_pixel(self) -> usize {
            match self {
                Self::Rgba8 => 4,
                Self::Rgb8 => 3,
                Self::Gray8 => 1,
            }
        }
    }
}

/// A font family name, used as the identity of a metrics table
///
/// Two families are the same family only if their names match exactly;
/// no case folding or alias resolution happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontFamily(String);

impl FontFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The classic caption face
    pub fn impact() -> Self {
        Self::new("Impact")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FontFamily {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FontFamily {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A family at a concrete pixel size
///
/// Built fresh for every render because the size follows the surface height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(family: FontFamily, size_px: f32) -> Self {
        Self { family, size_px }
    }
}

impl fmt::Display for FontSpec {
    /// CSS shorthand, e.g. `48px Impact`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Where a block of wrapped lines sits vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Middle,
    Bottom,
}

/// How stroked outline segments meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Which point of a line the draw x coordinate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which point of a line the draw y coordinate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

impl From<Anchor> for TextBaseline {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Top => Self::Top,
            Anchor::Middle => Self::Middle,
            Anchor::Bottom => Self::Bottom,
        }
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "white" => Self::white(),
            "black" => Self::black(),
            "transparent" => Self::transparent(),
            "red" => Self::rgba(255, 0, 0, 255),
            "green" => Self::rgba(0, 128, 0, 255),
            "blue" => Self::rgba(0, 0, 255, 255),
            "yellow" => Self::rgba(255, 255, 0, 255),
            "gray" | "grey" => Self::rgba(128, 128, 128, 255),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = MemecapError;

    /// Accepts a CSS color name or hex in `#RRGGBB` / `#RRGGBBAA` form
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(color) = Self::named(&trimmed.to_ascii_lowercase()) {
            return Ok(color);
        }

        let hex = trimmed.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| MemecapError::ConfigError(format!("Invalid color: {}", s)))
        };

        match hex.len() {
            6 => Ok(Self::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(MemecapError::ConfigError(format!(
                "Color must be a name, RRGGBB, or RRGGBBAA: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = MemecapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            color.r, color.g, color.b, color.a
        )
    }
}

/// Drawing-context state a surface applies to every text command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub line_join: LineJoin,
    pub fill_color: Color,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for TextStyle {
    /// Matches a fresh 2D canvas context
    fn default() -> Self {
        Self {
            font: FontSpec::new(FontFamily::new("sans-serif"), 10.0),
            stroke_width: 1.0,
            stroke_color: Color::black(),
            line_join: LineJoin::Miter,
            fill_color: Color::black(),
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}
