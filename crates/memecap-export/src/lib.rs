//! Turning a finished surface into a file
//!
//! PNG is the everyday format. Binary PNM is there for pipelines that want
//! raw pixels without a codec.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use memecap_core::{
    error::{ExportError, MemecapError, Result},
    traits::Exporter,
    types::{BitmapData, BitmapFormat},
};

pub mod png;

pub use png::{encode_bitmap_to_png, PngExporter};

/// Binary PNM flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// P5, one luminance byte per pixel
    Pgm,
    /// P6, three color bytes per pixel
    Ppm,
}

/// Writes raw-pixel PNM files; alpha is dropped
#[derive(Debug, Clone, Copy)]
pub struct PnmExporter {
    format: PnmFormat,
}

impl PnmExporter {
    pub fn new(format: PnmFormat) -> Self {
        Self { format }
    }

    pub fn ppm() -> Self {
        Self::new(PnmFormat::Ppm)
    }

    pub fn pgm() -> Self {
        Self::new(PnmFormat::Pgm)
    }

    fn pixels(bitmap: &BitmapData) -> Result<impl Iterator<Item = [u8; 3]> + '_> {
        let expected = bitmap.expected_len();
        if bitmap.data.len() < expected {
            return Err(ExportError::EncodingFailed(format!(
                "Buffer too small: expected {} bytes, got {}",
                expected,
                bitmap.data.len()
            ))
            .into());
        }

        let step = bitmap.format.bytes_per_pixel();
        let format = bitmap.format;
        Ok(bitmap.data[..expected].chunks_exact(step).map(move |px| match format {
            BitmapFormat::Rgba8 | BitmapFormat::Rgb8 => [px[0], px[1], px[2]],
            BitmapFormat::Gray8 => [px[0], px[0], px[0]],
        }))
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "pgm",
            PnmFormat::Ppm => "ppm",
        }
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(bitmap.width as usize * bitmap.height as usize * 3 + 20);
        let magic = match self.format {
            PnmFormat::Pgm => "P5",
            PnmFormat::Ppm => "P6",
        };
        write!(output, "{}\n{} {}\n255\n", magic, bitmap.width, bitmap.height)?;

        for [r, g, b] in Self::pixels(bitmap)? {
            match self.format {
                PnmFormat::Ppm => output.extend_from_slice(&[r, g, b]),
                PnmFormat::Pgm => {
                    let gray = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
                    output.push(gray as u8);
                }
            }
        }
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        self.name()
    }

    fn mime_type(&self) -> &'static str {
        match self.format {
            PnmFormat::Pgm => "image/x-portable-graymap",
            PnmFormat::Ppm => "image/x-portable-pixmap",
        }
    }
}

/// Output formats a finished bitmap can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Ppm,
    Pgm,
}

impl ImageFormat {
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Png => Box::new(PngExporter::new()),
            Self::Ppm => Box::new(PnmExporter::ppm()),
            Self::Pgm => Box::new(PnmExporter::pgm()),
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Png, Self::Ppm, Self::Pgm]
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Png => "png",
            Self::Ppm => "ppm",
            Self::Pgm => "pgm",
        })
    }
}

impl FromStr for ImageFormat {
    type Err = MemecapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "ppm" => Ok(Self::Ppm),
            "pgm" => Ok(Self::Pgm),
            other => Err(ExportError::FormatNotSupported(other.to_string()).into()),
        }
    }
}

/// Encode `bitmap` and write it to `path`
pub fn write_bitmap(
    bitmap: &BitmapData,
    exporter: &dyn Exporter,
    path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = exporter.export(bitmap)?;
    std::fs::write(path.as_ref(), &bytes)?;
    log::info!(
        "Wrote {} bytes of {} to {}",
        bytes.len(),
        exporter.name(),
        path.as_ref().display()
    );
    Ok(())
}
