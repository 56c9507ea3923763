//! PNG export through the `image` crate

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use memecap_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::{BitmapData, BitmapFormat},
};

/// Encode any supported bitmap layout as an RGBA PNG
pub fn encode_bitmap_to_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    let expected = bitmap.expected_len();
    if bitmap.data.len() < expected {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer too small: expected {} bytes for {}x{} {:?}, got {}",
            expected,
            bitmap.width,
            bitmap.height,
            bitmap.format,
            bitmap.data.len()
        ))
        .into());
    }

    let rgba_data: Vec<u8> = match bitmap.format {
        BitmapFormat::Rgba8 => bitmap.data[..expected].to_vec(),
        BitmapFormat::Rgb8 => bitmap.data[..expected]
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        BitmapFormat::Gray8 => bitmap.data[..expected]
            .iter()
            .flat_map(|&gray| [gray, gray, gray, 255])
            .collect(),
    };

    let img: RgbaImage = ImageBuffer::from_raw(bitmap.width, bitmap.height, rgba_data)
        .ok_or_else(|| ExportError::EncodingFailed("Failed to create image buffer".into()))?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), bitmap.width, bitmap.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// Writes finished memes as PNG
#[derive(Debug, Default, Clone, Copy)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_export_rgba() {
        let bitmap = BitmapData::rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, // red
                0, 255, 0, 255, // green
                0, 0, 255, 255, // blue
                255, 255, 255, 255, // white
            ],
        );

        let png_data = PngExporter::new().export(&bitmap).unwrap();
        assert_eq!(&png_data[0..8], &PNG_MAGIC);

        let decoded = image::load_from_memory(&png_data).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_png_export_grayscale() {
        let bitmap = BitmapData {
            width: 2,
            height: 2,
            format: BitmapFormat::Gray8,
            data: vec![0, 128, 192, 255],
        };

        let png_data = encode_bitmap_to_png(&bitmap).unwrap();
        assert_eq!(&png_data[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let bitmap = BitmapData::rgba(4, 4, vec![0; 7]);
        assert!(encode_bitmap_to_png(&bitmap).is_err());
    }
}
