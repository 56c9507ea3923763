//! Everything a render waits on: the background image and the caption text
//!
//! The image has to load before anything can be drawn, so loading is a
//! plain fallible call whose output a [`Writer`](memecap_core::Writer)
//! requires. Caption text arrives later, as a stream of [`CaptionEvent`]s.

use std::path::Path;

use memecap_core::{
    error::{ResourceLoadError, Result},
    types::BitmapData,
};

pub mod events;

pub use events::{CaptionEvent, CaptionSlot, CaptionState, EventSource};

/// Decode an image file into straight-alpha RGBA
pub fn load_image(path: impl AsRef<Path>) -> Result<BitmapData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ResourceLoadError::NotFound(path.display().to_string()).into());
    }

    let decoded = image::open(path).map_err(|e| ResourceLoadError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let bitmap = into_bitmap(decoded);
    log::info!(
        "Loaded background {} ({}x{})",
        path.display(),
        bitmap.width,
        bitmap.height
    );
    Ok(bitmap)
}

/// Decode in-memory image bytes; `label` names the source in errors
pub fn load_image_from_memory(bytes: &[u8], label: &str) -> Result<BitmapData> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ResourceLoadError::Decode {
        path: label.to_string(),
        reason: e.to_string(),
    })?;
    Ok(into_bitmap(decoded))
}

fn into_bitmap(decoded: image::DynamicImage) -> BitmapData {
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    BitmapData::rgba(width, height, rgba.into_raw())
}
