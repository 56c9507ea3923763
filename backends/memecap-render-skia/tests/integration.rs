//! Integration tests for the Skia surface
//!
//! Text checks need a real font; on hosts without any installed they
//! return early.

use std::sync::Arc;

use memecap_core::{
    types::BitmapData, Caption, CaptionOptions, CaptionText, FontFamily, MetricsCache, Surface,
    SurfaceSize, TextAlign, TextMeasurer, TextStyle, Writer,
};
use memecap_fontdb::FontDatabase;
use memecap_render_skia::{FontProbe, SkiaSurface};

/// System fonts with the first installed family also answering to "Impact"
fn fonts() -> Option<Arc<FontDatabase>> {
    let db = FontDatabase::with_system_fonts();
    let family = db.families().into_iter().next()?;
    let font = db.resolve(&FontFamily::new(family)).ok()?;
    font.glyph_id('M')?;
    db.register(FontFamily::impact(), font);
    Some(Arc::new(db))
}

fn opaque_columns(bitmap: &BitmapData) -> Vec<u32> {
    (0..bitmap.width)
        .filter(|&x| {
            (0..bitmap.height).any(|y| bitmap.data[((y * bitmap.width + x) * 4 + 3) as usize] > 0)
        })
        .collect()
}

#[test]
fn test_surface_name() {
    let surface = SkiaSurface::new(1, 1, Arc::new(FontDatabase::new())).unwrap();
    assert_eq!(surface.name(), "skia");
}

#[test]
fn test_fill_text_marks_pixels() {
    let Some(fonts) = fonts() else {
        return;
    };
    let mut surface = SkiaSurface::new(200, 80, fonts).unwrap();
    surface.set_style(TextStyle {
        font: memecap_core::FontSpec::new(FontFamily::impact(), 40.0),
        ..TextStyle::default()
    });

    surface.fill_text("MEME", 10.0, 60.0).unwrap();
    assert!(surface.snapshot().data.chunks(4).any(|px| px[3] > 0));
}

#[test]
fn test_blank_text_draws_nothing() {
    let Some(fonts) = fonts() else {
        return;
    };
    let mut surface = SkiaSurface::new(50, 50, fonts).unwrap();
    surface.set_style(TextStyle {
        font: memecap_core::FontSpec::new(FontFamily::impact(), 20.0),
        ..TextStyle::default()
    });

    surface.stroke_text("   ", 25.0, 25.0).unwrap();
    surface.fill_text("", 25.0, 25.0).unwrap();
    assert!(surface.snapshot().data.iter().all(|&b| b == 0));
}

#[test]
fn test_centered_text_straddles_x() {
    let Some(fonts) = fonts() else {
        return;
    };
    let mut surface = SkiaSurface::new(300, 80, fonts).unwrap();
    surface.set_style(TextStyle {
        font: memecap_core::FontSpec::new(FontFamily::impact(), 40.0),
        text_align: TextAlign::Center,
        ..TextStyle::default()
    });

    surface.fill_text("MMMM", 150.0, 60.0).unwrap();
    let columns = opaque_columns(&surface.snapshot());
    let (first, last) = (columns[0], columns[columns.len() - 1]);
    assert!(first < 150 && last > 150, "ink spans {}..{}", first, last);
}

#[test]
fn test_native_width_matches_probe() {
    let Some(fonts) = fonts() else {
        return;
    };
    let mut surface = SkiaSurface::new(10, 10, Arc::clone(&fonts)).unwrap();
    surface.set_style(TextStyle {
        font: memecap_core::FontSpec::new(FontFamily::impact(), 32.0),
        ..TextStyle::default()
    });

    let probe = FontProbe::new(fonts);
    let cache = MetricsCache::new();
    let measurer = TextMeasurer::new(&cache, &probe);

    let native = surface.measure_text("such wow").unwrap();
    let scaled = measurer.measure("such wow", &FontFamily::impact(), 32.0).unwrap();
    assert!((native - scaled).abs() < 0.5, "native {} vs scaled {}", native, scaled);
}

#[test]
fn test_writer_paints_background_and_captions() {
    let Some(fonts) = fonts() else {
        return;
    };
    let background = BitmapData::rgba(100, 100, [0, 0, 255, 255].repeat(100 * 100));
    let size = SurfaceSize::doubled(&background);
    let writer = Writer::new(size, background).unwrap();
    let mut surface = SkiaSurface::new(size.width, size.height, Arc::clone(&fonts)).unwrap();

    let probe = FontProbe::new(fonts);
    let cache = MetricsCache::new();
    let measurer = TextMeasurer::new(&cache, &probe);
    writer
        .write(&mut surface, &measurer, &CaptionText::new("TOP", "BOTTOM"))
        .unwrap();

    let bitmap = surface.snapshot();
    assert_eq!((bitmap.width, bitmap.height), (200, 200));
    // Middle of the image is untouched background
    let center = ((100 * 200 + 100) * 4) as usize;
    assert_eq!(&bitmap.data[center..center + 4], &[0, 0, 255, 255]);
    // Captions put light fill somewhere over the blue
    assert!(bitmap.data.chunks(4).any(|px| px[0] > 200 && px[1] > 200));
}

#[test]
fn test_caption_lines_fit_inside_margins() {
    let Some(fonts) = fonts() else {
        return;
    };
    let mut surface = SkiaSurface::new(400, 400, Arc::clone(&fonts)).unwrap();
    let probe = FontProbe::new(fonts);
    let cache = MetricsCache::new();
    let measurer = TextMeasurer::new(&cache, &probe);

    let block = Caption::new(
        "one does not simply walk into mordor",
        CaptionOptions::top(),
    )
    .draw(&mut surface, &measurer)
    .unwrap();

    for placed in &block.lines {
        let width = placed
            .line
            .width(&measurer, &block.font.family, block.font.size_px)
            .unwrap();
        assert!(width <= block.width_budget || placed.line.words().len() == 1);
    }
}
