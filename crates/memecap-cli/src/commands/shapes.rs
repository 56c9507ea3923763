//! Shapes command implementation

use std::sync::Arc;

use memecap_core::{error::Result, Artist, Surface};
use memecap_export::write_bitmap;
use memecap_fontdb::FontDatabase;
use memecap_render_json::RecordingSurface;
use memecap_render_skia::SkiaSurface;

use super::write_recording;
use crate::cli::{OutputFormat, ShapesArgs};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 2000;

pub fn run(args: &ShapesArgs) -> Result<()> {
    let format = OutputFormat::resolve(args.format, &args.output);

    match format.image_format() {
        Some(image_format) => {
            let mut surface = SkiaSurface::new(WIDTH, HEIGHT, Arc::new(FontDatabase::new()))?;
            paint(&mut surface)?;
            write_bitmap(&surface.snapshot(), image_format.exporter().as_ref(), &args.output)
        }
        None => {
            let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
            paint(&mut surface)?;
            write_recording(&surface, &args.output)
        }
    }
}

fn paint<S: Surface + ?Sized>(surface: &mut S) -> Result<()> {
    surface.clear();
    Artist::new(surface)
        .circle(100.0, 100.0, 60.0)?
        .circle(200.0, 300.0, 80.0)?
        .square(400.0, 200.0, 180.0)?;
    Ok(())
}
