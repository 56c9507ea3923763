//! Render command implementation
//!
//! Loads the background, lays out both captions, writes one image or one
//! JSON recording.

use memecap_core::{error::Result, CaptionText, SurfaceSize, Writer};
use memecap_input::load_image;

use super::{caption_options, parse_size, write_frame, FontSetup};
use crate::cli::{OutputFormat, RenderArgs};

pub fn run(args: &RenderArgs) -> Result<()> {
    let background = load_image(&args.image)?;
    let size = match &args.size {
        Some(spec) => parse_size(spec)?,
        None => SurfaceSize::doubled(&background),
    };

    let setup = FontSetup::from_args(&args.font)?;
    let (top, bottom) = caption_options(&args.style, setup.family.clone())?;
    let writer = Writer::new(size, background)?.with_options(top, bottom);

    let format = OutputFormat::resolve(args.format, &args.output);
    let text = CaptionText::new(args.top.as_str(), args.bottom.as_str());
    write_frame(&writer, &text, &setup, format, &args.output)?;

    log::info!(
        "Rendered {}x{} {:?} to {}",
        size.width,
        size.height,
        format,
        args.output.display()
    );
    Ok(())
}
