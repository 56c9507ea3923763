//! Command implementations and the plumbing they share

pub mod info;
pub mod lines;
pub mod live;
pub mod render;
pub mod shapes;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use memecap_core::{
    error::{MemecapError, Result},
    CaptionOptions, CaptionText, FontFamily, Surface, SurfaceSize, TextMeasurer, WidthProbe,
    Writer,
};
use memecap_export::write_bitmap;
use memecap_fontdb::FontDatabase;
use memecap_render_json::RecordingSurface;
use memecap_render_skia::{FontProbe, SkiaSurface};

use crate::cli::{FontArgs, OutputFormat, StyleArgs};
use crate::config::Config;

/// Every character is `ratio` wide at 1px
pub struct MonospaceProbe {
    ratio: f32,
}

impl MonospaceProbe {
    pub fn new(ratio: f32) -> Result<Self> {
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(MemecapError::InvalidArgument(format!(
                "monospace ratio must be a non-negative number, got {}",
                ratio
            )));
        }
        Ok(Self { ratio })
    }
}

impl WidthProbe for MonospaceProbe {
    fn name(&self) -> &'static str {
        "monospace"
    }

    fn probe(&self, _ch: char, _family: &FontFamily) -> Result<f32> {
        Ok(self.ratio)
    }
}

/// Fonts for drawing and widths for layout
pub struct FontSetup {
    pub fonts: Arc<FontDatabase>,
    pub probe: Arc<dyn WidthProbe>,
    /// Family from `--family`, or the family of `--font-file`
    pub family: Option<FontFamily>,
}

impl FontSetup {
    pub fn from_args(args: &FontArgs) -> Result<Self> {
        let fonts = Arc::new(FontDatabase::with_system_fonts());
        let mut family = args.family.as_deref().map(FontFamily::new);

        if let Some(path) = &args.font_file {
            let font = fonts.load_font_file(path)?;
            match &family {
                Some(name) => fonts.register(name.clone(), font),
                None => family = font.family_name().map(FontFamily::new),
            }
        }

        let probe: Arc<dyn WidthProbe> = match args.monospace {
            Some(ratio) => Arc::new(MonospaceProbe::new(ratio)?),
            None => Arc::new(FontProbe::new(Arc::clone(&fonts))),
        };
        log::debug!(
            "Measuring with the {} probe, family {:?}",
            probe.name(),
            family
        );

        Ok(Self {
            fonts,
            probe,
            family,
        })
    }

    pub fn measurer(&self) -> TextMeasurer<'_> {
        TextMeasurer::global(self.probe.as_ref())
    }

    /// The family to lay out with when no caption option names one
    pub fn family_or_default(&self) -> FontFamily {
        self.family.clone().unwrap_or_else(FontFamily::impact)
    }
}

/// Top and bottom options from defaults, `--config`, then the style flags
pub fn caption_options(
    style: &StyleArgs,
    family: Option<FontFamily>,
) -> Result<(CaptionOptions, CaptionOptions)> {
    let config = match &style.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let (top, bottom) = config.caption_options(&style.overrides(family));
    top.validate()?;
    bottom.validate()?;
    Ok((top, bottom))
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_size(spec: &str) -> Result<SurfaceSize> {
    let invalid = || MemecapError::InvalidArgument(format!("expected WIDTHxHEIGHT, got {:?}", spec));
    let (width, height) = spec
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width = width.trim().parse().map_err(|_| invalid())?;
    let height = height.trim().parse().map_err(|_| invalid())?;
    Ok(SurfaceSize::new(width, height))
}

/// Draw one frame with `writer` and write it to `output`
pub fn write_frame(
    writer: &Writer,
    text: &CaptionText,
    setup: &FontSetup,
    format: OutputFormat,
    output: &Path,
) -> Result<()> {
    let size = writer.size();
    let measurer = setup.measurer();

    match format.image_format() {
        Some(image_format) => {
            let mut surface = SkiaSurface::new(size.width, size.height, Arc::clone(&setup.fonts))?;
            writer.write(&mut surface, &measurer, text)?;
            write_bitmap(&surface.snapshot(), image_format.exporter().as_ref(), output)
        }
        None => {
            let mut surface =
                RecordingSurface::new(size.width, size.height).with_probe(Arc::clone(&setup.probe));
            writer.write(&mut surface, &measurer, text)?;
            write_recording(&surface, output)
        }
    }
}

pub fn write_recording(surface: &RecordingSurface, output: &Path) -> Result<()> {
    fs::write(output, surface.to_json()?)?;
    log::info!(
        "Wrote {} {} commands to {}",
        surface.commands().len(),
        surface.name(),
        output.display()
    );
    Ok(())
}
