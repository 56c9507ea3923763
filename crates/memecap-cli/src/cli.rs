//! CLI argument definitions using Clap v4

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use memecap_core::{CaptionOverrides, Color, FontFamily, LineJoin, TextAlign};
use memecap_export::ImageFormat;

/// Memecap - top and bottom captions for any image
#[derive(Parser, Debug)]
#[command(name = "memecap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Caption an image and write the result
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Show how a caption wraps at a given width
    #[command(alias = "l")]
    Lines(LinesArgs),

    /// Re-render whenever caption lines arrive on stdin
    Live(Box<LiveArgs>),

    /// Draw the white shapes demo
    Shapes(ShapesArgs),

    /// Display output formats and installed font families
    #[command(alias = "i")]
    Info(InfoArgs),
}

/// Where caption fonts and widths come from
#[derive(Args, Debug, Clone, Default)]
pub struct FontArgs {
    /// Font file to caption with (.ttf, .otf)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Font family for both captions
    #[arg(long)]
    pub family: Option<String>,

    /// Measure every character as RATIO x font size instead of asking the font
    #[arg(long, value_name = "RATIO")]
    pub monospace: Option<f32>,
}

/// Caption settings applied to both captions, after the config file
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// TOML file with [top] and [bottom] caption settings
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Font size as a percentage of the image height
    #[arg(short = 's', long = "size-percent")]
    pub font_size_percent: Option<f32>,

    /// Distance from the image edges in pixels
    #[arg(short = 'm', long)]
    pub margin: Option<f32>,

    /// Outline width in pixels (0 disables the outline)
    #[arg(long = "stroke-width")]
    pub stroke_width: Option<f32>,

    /// Fill color (#RRGGBB or #RRGGBBAA)
    #[arg(long)]
    pub fill: Option<Color>,

    /// Outline color (#RRGGBB or #RRGGBBAA)
    #[arg(long)]
    pub stroke: Option<Color>,

    /// Outline corner style
    #[arg(long = "line-join", value_enum)]
    pub line_join: Option<JoinArg>,

    /// Horizontal alignment of each line
    #[arg(long, value_enum)]
    pub align: Option<AlignArg>,
}

impl StyleArgs {
    /// The flags that were given, as overrides for both captions
    pub fn overrides(&self, family: Option<FontFamily>) -> CaptionOverrides {
        CaptionOverrides {
            font_family: family,
            font_size_percent: self.font_size_percent,
            margin: self.margin,
            stroke_width: self.stroke_width,
            line_join: self.line_join.map(Into::into),
            text_align: self.align.map(Into::into),
            fill_color: self.fill,
            stroke_color: self.stroke,
            anchor: None,
        }
    }
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Background image (PNG, JPEG, GIF, WebP)
    #[arg(short = 'i', long)]
    pub image: PathBuf,

    /// Top caption
    #[arg(short = 't', long, default_value = "")]
    pub top: String,

    /// Bottom caption
    #[arg(short = 'b', long, default_value = "")]
    pub bottom: String,

    /// Output file
    #[arg(short = 'o', long = "output", default_value = "meme.png")]
    pub output: PathBuf,

    /// Output format (guessed from the output extension if omitted)
    #[arg(short = 'O', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Surface size as WIDTHxHEIGHT (default: twice the image size)
    #[arg(long)]
    pub size: Option<String>,

    #[command(flatten)]
    pub font: FontArgs,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the lines command
#[derive(Parser, Debug)]
pub struct LinesArgs {
    /// Caption text to wrap
    pub text: String,

    /// Width budget in pixels
    #[arg(short = 'w', long)]
    pub width: f32,

    /// Font size in pixels
    #[arg(short = 's', long = "size", default_value = "48")]
    pub font_size: f32,

    #[command(flatten)]
    pub font: FontArgs,
}

/// Arguments for the live command
#[derive(Parser, Debug)]
pub struct LiveArgs {
    /// Background image
    #[arg(short = 'i', long)]
    pub image: PathBuf,

    /// Output file, rewritten after every frame
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Output format (guessed from the output extension if omitted)
    #[arg(short = 'O', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Milliseconds between frames
    #[arg(long = "frame-ms", default_value = "16")]
    pub frame_ms: u64,

    #[command(flatten)]
    pub font: FontArgs,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the shapes command
#[derive(Parser, Debug)]
pub struct ShapesArgs {
    /// Output file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Output format (guessed from the output extension if omitted)
    #[arg(short = 'O', long = "format", value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// List output formats
    #[arg(long)]
    pub formats: bool,

    /// List installed font families
    #[arg(long)]
    pub fonts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// RGBA PNG
    Png,
    /// Binary RGB PPM
    Ppm,
    /// Binary grayscale PGM
    Pgm,
    /// Recorded draw commands as JSON
    Json,
}

impl OutputFormat {
    /// Pick the format from `--format`, else from the file extension, else PNG
    pub fn resolve(explicit: Option<Self>, output: &std::path::Path) -> Self {
        if let Some(format) = explicit {
            return format;
        }
        let ext = output
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("ppm") => Self::Ppm,
            Some("pgm") => Self::Pgm,
            Some("json") => Self::Json,
            _ => Self::Png,
        }
    }

    /// The bitmap format, or `None` for JSON
    pub fn image_format(self) -> Option<ImageFormat> {
        match self {
            Self::Png => Some(ImageFormat::Png),
            Self::Ppm => Some(ImageFormat::Ppm),
            Self::Pgm => Some(ImageFormat::Pgm),
            Self::Json => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JoinArg {
    Miter,
    Round,
    Bevel,
}

impl From<JoinArg> for LineJoin {
    fn from(join: JoinArg) -> Self {
        match join {
            JoinArg::Miter => LineJoin::Miter,
            JoinArg::Round => LineJoin::Round,
            JoinArg::Bevel => LineJoin::Bevel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for TextAlign {
    fn from(align: AlignArg) -> Self {
        match align {
            AlignArg::Left => TextAlign::Left,
            AlignArg::Center => TextAlign::Center,
            AlignArg::Right => TextAlign::Right,
        }
    }
}
