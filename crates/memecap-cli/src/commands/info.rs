//! Info command implementation

use memecap_core::{error::Result, CaptionOptions};
use memecap_export::ImageFormat;
use memecap_fontdb::FontDatabase;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let show_all = !args.formats && !args.fonts;

    println!("Memecap v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.formats {
        print_formats();
        if show_all {
            println!();
        }
    }

    if show_all {
        print_defaults();
        println!();
    }

    if show_all || args.fonts {
        print_fonts();
    }

    Ok(())
}

fn print_formats() {
    println!("Output formats:");
    for format in ImageFormat::all() {
        let exporter = format.exporter();
        println!("  {:<6} - {} (.{})", format, exporter.name(), exporter.extension());
    }
    println!("  {:<6} - recorded draw commands (.json)", "json");
}

fn print_defaults() {
    let options = CaptionOptions::default();
    println!("Caption defaults:");
    println!("  family        {}", options.font_family);
    println!("  size          {}% of image height", options.font_size_percent);
    println!("  margin        {}px", options.margin);
    println!("  stroke width  {}px", options.stroke_width);
}

fn print_fonts() {
    let fonts = FontDatabase::with_system_fonts();
    let families = fonts.families();
    println!(
        "Font families ({} faces, {} families):",
        fonts.font_count(),
        families.len()
    );
    for family in families {
        println!("  {}", family);
    }
}
