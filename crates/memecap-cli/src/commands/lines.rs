//! Lines command implementation
//!
//! Prints one wrapped line per row: key, measured width, text.

use memecap_core::{error::Result, LineBreaker};

use super::FontSetup;
use crate::cli::LinesArgs;

pub fn run(args: &LinesArgs) -> Result<()> {
    let setup = FontSetup::from_args(&args.font)?;
    let family = setup.family_or_default();
    let measurer = setup.measurer();

    let lines = LineBreaker::new(measurer).break_into_lines(
        &args.text,
        args.width,
        &family,
        args.font_size,
    )?;

    for line in &lines {
        let width = line.width(&measurer, &family, args.font_size)?;
        println!("{}\t{:.1}\t{}", line.key(), width, line.text());
    }

    log::info!(
        "{} lines at {}px {} within {}px ({} metrics tables built)",
        lines.len(),
        args.font_size,
        family,
        args.width,
        measurer.cache().builds()
    );
    Ok(())
}
