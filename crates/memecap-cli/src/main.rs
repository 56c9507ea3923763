//! memecap - caption images from the command line

mod cli;
mod commands;
mod config;

use clap::Parser;
use memecap_core::Result;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Render(args) => commands::render::run(&args),
        Commands::Lines(args) => commands::lines::run(&args),
        Commands::Live(args) => commands::live::run(&args),
        Commands::Shapes(args) => commands::shapes::run(&args),
        Commands::Info(args) => commands::info::run(&args),
    }
}
