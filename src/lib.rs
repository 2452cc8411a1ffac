pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod managers;
pub mod ui;
pub mod utils;

use clap::Parser;
use config::settings::Settings;
use std::process::exit;

/// Run depstrap CLI entrypoint.
pub fn run_cli() {
    // 0. Settings and color handling (must come first)
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            ui::warning(&format!("Falling back to default settings: {}", e));
            Settings::default()
        }
    };
    ui::init_colors(settings.color);

    // 1. Signal handling (mark cancellation and let the pipeline stop
    //    cleanly between groups)
    ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    })
    .expect("Error setting Ctrl-C handler");

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    if let Err(e) = cli::dispatcher::dispatch(&args, &settings) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
