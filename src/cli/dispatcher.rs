//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::commands::install::InstallOptions;
use crate::config::settings::Settings;
use crate::error::Result;
use crate::ui as output;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli, settings: &Settings) -> Result<()> {
    match &args.command {
        Some(Command::Install {
            file,
            dry_run,
            report_json,
        }) => commands::install::run(
            InstallOptions {
                file: file.clone(),
                dry_run: *dry_run,
                yes: args.global.yes,
                report_json: *report_json,
            },
            settings,
        ),

        Some(Command::Check { file }) => commands::check::run(file, settings),

        Some(Command::Managers) => commands::managers::run(settings),

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            output::info("No command provided.");
            output::info("Quick start:");
            output::indent("depstrap install deps.yaml    # install missing dependencies", 1);
            output::indent("depstrap check deps.yaml      # validate the declaration file", 1);
            output::indent("depstrap managers             # list available backends", 1);
            output::info("Run 'depstrap --help' for the full command list.");
            Ok(())
        }
    }
}
