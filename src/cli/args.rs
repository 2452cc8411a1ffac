use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "depstrap",
    about = "Install declared project dependencies across package managers",
    long_about = "Reconciles declaratively-listed dependencies (native OS packages, \
                  language-ecosystem packages) against the package managers usable on \
                  this host and installs only what is missing.",
    version,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install missing dependencies from a declaration file
    Install {
        /// Declaration file (YAML or JSON batches of tag -> package names)
        file: PathBuf,

        /// Preview what is missing without installing
        #[arg(long)]
        dry_run: bool,

        /// Print the per-group outcome as JSON
        #[arg(long)]
        report_json: bool,
    },

    /// Verify that every declaration routes to a registered manager
    Check {
        /// Declaration file to validate
        file: PathBuf,
    },

    /// List registered package managers and their capabilities
    Managers,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
