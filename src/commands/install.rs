//! Install Command
//!
//! Loads a declaration file, builds the manager registry, and drives the
//! installation orchestrator over every declared group.

use crate::config::declarations;
use crate::config::settings::Settings;
use crate::core::orchestrator::{ConfirmationGate, InstallationOrchestrator};
use crate::core::types::{DeclarationBatch, GroupStatus, InstallationOutcome};
use crate::error::{DepstrapError, Result};
use crate::managers::ManagerRegistry;
use crate::ui;
use std::path::PathBuf;

#[derive(Debug)]
pub struct InstallOptions {
    /// Declaration file to install from
    pub file: PathBuf,
    /// Stop after the check step and preview what is missing
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Print the aggregate outcome as JSON
    pub report_json: bool,
}

pub fn run(options: InstallOptions, settings: &Settings) -> Result<()> {
    let batches = declarations::load_batches(&options.file)?;
    let registry = ManagerRegistry::with_defaults(settings);

    let gate: &dyn ConfirmationGate = if options.yes || settings.assume_yes {
        &ui::AssumeYesGate
    } else {
        &ui::InteractiveGate
    };
    let orchestrator = InstallationOrchestrator::new(&registry, gate);

    if options.dry_run {
        return dry_run(&orchestrator, &batches);
    }

    let outcome = orchestrator.install(&batches)?;
    summarize(&outcome);

    if options.report_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome.failure_message() {
        Some(message) => Err(DepstrapError::InstallationFailed(message)),
        None => Ok(()),
    }
}

/// Check step only: show what each group would install, touch nothing.
fn dry_run(orchestrator: &InstallationOrchestrator<'_>, batches: &[DeclarationBatch]) -> Result<()> {
    ui::header("Dry run");

    for (kind, missing) in orchestrator.plan(batches)? {
        if missing.is_empty() {
            ui::success(&format!("{}: nothing to install", kind));
        } else {
            ui::info(&format!("{}: {} package(s) missing", kind, missing.len()));
            for name in missing {
                ui::indent(&name, 1);
            }
        }
    }

    ui::success("Dry-run completed - no changes were made");
    Ok(())
}

fn summarize(outcome: &InstallationOutcome) {
    ui::header("Summary");
    for report in &outcome.reports {
        let line = match &report.detail {
            Some(detail) if report.status == GroupStatus::Installed => {
                format!("{}: {} ({})", report.kind, report.status, detail)
            }
            Some(detail) if report.status.is_failure() => detail.clone(),
            _ => format!("{}: {}", report.kind, report.status),
        };

        if report.status.is_failure() {
            ui::error(&line);
        } else {
            ui::success(&line);
        }
    }
}
