//! Check Command
//!
//! Accumulation only: verifies that every declared tag routes to a
//! registered manager and shows the resulting groups. Nothing is checked
//! against the host and nothing is installed.

use crate::config::declarations;
use crate::config::settings::Settings;
use crate::core::accumulator::accumulate;
use crate::error::Result;
use crate::managers::ManagerRegistry;
use crate::ui;
use std::path::Path;

pub fn run(file: &Path, settings: &Settings) -> Result<()> {
    let batches = declarations::load_batches(file)?;
    let registry = ManagerRegistry::with_defaults(settings);

    // Unroutable tags abort here, exactly as they would before an install
    let groups = accumulate(&registry, &batches)?;

    ui::success(&format!(
        "{} batch(es) route cleanly into {} group(s)",
        batches.len(),
        groups.len()
    ));

    for group in &groups {
        ui::info(&format!(
            "{}: {} package(s)",
            group.kind,
            group.pending.len()
        ));
        for name in &group.pending {
            ui::verbose(name);
        }
    }

    Ok(())
}
