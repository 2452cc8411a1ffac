//! Installation orchestration.
//!
//! Drives every dependency group through the check → resolve → confirm →
//! install pipeline, strictly sequentially and in accumulation order.
//! Failures during resolve or install are caught at the group boundary
//! and recorded; sibling groups are always still attempted. The single
//! aggregate failure, if any, is raised by the caller at the very end.

use crate::core::accumulator::accumulate;
use crate::core::types::{
    DeclarationBatch, DependencyGroup, GroupReport, GroupStatus, InstallationOutcome, ManagerKind,
};
use crate::error::{DepstrapError, Result};
use crate::managers::{ManagerRegistry, PackageManager};
use crate::ui;
use std::collections::BTreeSet;

/// Yes/no prompt shown before a group is installed. The preview is the
/// sorted, human-readable resolved set.
pub trait ConfirmationGate {
    fn ask(&self, prompt: &str, preview: &str) -> bool;
}

pub struct InstallationOrchestrator<'a> {
    registry: &'a ManagerRegistry,
    gate: &'a dyn ConfirmationGate,
}

impl<'a> InstallationOrchestrator<'a> {
    pub fn new(registry: &'a ManagerRegistry, gate: &'a dyn ConfirmationGate) -> Self {
        Self { registry, gate }
    }

    /// Accumulate the batches (fail-fast on unroutable tags) and run the
    /// pipeline for every group. Always returns the full aggregate; the
    /// only errors are accumulation failures and user interruption.
    pub fn install(&self, batches: &[DeclarationBatch]) -> Result<InstallationOutcome> {
        let groups = accumulate(self.registry, batches)?;

        let mut outcome = InstallationOutcome::default();
        for mut group in groups {
            if ui::interrupted() {
                return Err(DepstrapError::Interrupted);
            }
            outcome.reports.push(self.run_group(&mut group));
        }

        Ok(outcome)
    }

    /// The check step only: per-group missing names, nothing installed.
    pub fn plan(&self, batches: &[DeclarationBatch]) -> Result<Vec<(ManagerKind, Vec<String>)>> {
        let groups = accumulate(self.registry, batches)?;

        Ok(groups
            .iter()
            .map(|group| match self.registry.get(group.kind) {
                Some(manager) => (group.kind, check_missing(manager, group)),
                None => (group.kind, Vec::new()),
            })
            .collect())
    }

    fn run_group(&self, group: &mut DependencyGroup) -> GroupReport {
        let kind = group.kind;

        let Some(manager) = self.registry.get(kind) else {
            // Groups only exist for registered managers; an empty registry
            // entry here means the caller swapped registries mid-run.
            return report(
                group,
                GroupStatus::InstallFailed,
                Some(format!("{}: manager not registered", kind)),
            );
        };

        // A missing backend that knows how to provision itself gets one
        // chance to do so before the checks; failure ends only this group.
        if !manager.is_available() && manager.descriptor().can_bootstrap {
            ui::info(&format!("'{}' is missing, provisioning it first...", kind));
            if let Err(e) = manager.bootstrap(self.registry) {
                ui::error(&e.to_string());
                return report(group, GroupStatus::BootstrapFailed, Some(e.to_string()));
            }
        }

        group.status = GroupStatus::Checking;
        let missing = check_missing(manager, group);

        if missing.is_empty() {
            ui::success(&format!("{}: nothing to install", kind));
            return report(group, GroupStatus::Satisfied, None);
        }

        group.status = GroupStatus::Resolving;
        let resolved = match manager.resolve(&missing) {
            Ok(resolved) => resolved,
            Err(e) => {
                ui::error(&format!("{}: {}", kind, e));
                return report(
                    group,
                    GroupStatus::ResolveFailed,
                    Some(format!("{}: {}", kind, e)),
                );
            }
        };

        group.status = GroupStatus::Confirming;
        let preview: BTreeSet<&str> = resolved.iter().map(String::as_str).collect();
        let plural = preview.len() > 1;
        let preview_text = preview.into_iter().collect::<Vec<_>>().join("\n");

        if !self
            .gate
            .ask(manager.descriptor().perm_prompt(plural), &preview_text)
        {
            ui::info(&format!("{}: skipped by user", kind));
            return report(group, GroupStatus::Declined, None);
        }

        group.status = GroupStatus::Installing;
        // Install the originally-missing names. The resolved set above is
        // shown for review only: it previews the transitive packages the
        // manager pulls in on its own.
        match manager.install(&missing) {
            Ok(installed) => {
                ui::success(&format!("{}: installed {} package(s)", kind, installed.len()));
                report(group, GroupStatus::Installed, Some(installed.join(", ")))
            }
            Err(e) => {
                ui::error(&format!("{}: {}", kind, e));
                report(
                    group,
                    GroupStatus::InstallFailed,
                    Some(format!("{}: {}", kind, e)),
                )
            }
        }
    }
}

/// Partition the group's pending names down to the ones actually missing.
/// A name the backend cannot answer for is skipped, never a group failure.
fn check_missing(manager: &dyn PackageManager, group: &DependencyGroup) -> Vec<String> {
    let mut missing = Vec::new();

    for name in &group.pending {
        match manager.is_installed(name) {
            Ok(true) => ui::verbose(&format!("{} is already installed", name)),
            Ok(false) => missing.push(name.clone()),
            Err(DepstrapError::PackageManagerUnavailable { kind }) => {
                ui::warning(&format!(
                    "Cannot check '{}': '{}' is not usable on this host; skipping",
                    name, kind
                ));
            }
            Err(e) => {
                ui::warning(&format!("Cannot check '{}': {}; skipping", name, e));
            }
        }
    }

    missing
}

fn report(group: &mut DependencyGroup, status: GroupStatus, detail: Option<String>) -> GroupReport {
    group.status = status;
    GroupReport {
        kind: group.kind,
        status,
        detail,
    }
}

#[cfg(test)]
mod tests;
