//! Native package manager (rpm database, dnf frontend).

use crate::core::types::ManagerKind;
use crate::error::{DepstrapError, Result};
use crate::managers::registry::ManagerRegistry;
use crate::managers::traits::{ManagerDescriptor, PackageManager};
use crate::utils::cmd;
use std::process::Command;

/// Names with this prefix denote package groups, not ordinary packages.
pub const GROUP_PREFIX: char = '@';

const DESCRIPTOR: ManagerDescriptor = ManagerDescriptor {
    kind: ManagerKind::Rpm,
    prompt_singular: "Install the following system package?",
    prompt_plural: "Install the following system packages?",
    resolves_transitively: true,
    can_bootstrap: false,
};

#[derive(Debug)]
pub struct RpmManager {
    dnf_cmd: String,
}

impl RpmManager {
    pub fn new(dnf_cmd: String) -> Self {
        Self { dnf_cmd }
    }

    fn unavailable(&self) -> DepstrapError {
        DepstrapError::PackageManagerUnavailable {
            kind: self.kind().to_string(),
        }
    }

    fn is_package_installed(&self, name: &str) -> Result<bool> {
        let mut query = Command::new("rpm");
        query.arg("-q").arg(name);

        // rpm exits non-zero for a package it does not know; only a failed
        // spawn means the backend cannot answer at all.
        match cmd::capture(&mut query) {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Err(self.unavailable()),
        }
    }

    fn is_group_installed(&self, group: &str) -> Result<bool> {
        let mut query = Command::new(&self.dnf_cmd);
        query.args(["group", "list", "--installed"]);

        match cmd::capture(&mut query) {
            Ok(output) if output.status.success() => Ok(group_list_contains(
                &String::from_utf8_lossy(&output.stdout),
                group,
            )),
            Ok(_) => Ok(false),
            Err(_) => Err(self.unavailable()),
        }
    }
}

impl PackageManager for RpmManager {
    fn descriptor(&self) -> &ManagerDescriptor {
        &DESCRIPTOR
    }

    fn matches(&self, tag: &str) -> bool {
        matches!(tag, "rpm" | "dnf")
    }

    fn is_available(&self) -> bool {
        which::which(&self.dnf_cmd).is_ok()
    }

    fn is_installed(&self, name: &str) -> Result<bool> {
        match name.strip_prefix(GROUP_PREFIX) {
            Some(group) => self.is_group_installed(group),
            None => self.is_package_installed(name),
        }
    }

    fn resolve(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut resolved: Vec<String> = names.to_vec();

        // repoquery only understands packages; groups resolve to themselves.
        let packages: Vec<&String> = names
            .iter()
            .filter(|name| !name.starts_with(GROUP_PREFIX))
            .collect();
        if packages.is_empty() {
            return Ok(resolved);
        }

        let mut query = Command::new(&self.dnf_cmd);
        query.args(["repoquery", "--requires", "--resolve", "--qf", "%{name}"]);
        query.args(&packages);

        let output = cmd::capture(&mut query)?;
        if !output.status.success() {
            return Err(DepstrapError::ResolutionError {
                kind: self.kind().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            let dep = line.trim();
            if !dep.is_empty() {
                resolved.push(dep.to_string());
            }
        }

        Ok(resolved)
    }

    fn install(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut install = Command::new("sudo");
        install.arg(&self.dnf_cmd).args(["install", "-y"]).args(names);

        let status = cmd::passthrough(&mut install)?;
        if !status.success() {
            return Err(DepstrapError::InstallError {
                kind: self.kind().to_string(),
                reason: format!("{} install exited with {}", self.dnf_cmd, status),
            });
        }

        // Report only the names that verify as installed afterwards.
        let mut installed = Vec::with_capacity(names.len());
        for name in names {
            if self.is_installed(name).unwrap_or(false) {
                installed.push(name.clone());
            }
        }
        Ok(installed)
    }

    fn bootstrap(&self, _registry: &ManagerRegistry) -> Result<()> {
        // The native manager is the bootstrap source for everything else;
        // nothing can provide it in turn.
        Err(DepstrapError::CorePackageManagerMissing {
            kind: self.kind().to_string(),
            reason: format!(
                "the native package manager cannot install itself; install {} manually",
                self.dnf_cmd
            ),
        })
    }
}

fn group_list_contains(stdout: &str, group: &str) -> bool {
    stdout.lines().any(|line| {
        let line = line.trim();
        line == group || line.split_whitespace().next() == Some(group)
    })
}
