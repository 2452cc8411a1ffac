//! Python package manager (PyPI).
//!
//! pip cannot resolve transitively from the outside, so `resolve` is the
//! identity function; the installer pulls in whatever it needs itself.

use crate::core::types::ManagerKind;
use crate::error::{DepstrapError, Result};
use crate::managers::registry::ManagerRegistry;
use crate::managers::traits::{ManagerDescriptor, PackageManager};
use crate::utils::cmd;
use std::process::Command;

/// Native package providing the pip binary, installed when bootstrapping.
pub const BOOTSTRAP_PACKAGE: &str = "python3-pip";

const DESCRIPTOR: ManagerDescriptor = ManagerDescriptor {
    kind: ManagerKind::Pip,
    prompt_singular: "Install the following Python package?",
    prompt_plural: "Install the following Python packages?",
    resolves_transitively: false,
    can_bootstrap: true,
};

#[derive(Debug)]
pub struct PipManager {
    pip_cmd: String,
}

impl PipManager {
    pub fn new(pip_cmd: String) -> Self {
        Self { pip_cmd }
    }

    fn unavailable(&self) -> DepstrapError {
        DepstrapError::PackageManagerUnavailable {
            kind: self.kind().to_string(),
        }
    }
}

impl PackageManager for PipManager {
    fn descriptor(&self) -> &ManagerDescriptor {
        &DESCRIPTOR
    }

    fn matches(&self, tag: &str) -> bool {
        tag == "pip"
    }

    fn is_available(&self) -> bool {
        which::which(&self.pip_cmd).is_ok()
    }

    fn is_installed(&self, name: &str) -> Result<bool> {
        if !self.is_available() {
            return Err(self.unavailable());
        }

        let mut query = Command::new(&self.pip_cmd);
        query.args(["show", "-q"]).arg(name);

        // pip show exits non-zero for a distribution it does not know.
        match cmd::capture(&mut query) {
            Ok(output) => Ok(output.status.success()),
            Err(_) => Err(self.unavailable()),
        }
    }

    fn resolve(&self, names: &[String]) -> Result<Vec<String>> {
        Ok(names.to_vec())
    }

    fn install(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut install = Command::new(&self.pip_cmd);
        install.args(["install", "--user"]).args(names);

        let status = cmd::passthrough(&mut install)?;
        if !status.success() {
            return Err(DepstrapError::InstallError {
                kind: self.kind().to_string(),
                reason: format!("{} install exited with {}", self.pip_cmd, status),
            });
        }

        let mut installed = Vec::with_capacity(names.len());
        for name in names {
            if self.is_installed(name).unwrap_or(false) {
                installed.push(name.clone());
            }
        }
        Ok(installed)
    }

    /// Have the native manager install pip itself.
    fn bootstrap(&self, registry: &ManagerRegistry) -> Result<()> {
        let kind = self.kind().to_string();

        let native = registry.get(ManagerKind::Rpm).ok_or_else(|| {
            DepstrapError::CorePackageManagerMissing {
                kind: kind.clone(),
                reason: "no native package manager is registered to provide pip".to_string(),
            }
        })?;

        if !native.is_available() {
            return Err(DepstrapError::CorePackageManagerMissing {
                kind,
                reason: format!("'{}' is not usable on this host", native.kind()),
            });
        }

        native
            .install(&[BOOTSTRAP_PACKAGE.to_string()])
            .map_err(|e| DepstrapError::CorePackageManagerMissing {
                kind,
                reason: e.to_string(),
            })?;

        Ok(())
    }
}
