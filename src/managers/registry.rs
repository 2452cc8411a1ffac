//! # Package Manager Registry
//!
//! An explicit, ordered registration table mapping dependency tags to
//! manager implementations. The registry is built once at startup from a
//! fixed table, owned by the caller, and read-only afterwards; lookup
//! walks the table in registration order and the first manager whose
//! match predicate accepts the tag wins.

use crate::config::settings::Settings;
use crate::core::types::ManagerKind;
use crate::error::{DepstrapError, Result};
use crate::managers::pip::PipManager;
use crate::managers::rpm::RpmManager;
use crate::managers::traits::PackageManager;

pub struct ManagerRegistry {
    managers: Vec<Box<dyn PackageManager>>,
}

impl ManagerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            managers: Vec::new(),
        }
    }

    /// Register all default managers, in dispatch order.
    pub fn with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RpmManager::new(settings.dnf_command.clone())));
        registry.register(Box::new(PipManager::new(settings.pip_command.clone())));
        registry
    }

    pub fn register(&mut self, manager: Box<dyn PackageManager>) {
        self.managers.push(manager);
    }

    /// Choose the manager for a dependency tag. Pure lookup, first match
    /// wins.
    pub fn resolve(&self, tag: &str) -> Result<&dyn PackageManager> {
        self.managers
            .iter()
            .map(Box::as_ref)
            .find(|manager| manager.matches(tag))
            .ok_or_else(|| DepstrapError::PackageManagerNotFound {
                tag: tag.to_string(),
            })
    }

    pub fn get(&self, kind: ManagerKind) -> Option<&dyn PackageManager> {
        self.managers
            .iter()
            .map(Box::as_ref)
            .find(|manager| manager.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PackageManager> {
        self.managers.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::with_defaults(&Settings::default())
    }
}
