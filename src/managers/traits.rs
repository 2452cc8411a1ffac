use crate::core::types::ManagerKind;
use crate::error::Result;
use crate::managers::registry::ManagerRegistry;

/// Static description of one manager's capabilities and prompts. Built
/// once per kind at startup, never mutated.
#[derive(Debug, Clone)]
pub struct ManagerDescriptor {
    pub kind: ManagerKind,
    pub prompt_singular: &'static str,
    pub prompt_plural: &'static str,
    /// Whether `resolve` expands to a genuinely larger install set, or is
    /// the identity function over its input.
    pub resolves_transitively: bool,
    /// Whether this manager can install its own prerequisite through
    /// another manager when its backend is absent.
    pub can_bootstrap: bool,
}

impl ManagerDescriptor {
    /// Pure formatting, no I/O.
    pub fn perm_prompt(&self, plural: bool) -> &'static str {
        if plural {
            self.prompt_plural
        } else {
            self.prompt_singular
        }
    }
}

pub trait PackageManager: std::fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &ManagerDescriptor;

    /// Whether this manager claims the given dependency tag.
    fn matches(&self, tag: &str) -> bool;

    /// Whether the backend binary is present on the host.
    fn is_available(&self) -> bool;

    /// Is the dependency already installed? Fails with
    /// `PackageManagerUnavailable` when the backend itself is absent,
    /// which callers treat as "cannot determine, skip this name".
    fn is_installed(&self, name: &str) -> Result<bool>;

    /// Expand the requested names to the full set the manager would act
    /// on. Identity for managers without transitive resolution.
    fn resolve(&self, names: &[String]) -> Result<Vec<String>>;

    /// Install the given names, returning the ones verified installed
    /// afterwards. May partially succeed before failing.
    fn install(&self, names: &[String]) -> Result<Vec<String>>;

    /// Install this manager's own prerequisite through another manager.
    /// Fails with `CorePackageManagerMissing` when no bootstrap path
    /// exists.
    fn bootstrap(&self, registry: &ManagerRegistry) -> Result<()>;

    fn kind(&self) -> ManagerKind {
        self.descriptor().kind
    }
}
