use serde::Serialize;
use std::fmt;

// Supported manager kinds.
// To add a new package manager, add a variant here and update:
// - ManagerKind::fmt()
// - ManagerRegistry::with_defaults()
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    Rpm, // Native OS packages (rpm database, dnf frontend)
    Pip, // Python packages from PyPI
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rpm => write!(f, "rpm"),
            Self::Pip => write!(f, "pip"),
        }
    }
}

/// One dependency declaration: a manager-kind tag and the package names
/// listed under it. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    pub tag: String,
    pub names: Vec<String>,
}

/// An ordered set of declarations handed over in one piece. The install
/// input is an ordered sequence of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationBatch {
    pub declarations: Vec<DependencyDeclaration>,
}

/// Pipeline state of a dependency group. Bracketed states in the diagram
/// below are terminal:
///
/// ```text
/// Pending → Checking → [Satisfied]
///                    → Resolving → [ResolveFailed]
///                                → Confirming → [Declined]
///                                            → Installing → [Installed]
///                                                         → [InstallFailed]
/// ```
///
/// `BootstrapFailed` terminates a group whose manager is absent and whose
/// prerequisite could not be provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Pending,
    Checking,
    Resolving,
    Confirming,
    Installing,
    Satisfied,
    ResolveFailed,
    Declined,
    Installed,
    InstallFailed,
    BootstrapFailed,
}

impl GroupStatus {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::ResolveFailed | Self::InstallFailed | Self::BootstrapFailed
        )
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Checking => "checking",
            Self::Resolving => "resolving",
            Self::Confirming => "confirming",
            Self::Installing => "installing",
            Self::Satisfied => "satisfied",
            Self::ResolveFailed => "resolve failed",
            Self::Declined => "declined",
            Self::Installed => "installed",
            Self::InstallFailed => "install failed",
            Self::BootstrapFailed => "bootstrap failed",
        };
        write!(f, "{}", label)
    }
}

/// Accumulated per-manager-kind state: the pending names routed to one
/// manager and the pipeline state reached so far. Lives for one run only.
#[derive(Debug, Clone)]
pub struct DependencyGroup {
    pub kind: ManagerKind,
    /// Names appended verbatim, duplicates and all. The per-name
    /// installed-check is what keeps duplicates from being installed twice.
    pub pending: Vec<String>,
    pub status: GroupStatus,
}

impl DependencyGroup {
    pub fn new(kind: ManagerKind) -> Self {
        Self {
            kind,
            pending: Vec::new(),
            status: GroupStatus::Pending,
        }
    }
}

/// Terminal record for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub kind: ManagerKind,
    pub status: GroupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Aggregate result of one orchestrator run, in group order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallationOutcome {
    pub reports: Vec<GroupReport>,
}

impl InstallationOutcome {
    pub fn failed(&self) -> bool {
        self.reports.iter().any(|r| r.status.is_failure())
    }

    /// One human-readable message joining every group failure with "; ".
    pub fn failure_message(&self) -> Option<String> {
        let reasons: Vec<String> = self
            .reports
            .iter()
            .filter(|r| r.status.is_failure())
            .map(|r| match &r.detail {
                Some(detail) => detail.clone(),
                None => format!("{}: {}", r.kind, r.status),
            })
            .collect();

        if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_joins_reasons_in_group_order() {
        let outcome = InstallationOutcome {
            reports: vec![
                GroupReport {
                    kind: ManagerKind::Rpm,
                    status: GroupStatus::Installed,
                    detail: None,
                },
                GroupReport {
                    kind: ManagerKind::Pip,
                    status: GroupStatus::ResolveFailed,
                    detail: Some("pip: index unreachable".to_string()),
                },
            ],
        };

        assert!(outcome.failed());
        assert_eq!(
            outcome.failure_message().unwrap(),
            "pip: index unreachable"
        );
    }

    #[test]
    fn clean_outcome_has_no_failure_message() {
        let outcome = InstallationOutcome {
            reports: vec![GroupReport {
                kind: ManagerKind::Rpm,
                status: GroupStatus::Satisfied,
                detail: None,
            }],
        };

        assert!(!outcome.failed());
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn declined_is_not_a_failure() {
        assert!(!GroupStatus::Declined.is_failure());
        assert!(GroupStatus::BootstrapFailed.is_failure());
    }
}
