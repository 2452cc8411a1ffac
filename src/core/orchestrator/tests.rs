use super::*;
use crate::core::types::{DeclarationBatch, DependencyDeclaration};
use crate::managers::ManagerDescriptor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default, Debug)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn count_prefixed(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

#[derive(Debug)]
struct FakeManager {
    descriptor: ManagerDescriptor,
    tag: &'static str,
    available: AtomicBool,
    installed: Vec<&'static str>,
    resolve_extra: Vec<&'static str>,
    fail_resolve: bool,
    fail_install: bool,
    fail_bootstrap: bool,
    log: CallLog,
}

impl FakeManager {
    fn new(kind: ManagerKind, tag: &'static str, log: CallLog) -> Self {
        Self {
            descriptor: ManagerDescriptor {
                kind,
                prompt_singular: "Install the following package?",
                prompt_plural: "Install the following packages?",
                resolves_transitively: false,
                can_bootstrap: false,
            },
            tag,
            available: AtomicBool::new(true),
            installed: Vec::new(),
            resolve_extra: Vec::new(),
            fail_resolve: false,
            fail_install: false,
            fail_bootstrap: false,
            log,
        }
    }

    fn with_installed(mut self, names: &[&'static str]) -> Self {
        self.installed = names.to_vec();
        self
    }

    fn with_resolve_extra(mut self, names: &[&'static str]) -> Self {
        self.resolve_extra = names.to_vec();
        self
    }

    fn failing_resolve(mut self) -> Self {
        self.fail_resolve = true;
        self
    }

    fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    fn unavailable(self) -> Self {
        self.available.store(false, Ordering::Relaxed);
        self
    }

    fn bootstrappable(mut self) -> Self {
        self.descriptor.can_bootstrap = true;
        self
    }

    fn failing_bootstrap(mut self) -> Self {
        self.fail_bootstrap = true;
        self
    }
}

impl PackageManager for FakeManager {
    fn descriptor(&self) -> &ManagerDescriptor {
        &self.descriptor
    }

    fn matches(&self, tag: &str) -> bool {
        tag == self.tag
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn is_installed(&self, name: &str) -> Result<bool> {
        self.log.push(format!("is_installed:{name}"));
        if !self.is_available() {
            return Err(DepstrapError::PackageManagerUnavailable {
                kind: self.kind().to_string(),
            });
        }
        Ok(self.installed.contains(&name))
    }

    fn resolve(&self, names: &[String]) -> Result<Vec<String>> {
        self.log.push(format!("resolve:{}", names.join(",")));
        if self.fail_resolve {
            return Err(DepstrapError::ResolutionError {
                kind: self.kind().to_string(),
                reason: "synthetic resolver outage".to_string(),
            });
        }
        let mut resolved = names.to_vec();
        resolved.extend(self.resolve_extra.iter().map(|n| n.to_string()));
        Ok(resolved)
    }

    fn install(&self, names: &[String]) -> Result<Vec<String>> {
        self.log.push(format!("install:{}", names.join(",")));
        if self.fail_install {
            return Err(DepstrapError::InstallError {
                kind: self.kind().to_string(),
                reason: "synthetic install failure".to_string(),
            });
        }
        Ok(names.to_vec())
    }

    fn bootstrap(&self, _registry: &ManagerRegistry) -> Result<()> {
        self.log.push("bootstrap".to_string());
        if self.fail_bootstrap {
            return Err(DepstrapError::CorePackageManagerMissing {
                kind: self.kind().to_string(),
                reason: "no bootstrap path in this environment".to_string(),
            });
        }
        self.available.store(true, Ordering::Relaxed);
        Ok(())
    }
}

struct ScriptedGate {
    decline_previews_containing: Option<&'static str>,
    asked: CallLog,
}

impl ScriptedGate {
    fn accepting(asked: CallLog) -> Self {
        Self {
            decline_previews_containing: None,
            asked,
        }
    }

    fn declining_previews_containing(needle: &'static str, asked: CallLog) -> Self {
        Self {
            decline_previews_containing: Some(needle),
            asked,
        }
    }
}

impl ConfirmationGate for ScriptedGate {
    fn ask(&self, prompt: &str, preview: &str) -> bool {
        self.asked.push(format!("{prompt}|{}", preview.replace('\n', " ")));
        match self.decline_previews_containing {
            Some(needle) => !preview.contains(needle),
            None => true,
        }
    }
}

fn decl(tag: &str, names: &[&str]) -> DependencyDeclaration {
    DependencyDeclaration {
        tag: tag.to_string(),
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

fn batch(declarations: Vec<DependencyDeclaration>) -> DeclarationBatch {
    DeclarationBatch { declarations }
}

/// `[{"rpm": ["foo", "bar"]}, {"pip": ["numpy"]}]`
fn rpm_pip_batches() -> Vec<DeclarationBatch> {
    vec![
        batch(vec![decl("rpm", &["foo", "bar"])]),
        batch(vec![decl("pip", &["numpy"])]),
    ]
}

fn registry_of(managers: Vec<FakeManager>) -> ManagerRegistry {
    let mut registry = ManagerRegistry::new();
    for manager in managers {
        registry.register(Box::new(manager));
    }
    registry
}

#[test]
fn scenario_a_installs_exactly_the_missing_names() {
    let rpm_log = CallLog::default();
    let pip_log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", rpm_log.clone()).with_installed(&["foo"]),
        FakeManager::new(ManagerKind::Pip, "pip", pip_log.clone()),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&rpm_pip_batches())
        .unwrap();

    assert!(!outcome.failed());
    assert_eq!(outcome.reports.len(), 2);
    assert_eq!(outcome.reports[0].kind, ManagerKind::Rpm);
    assert_eq!(outcome.reports[0].status, GroupStatus::Installed);
    assert_eq!(outcome.reports[1].kind, ManagerKind::Pip);
    assert_eq!(outcome.reports[1].status, GroupStatus::Installed);

    // Exactly two install calls, each with only the missing names
    assert_eq!(rpm_log.entries().last().unwrap(), "install:bar");
    assert_eq!(rpm_log.count_prefixed("install:"), 1);
    assert_eq!(pip_log.entries().last().unwrap(), "install:numpy");
    assert_eq!(pip_log.count_prefixed("install:"), 1);
}

#[test]
fn scenario_b_declining_one_group_skips_only_that_group() {
    let rpm_log = CallLog::default();
    let pip_log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", rpm_log.clone()).with_installed(&["foo"]),
        FakeManager::new(ManagerKind::Pip, "pip", pip_log.clone()),
    ]);
    let gate = ScriptedGate::declining_previews_containing("numpy", CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&rpm_pip_batches())
        .unwrap();

    // Declined is not a failure
    assert!(!outcome.failed());
    assert_eq!(outcome.reports[0].status, GroupStatus::Installed);
    assert_eq!(outcome.reports[1].status, GroupStatus::Declined);

    assert_eq!(rpm_log.count_prefixed("install:"), 1);
    assert_eq!(pip_log.count_prefixed("install:"), 0);
}

#[test]
fn scenario_c_resolve_failure_is_isolated_and_reported_once() {
    let rpm_log = CallLog::default();
    let pip_log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", rpm_log.clone()).with_installed(&["foo"]),
        FakeManager::new(ManagerKind::Pip, "pip", pip_log.clone()).failing_resolve(),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&rpm_pip_batches())
        .unwrap();

    assert!(outcome.failed());
    assert_eq!(outcome.reports[0].status, GroupStatus::Installed);
    assert_eq!(outcome.reports[1].status, GroupStatus::ResolveFailed);

    let message = outcome.failure_message().unwrap();
    assert!(message.starts_with("pip:"));
    assert!(!message.contains("; "));

    assert_eq!(rpm_log.count_prefixed("install:"), 1);
    assert_eq!(pip_log.count_prefixed("install:"), 0);
}

#[test]
fn satisfied_group_triggers_no_resolve_confirm_or_install() {
    let log = CallLog::default();
    let asked = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", log.clone()).with_installed(&["foo", "bar"]),
    ]);
    let gate = ScriptedGate::accepting(asked.clone());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&[batch(vec![decl("rpm", &["foo", "bar"])])])
        .unwrap();

    assert_eq!(outcome.reports[0].status, GroupStatus::Satisfied);
    assert_eq!(log.count_prefixed("resolve:"), 0);
    assert_eq!(log.count_prefixed("install:"), 0);
    assert!(asked.entries().is_empty());
}

#[test]
fn install_failure_never_blocks_sibling_groups() {
    let rpm_log = CallLog::default();
    let pip_log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", rpm_log.clone()).failing_install(),
        FakeManager::new(ManagerKind::Pip, "pip", pip_log.clone()),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&rpm_pip_batches())
        .unwrap();

    assert!(outcome.failed());
    assert_eq!(outcome.reports[0].status, GroupStatus::InstallFailed);
    assert_eq!(outcome.reports[1].status, GroupStatus::Installed);
    assert_eq!(pip_log.count_prefixed("install:"), 1);
}

#[test]
fn unroutable_tag_aborts_before_any_pipeline_work() {
    let log = CallLog::default();
    let registry =
        registry_of(vec![FakeManager::new(ManagerKind::Rpm, "rpm", log.clone())]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let batches = vec![
        batch(vec![decl("rpm", &["foo"])]),
        batch(vec![decl("npm", &["left-pad"])]),
    ];
    let err = InstallationOrchestrator::new(&registry, &gate)
        .install(&batches)
        .unwrap_err();

    assert!(matches!(
        err,
        DepstrapError::PackageManagerNotFound { ref tag } if tag == "npm"
    ));
    // Nothing was checked or installed for any group
    assert!(log.entries().is_empty());
}

#[test]
fn absent_backend_without_bootstrap_skips_every_name() {
    let log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Pip, "pip", log.clone()).unavailable(),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&[batch(vec![decl("pip", &["numpy"])])])
        .unwrap();

    // Every name skipped means nothing left to do
    assert!(!outcome.failed());
    assert_eq!(outcome.reports[0].status, GroupStatus::Satisfied);
    assert_eq!(log.count_prefixed("install:"), 0);
}

#[test]
fn bootstrap_failure_terminates_only_its_group() {
    let rpm_log = CallLog::default();
    let pip_log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", rpm_log.clone()).with_installed(&["foo"]),
        FakeManager::new(ManagerKind::Pip, "pip", pip_log.clone())
            .unavailable()
            .bootstrappable()
            .failing_bootstrap(),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let batches = vec![
        batch(vec![decl("pip", &["numpy"])]),
        batch(vec![decl("rpm", &["foo", "bar"])]),
    ];
    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&batches)
        .unwrap();

    assert!(outcome.failed());
    assert_eq!(outcome.reports[0].status, GroupStatus::BootstrapFailed);
    assert_eq!(outcome.reports[1].status, GroupStatus::Installed);
    // The failed bootstrap never reached the check step
    assert_eq!(pip_log.count_prefixed("is_installed:"), 0);
    assert_eq!(rpm_log.count_prefixed("install:"), 1);
}

#[test]
fn successful_bootstrap_continues_into_the_pipeline() {
    let log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Pip, "pip", log.clone())
            .unavailable()
            .bootstrappable(),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&[batch(vec![decl("pip", &["numpy"])])])
        .unwrap();

    assert_eq!(outcome.reports[0].status, GroupStatus::Installed);
    let entries = log.entries();
    assert_eq!(entries.first().unwrap(), "bootstrap");
    assert_eq!(entries.last().unwrap(), "install:numpy");
}

#[test]
fn multiple_failures_join_into_one_message() {
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", CallLog::default()).failing_resolve(),
        FakeManager::new(ManagerKind::Pip, "pip", CallLog::default()).failing_install(),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let outcome = InstallationOrchestrator::new(&registry, &gate)
        .install(&rpm_pip_batches())
        .unwrap();

    let message = outcome.failure_message().unwrap();
    assert!(message.contains("rpm:"));
    assert!(message.contains("pip:"));
    assert!(message.contains("; "));
}

#[test]
fn prompt_pluralizes_on_the_resolved_preview() {
    let asked = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", CallLog::default())
            .with_resolve_extra(&["glibc"]),
        FakeManager::new(ManagerKind::Pip, "pip", CallLog::default()),
    ]);
    let gate = ScriptedGate::accepting(asked.clone());

    let batches = vec![
        batch(vec![decl("rpm", &["bar"])]),
        batch(vec![decl("pip", &["numpy"])]),
    ];
    InstallationOrchestrator::new(&registry, &gate)
        .install(&batches)
        .unwrap();

    let prompts = asked.entries();
    // rpm resolved to {bar, glibc}: plural; pip stayed {numpy}: singular
    assert!(prompts[0].starts_with("Install the following packages?|"));
    assert!(prompts[0].contains("bar glibc"));
    assert!(prompts[1].starts_with("Install the following package?|"));
}

#[test]
fn plan_reports_missing_names_without_installing() {
    let log = CallLog::default();
    let registry = registry_of(vec![
        FakeManager::new(ManagerKind::Rpm, "rpm", log.clone()).with_installed(&["foo"]),
    ]);
    let gate = ScriptedGate::accepting(CallLog::default());

    let plan = InstallationOrchestrator::new(&registry, &gate)
        .plan(&[batch(vec![decl("rpm", &["foo", "bar"])])])
        .unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].0, ManagerKind::Rpm);
    assert_eq!(plan[0].1, vec!["bar"]);
    assert_eq!(log.count_prefixed("resolve:"), 0);
    assert_eq!(log.count_prefixed("install:"), 0);
}
