use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepstrapError {
    /// No registered manager claims the dependency tag. Raised during
    /// accumulation and aborts the run before anything is installed.
    #[error("No package manager is registered for dependency tag '{tag}'")]
    PackageManagerNotFound { tag: String },

    /// The manager's backend is absent from the host. Non-fatal for a
    /// single installed-check; the affected name is skipped.
    #[error("Package manager '{kind}' is not usable on this host")]
    PackageManagerUnavailable { kind: String },

    /// A manager's own prerequisite cannot be provisioned. Fatal for that
    /// manager's group, never for the run.
    #[error("Cannot bootstrap '{kind}': {reason}")]
    CorePackageManagerMissing { kind: String, reason: String },

    #[error("Dependency resolution failed for '{kind}': {reason}")]
    ResolutionError { kind: String, reason: String },

    #[error("Install failed for '{kind}': {reason}")]
    InstallError { kind: String, reason: String },

    /// Aggregate of all group failures in one run, joined with "; ".
    #[error("{0}")]
    InstallationFailed(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DepstrapError>;
