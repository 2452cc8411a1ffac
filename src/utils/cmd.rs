//! Blocking process invocation helpers.
//!
//! Every call into an external package manager goes through here. Calls
//! block until the child exits; there is no timeout or cancellation at
//! this layer, so a hung backend blocks the whole run.

use crate::error::{DepstrapError, Result};
use std::process::{Command, Output, Stdio};

/// Run a command with stdin closed, capturing stdout and stderr.
pub fn capture(cmd: &mut Command) -> Result<Output> {
    let cmd_debug = render(cmd);

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| DepstrapError::SystemCommandFailed {
            command: cmd_debug,
            reason: e.to_string(),
        })
}

/// Run a command with inherited stdio, for interactive installers.
pub fn passthrough(cmd: &mut Command) -> Result<std::process::ExitStatus> {
    let cmd_debug = render(cmd);

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| DepstrapError::SystemCommandFailed {
            command: cmd_debug,
            reason: e.to_string(),
        })
}

pub fn render(cmd: &Command) -> String {
    format!("{:?}", cmd)
}
