//! Spawn Nuke and wait for it.
//!
//! The command line is always `<program> -c <memory> <mode> -- <args...>`.
//! The child inherits stdin/stdout/stderr; its status is reported untouched
//! and mapped to a wrapper exit code by `exit_code`.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::{Command, ExitStatus};

use crate::cfg::{LaunchCfg, END_OF_OPTIONS, MEMORY_FLAG};

/// Failures that stop the launch step.
#[derive(Debug)]
pub enum LaunchError {
    /// The program could not be started (not found, not executable, ...).
    Spawn { program: OsString, source: io::Error },
    /// The child started but waiting on it failed.
    Wait { program: OsString, source: io::Error },
}

impl LaunchError {
    /// Shell-style exit code: 127 for a missing program, 126 when it cannot
    /// be executed, 1 when the wait itself failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            LaunchError::Spawn { .. } => 126,
            LaunchError::Wait { .. } => 1,
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Spawn { program, source } => {
                write!(f, "failed to start {}: {source}", program.to_string_lossy())
            }
            LaunchError::Wait { program, source } => {
                write!(f, "failed waiting for {}: {source}", program.to_string_lossy())
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Spawn { source, .. } | LaunchError::Wait { source, .. } => Some(source),
        }
    }
}

/// Full argv for the child, program first.
pub fn command_line(cfg: &LaunchCfg, args: &[OsString]) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(args.len() + 5);
    argv.push(cfg.program.clone());
    argv.push(MEMORY_FLAG.into());
    argv.push(cfg.memory.clone().into());
    argv.push(cfg.mode_flag.clone().into());
    argv.push(END_OF_OPTIONS.into());
    argv.extend(args.iter().cloned());
    argv
}

/// Unspawned `Command` for `command_line(cfg, args)`.
pub fn command(cfg: &LaunchCfg, args: &[OsString]) -> Command {
    let argv = command_line(cfg, args);
    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);
    cmd
}

/// Run the child to completion and return its status.
pub fn launch(cfg: &LaunchCfg, args: &[OsString]) -> Result<ExitStatus, LaunchError> {
    tracing::debug!(argv = ?command_line(cfg, args), "launching");
    let mut child = command(cfg, args).spawn().map_err(|source| LaunchError::Spawn {
        program: cfg.program.clone(),
        source,
    })?;
    let status = child.wait().map_err(|source| LaunchError::Wait {
        program: cfg.program.clone(),
        source,
    })?;
    tracing::debug!(%status, "child exited");
    Ok(status)
}

/// Wrapper exit code for a child status: the child's own code, `128 + N` for
/// death by signal N, `1` if neither is available.
pub fn exit_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return (code & 0xff) as u8;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return (128 + signal).clamp(0, 255) as u8;
        }
    }
    1
}
