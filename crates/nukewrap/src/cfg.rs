//! Defaults and environment overrides for the wrappers.
//!
//! Policy
//! - Defaults are fixed constants matching the studio launch line
//!   `Nuke -c 4G -t --`. Only the program and the memory limit can be
//!   overridden, and only through the environment: `nukepy` forwards every
//!   argument, so it cannot own any flags.

use std::env;
use std::ffi::OsString;

/// Executable launched when `NUKEPY_NUKE` is unset.
pub const DEFAULT_PROGRAM: &str = "Nuke";
/// Cache memory limit passed with `MEMORY_FLAG`.
pub const DEFAULT_MEMORY: &str = "4G";
/// Nuke's cache-memory flag.
pub const MEMORY_FLAG: &str = "-c";
/// Nuke's terminal (no GUI) mode flag.
pub const MODE_FLAG: &str = "-t";
/// Ends Nuke's option parsing so translated args are never read as flags.
pub const END_OF_OPTIONS: &str = "--";
/// Wrapper flag whose value is inline Python.
pub const CODE_FLAG: &str = "-c";
/// Suffix of the temporary file holding inline code.
pub const SCRIPT_SUFFIX: &str = ".py";
/// Upper bound on symlink hops while resolving one path (Linux `MAXSYMLINKS`).
pub const MAX_LINK_HOPS: usize = 40;

/// Overrides the launched program.
pub const ENV_PROGRAM: &str = "NUKEPY_NUKE";
/// Overrides the memory limit.
pub const ENV_MEMORY: &str = "NUKEPY_MEMORY";
/// `tracing_subscriber::EnvFilter` directives for both binaries.
pub const ENV_LOG: &str = "NUKEPY_LOG";

/// How the external application is invoked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchCfg {
    pub program: OsString,
    pub memory: String,
    pub mode_flag: String,
}

impl Default for LaunchCfg {
    fn default() -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            memory: DEFAULT_MEMORY.to_string(),
            mode_flag: MODE_FLAG.to_string(),
        }
    }
}

impl LaunchCfg {
    /// Defaults, with `NUKEPY_NUKE` / `NUKEPY_MEMORY` applied when non-empty.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(program) = env::var_os(ENV_PROGRAM).filter(|v| !v.is_empty()) {
            cfg.program = program;
        }
        if let Ok(memory) = env::var(ENV_MEMORY) {
            if !memory.is_empty() {
                cfg.memory = memory;
            }
        }
        cfg
    }
}

/// Which token marks inline code, and how the script file is named.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslateCfg {
    pub code_flag: String,
    pub script_prefix: String,
    pub script_suffix: String,
}

impl Default for TranslateCfg {
    fn default() -> Self {
        Self {
            code_flag: CODE_FLAG.to_string(),
            script_prefix: "nukepy-".to_string(),
            script_suffix: SCRIPT_SUFFIX.to_string(),
        }
    }
}
