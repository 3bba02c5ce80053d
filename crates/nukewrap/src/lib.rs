//! Argument translation and launching for the Nuke wrappers.
//!
//! Purpose
//! - `translate` rewrites the wrapper's argv: `-c <code>` becomes a temporary
//!   script path, and symbolic links become their real paths.
//! - `launch` runs `Nuke -c 4G -t -- <args>` with inherited stdio and waits.
//! - `tcl` builds TCL scripts from `nukecli` node strings.
//!
//! Binaries live in `crates/nukepy` and `crates/nukecli`; this crate holds
//! everything they share so it can be tested without a Nuke install.

pub mod cfg;
pub mod launch;
pub mod logging;
pub mod realpath;
pub mod script;
pub mod tcl;
pub mod translate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{LaunchCfg, TranslateCfg};
pub use launch::{command, command_line, exit_code, launch, LaunchError};
pub use realpath::{is_symlink, realpath};
pub use script::InlineScript;
pub use translate::{translate, ParseState, TranslateError, Translation};
