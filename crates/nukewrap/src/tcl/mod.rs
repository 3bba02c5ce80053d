//! Nuke TCL scripts from command-line node strings.
//!
//! Purpose
//! - Turn `nukecli` words such as
//!   `-read file in.%04d.exr -grade blackpoint .015 -set g -write file out.%04d.exr -execute 1-10`
//!   into a `;`-joined TCL command string Nuke can run in terminal mode.
//! - Nodes are pushed on Nuke's node stack in order; `-set`/`-push` name and
//!   recall stack entries; `-execute` entries run after the whole graph exists;
//!   `-save` writes the script as it stands at that point.
//!
//! Code cross-refs: `NodeClasses` (class lookup), `parse_cli` (commands),
//! `NodeIds` (variable ids).

mod classes;
mod ids;
mod parse;

use std::fmt;

pub use classes::{NodeClasses, PLUGIN_EXTENSIONS};
pub use ids::{NodeIds, RandomIds, SequentialIds};
pub use parse::{parse_cli, split_commands, tokenize, Script};

/// Errors surfaced while building a script. Nothing has been launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TclError {
    /// No node class matches the command.
    UnknownClass { input: String },
    /// The command is a prefix of several node classes.
    AmbiguousClass { input: String, matches: Vec<String> },
    /// `-push NAME` before any `-set NAME`.
    UnknownVariable { name: String },
    /// `-save` with no path.
    MissingSavePath,
}

impl fmt::Display for TclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TclError::UnknownClass { input } => {
                write!(f, "input argument '{input}' could not be matched to a node class")
            }
            TclError::AmbiguousClass { input, matches } => write!(
                f,
                "input argument '{input}' partially matched the following node classes:\n\t{}",
                matches.join(", ")
            ),
            TclError::UnknownVariable { name } => {
                write!(f, "no node was stored under '{name}' (use -set {name} first)")
            }
            TclError::MissingSavePath => write!(f, "-save requires a script path"),
        }
    }
}

impl std::error::Error for TclError {}

#[cfg(test)]
mod tests;
