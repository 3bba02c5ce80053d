//! Wrapper argv → Nuke argv.
//!
//! Rules, applied per argument in order:
//! 1. The value after the code flag is written to a temporary `.py` script and
//!    replaced by the script's path.
//! 2. The code flag itself is dropped; a second one is a usage error.
//! 3. An argument naming a symbolic link is replaced by its real path.
//! 4. Anything else is forwarded verbatim.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;

use crate::cfg::TranslateCfg;
use crate::realpath::{is_symlink, realpath};
use crate::script::InlineScript;

/// Errors raised while translating arguments. No process has been launched.
#[derive(Debug)]
pub enum TranslateError {
    /// The code flag appeared after an inline script was already created.
    RepeatedCodeFlag { flag: String },
    /// The code flag was the last argument.
    MissingCodeValue { flag: String },
    /// The inline script could not be written.
    WriteScript(io::Error),
}

impl TranslateError {
    /// Usage errors are caller mistakes rather than environment failures.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            TranslateError::RepeatedCodeFlag { .. } | TranslateError::MissingCodeValue { .. }
        )
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::RepeatedCodeFlag { flag } => {
                write!(f, "{flag} flag may only be given once")
            }
            TranslateError::MissingCodeValue { flag } => {
                write!(f, "{flag} flag requires a code argument")
            }
            TranslateError::WriteScript(err) => {
                write!(f, "could not write inline script: {err}")
            }
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::WriteScript(err) => Some(err),
            _ => None,
        }
    }
}

/// Where the translator is between two arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseState {
    AwaitingArgument,
    /// The previous argument was the code flag.
    ConsumingCodeValue,
}

/// Translated argv plus the inline script it may reference.
///
/// Dropping a `Translation` removes the script; keep it alive until the child
/// has exited.
#[derive(Debug)]
pub struct Translation {
    pub args: Vec<OsString>,
    pub script: Option<InlineScript>,
}

impl Translation {
    pub fn script_path(&self) -> Option<&Path> {
        self.script.as_ref().map(InlineScript::path)
    }

    /// Release the inline script, if any.
    pub fn finish(self) {
        if let Some(script) = self.script {
            script.close();
        }
    }
}

struct Translator<'a> {
    cfg: &'a TranslateCfg,
    state: ParseState,
    script: Option<InlineScript>,
    out: Vec<OsString>,
}

impl<'a> Translator<'a> {
    fn new(cfg: &'a TranslateCfg) -> Self {
        Self {
            cfg,
            state: ParseState::AwaitingArgument,
            script: None,
            out: Vec::new(),
        }
    }

    fn step(&mut self, arg: OsString) -> Result<(), TranslateError> {
        match self.state {
            ParseState::ConsumingCodeValue => {
                let script = InlineScript::create(
                    &arg,
                    &self.cfg.script_prefix,
                    &self.cfg.script_suffix,
                )
                .map_err(TranslateError::WriteScript)?;
                tracing::debug!(path = %script.path().display(), "inline code");
                self.out.push(script.path().as_os_str().to_os_string());
                self.script = Some(script);
                self.state = ParseState::AwaitingArgument;
            }
            ParseState::AwaitingArgument if arg.as_os_str() == self.cfg.code_flag.as_str() => {
                if self.script.is_some() {
                    return Err(TranslateError::RepeatedCodeFlag {
                        flag: self.cfg.code_flag.clone(),
                    });
                }
                self.state = ParseState::ConsumingCodeValue;
            }
            ParseState::AwaitingArgument => {
                let resolved = resolve_link(arg);
                self.out.push(resolved);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Translation, TranslateError> {
        if self.state == ParseState::ConsumingCodeValue {
            return Err(TranslateError::MissingCodeValue {
                flag: self.cfg.code_flag.clone(),
            });
        }
        Ok(Translation {
            args: self.out,
            script: self.script,
        })
    }
}

/// Real path for link arguments, the argument itself otherwise.
fn resolve_link(arg: OsString) -> OsString {
    let path = Path::new(&arg);
    if !is_symlink(path) {
        return arg;
    }
    match realpath(path) {
        Ok(real) => {
            tracing::debug!(link = %path.display(), real = %real.display(), "resolved link");
            real.into_os_string()
        }
        Err(err) => {
            tracing::warn!(
                link = %path.display(),
                error = %err,
                "could not resolve link; passing through"
            );
            arg
        }
    }
}

/// Translate wrapper arguments (program name excluded).
///
/// On error any inline script already written is removed before returning.
pub fn translate<I>(args: I, cfg: &TranslateCfg) -> Result<Translation, TranslateError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut translator = Translator::new(cfg);
    for arg in args {
        translator.step(arg.into())?;
    }
    translator.finish()
}
