use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::classes::NodeClasses;
use super::ids::NodeIds;
use super::TclError;

/// A built script: graph statements, deferred executes, and save warnings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    pub commands: Vec<String>,
    pub executes: Vec<String>,
    pub warnings: Vec<String>,
}

impl Script {
    /// All statements in run order.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .chain(self.executes.iter())
            .map(String::as_str)
    }

    /// Statements joined by `;`, with a trailing `;`.
    pub fn tcl(&self) -> String {
        let mut out = self.statements().collect::<Vec<_>>().join(";");
        out.push(';');
        out
    }
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A brace group of numbers (knob arrays, nested for matrices) or a bare word.
    RE.get_or_init(|| Regex::new(r"(\{[{}.0-9\s]+\}|[^\s]+)").expect("token regex is valid"))
}

/// Split joined words into one string per `-command`.
pub fn split_commands<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let joined: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    let raw = format!(" {}", joined.join(" "));
    raw.split(" -")
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens of one command line; the first is the command.
pub fn tokenize(line: &str) -> Vec<&str> {
    token_re().find_iter(line).map(|m| m.as_str()).collect()
}

struct Builder<'a> {
    classes: &'a NodeClasses,
    ids: &'a mut dyn NodeIds,
    vars: HashMap<String, String>,
    pending: Vec<(String, Option<String>)>,
    script: Script,
}

impl<'a> Builder<'a> {
    fn command(&mut self, cmd: &str, args: &[&str]) -> Result<(), TclError> {
        match (cmd, args) {
            ("set", [name]) => {
                let id = self.ids.next_id(name);
                self.script.commands.push(format!("set {id} [stack 0]"));
                self.vars.insert(name.to_string(), id);
            }
            ("push", ["0"]) => self.script.commands.push("push 0".to_string()),
            ("push", [name]) => {
                let id = self.vars.get(*name).ok_or_else(|| TclError::UnknownVariable {
                    name: name.to_string(),
                })?;
                self.script.commands.push(format!("push ${id}"));
            }
            ("execute", _) => {
                let id = self.ids.next_id(cmd);
                self.script.commands.push(format!("set {id} [stack 0]"));
                self.pending.push((id, args.first().map(|r| r.to_string())));
            }
            ("save", _) => self.save(args)?,
            _ => {
                let class = self.classes.resolve(cmd)?;
                self.script
                    .commands
                    .push(format!("{class} {{{}}}", args.join(" ")));
            }
        }
        Ok(())
    }

    fn save(&mut self, args: &[&str]) -> Result<(), TclError> {
        let (path, rest) = args.split_first().ok_or(TclError::MissingSavePath)?;
        let target = Path::new(path);
        if target.is_dir() {
            self.warn(format!("script save path '{path}' is a directory. Ignoring."));
            return Ok(());
        }
        if target.exists() {
            self.warn(format!("script save path already exists: '{path}'"));
            match rest.first() {
                None => {
                    self.warn("no force command found. Skipping script save.".to_string());
                    return Ok(());
                }
                Some(&"force") => self.warn("Forcing script save.".to_string()),
                Some(_) => {
                    self.warn(
                        "invalid 'save' syntax. Use '-save <path> force' to force-overwrite \
                         a save target. Skipping script save."
                            .to_string(),
                    );
                    return Ok(());
                }
            }
        }
        self.script.commands.push(format!("script_save {{{path}}}"));
        Ok(())
    }

    fn warn(&mut self, msg: String) {
        tracing::warn!("{msg}");
        self.script.warnings.push(msg);
    }

    fn finish(mut self) -> Script {
        for (id, range) in std::mem::take(&mut self.pending) {
            let stmt = match range {
                Some(range) => format!("execute ${id} {range}"),
                None => format!("execute ${id} [value ${id}.first]-[value ${id}.last]"),
            };
            self.script.executes.push(stmt);
        }
        self.script
    }
}

/// Build a script from `nukecli` words.
pub fn parse_cli<S: AsRef<str>>(
    words: &[S],
    classes: &NodeClasses,
    ids: &mut dyn NodeIds,
) -> Result<Script, TclError> {
    let mut builder = Builder {
        classes,
        ids,
        vars: HashMap::new(),
        pending: Vec::new(),
        script: Script::default(),
    };
    for line in split_commands(words) {
        let tokens = tokenize(&line);
        let Some((cmd, args)) = tokens.split_first() else {
            continue;
        };
        builder.command(cmd, args)?;
    }
    Ok(builder.finish())
}
