use std::fs;
use std::io;
use std::path::Path;

use super::TclError;

/// File extensions treated as node plugins when scanning a plugin directory.
pub const PLUGIN_EXTENSIONS: &[&str] = &["so", "dylib", "dll", "gizmo", "tcl"];

/// Known node class names, excluding file-format `*Reader` / `*Writer` plugins.
#[derive(Clone, Debug, Default)]
pub struct NodeClasses {
    names: Vec<String>,
}

fn is_format_plugin(name: &str) -> bool {
    ["Reader", "Writer"]
        .iter()
        .any(|sfx| name.len() > sfx.len() && name.ends_with(sfx))
}

/// `name` is `stem` or `stem` plus one trailing ASCII digit.
fn is_versioned(name: &str, stem: &str, ignore_case: bool) -> bool {
    let (head, tail) = match name.len().checked_sub(stem.len()) {
        Some(0) => (name, ""),
        Some(1) if name.is_char_boundary(stem.len()) => name.split_at(stem.len()),
        _ => return false,
    };
    let head_ok = if ignore_case {
        head.eq_ignore_ascii_case(stem)
    } else {
        head == stem
    };
    head_ok && tail.chars().all(|c| c.is_ascii_digit())
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

impl NodeClasses {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes = Self::default();
        classes.extend(names);
        classes
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !is_format_plugin(&name) && !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    /// Parse a newline-separated list; blank lines and `#` comments are skipped.
    pub fn from_list(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    pub fn from_list_file(path: &Path) -> io::Result<Self> {
        Ok(Self::from_list(&fs::read_to_string(path)?))
    }

    /// Add the stems of plugin files in `dir` (non-recursive).
    pub fn add_plugin_dir(&mut self, dir: &Path) -> io::Result<usize> {
        let before = self.names.len();
        let mut stems = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_plugin = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PLUGIN_EXTENSIONS.contains(&e));
            if !is_plugin {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
        stems.sort();
        self.extend(stems);
        Ok(self.names.len() - before)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolve a command word to a class name.
    ///
    /// Order: exact (highest trailing version digit wins), case-insensitive
    /// exact, then a unique case-insensitive prefix.
    pub fn resolve(&self, input: &str) -> Result<String, TclError> {
        for ignore_case in [false, true] {
            let best = self
                .names
                .iter()
                .filter(|n| is_versioned(n, input, ignore_case))
                .max();
            if let Some(best) = best {
                return Ok(best.clone());
            }
        }

        let mut partial: Vec<&String> = self
            .names
            .iter()
            .filter(|n| starts_with_ignore_case(n, input))
            .collect();
        match partial.len() {
            0 => Err(TclError::UnknownClass {
                input: input.to_string(),
            }),
            1 => Ok(partial[0].clone()),
            _ => {
                partial.sort();
                Err(TclError::AmbiguousClass {
                    input: input.to_string(),
                    matches: partial.into_iter().cloned().collect(),
                })
            }
        }
    }
}
