//! Non-strict real-path resolution.
//!
//! `std::fs::canonicalize` fails on dangling links; arguments naming a link
//! whose target does not exist yet (an output path, say) must still resolve
//! to that target. `realpath` walks the path component by component, expands
//! every link it meets, and keeps missing components as they are (like
//! `realpath -m`).

use std::collections::VecDeque;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::cfg::MAX_LINK_HOPS;

/// True if `path` itself is a symbolic link (the link is not followed).
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

/// Owned path component queued for resolution.
#[derive(Debug)]
enum Step {
    /// Prefix or root: replaces everything resolved so far.
    Anchor(OsString),
    Parent,
    Name(OsString),
}

fn push_components(queue: &mut VecDeque<Step>, path: &Path) {
    let steps: Vec<Step> = path
        .components()
        .filter_map(|c| match c {
            Component::Prefix(p) => Some(Step::Anchor(p.as_os_str().to_os_string())),
            Component::RootDir => Some(Step::Anchor(c.as_os_str().to_os_string())),
            Component::CurDir => None,
            Component::ParentDir => Some(Step::Parent),
            Component::Normal(name) => Some(Step::Name(name.to_os_string())),
        })
        .collect();
    for step in steps.into_iter().rev() {
        queue.push_front(step);
    }
}

/// Absolute path of `path` with every symbolic link expanded.
///
/// Relative inputs resolve against the current directory. Components that do
/// not exist are kept verbatim. Fails after `MAX_LINK_HOPS` expansions (link
/// loops) or when a link cannot be read.
pub fn realpath(path: &Path) -> io::Result<PathBuf> {
    let mut out = if path.has_root() {
        PathBuf::new()
    } else {
        env::current_dir()?
    };
    let mut queue = VecDeque::new();
    push_components(&mut queue, path);

    let mut hops = 0usize;
    while let Some(step) = queue.pop_front() {
        match step {
            Step::Anchor(anchor) => out.push(anchor),
            Step::Parent => {
                out.pop();
            }
            Step::Name(name) => {
                let candidate = out.join(&name);
                if !is_symlink(&candidate) {
                    out = candidate;
                    continue;
                }
                hops += 1;
                if hops > MAX_LINK_HOPS {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!(
                            "too many levels of symbolic links resolving {}",
                            path.display()
                        ),
                    ));
                }
                let target = fs::read_link(&candidate)?;
                // Relative targets are relative to the link's directory, which
                // is `out` as it stands.
                push_components(&mut queue, &target);
            }
        }
    }
    Ok(out)
}
