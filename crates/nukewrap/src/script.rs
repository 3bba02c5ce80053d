//! Temporary script files with guaranteed removal.
//!
//! An `InlineScript` owns a file in the system temp dir. The file is removed
//! exactly once: by `close()` on the normal path, or by `Drop` on early
//! returns and unwinding. Removal failures are logged, never returned.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;

use tempfile::TempPath;

/// Scoped temporary file holding script text.
#[derive(Debug)]
pub struct InlineScript {
    path: Option<TempPath>,
}

impl InlineScript {
    /// Write `text` to a fresh `<prefix>XXXX<suffix>` file and close the handle.
    pub fn create(text: &OsStr, prefix: &str, suffix: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile()?;
        file.write_all(text.as_encoded_bytes())?;
        file.flush()?;
        let path = file.into_temp_path();
        tracing::debug!(path = %path.display(), bytes = text.len(), "inline script written");
        Ok(Self { path: Some(path) })
    }

    pub fn path(&self) -> &Path {
        // `path` is only taken by `close`/`drop`, which consume the guard.
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Remove the file now. A failure is logged as a cleanup warning.
    pub fn close(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let shown = path.to_path_buf();
        match path.close() {
            Ok(()) => tracing::debug!(path = %shown.display(), "inline script removed"),
            Err(err) => tracing::warn!(
                path = %shown.display(),
                error = %err,
                "could not remove temporary script"
            ),
        }
    }
}

impl Drop for InlineScript {
    fn drop(&mut self) {
        self.remove();
    }
}
