use std::path::{Component, Path, PathBuf};

use crate::error::{MigrateError, Result};

/// Legacy markdown tickets, relative to the project root.
pub const SOURCE_DIR: &str = "tickets";

/// Migrated JSON tickets, relative to the project root.
pub const DEST_DIR: [&str; 2] = [".cortex", "tickets"];

/// Where a project's legacy and migrated tickets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl ProjectLayout {
    /// Resolve a user-supplied project path: expand `~`, absolutize against
    /// the current directory, and canonicalize when it exists. Paths that do
    /// not exist yet still have `.` and `..` segments folded away.
    pub fn resolve(raw: &str) -> Result<Self> {
        let expanded = expand_tilde(raw)?;
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            std::env::current_dir()?.join(expanded)
        };
        let root = absolute
            .canonicalize()
            .unwrap_or_else(|_| normalize_lexically(&absolute));
        Ok(Self::at(root))
    }

    /// Layout rooted at an already-resolved directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let source_root = root.join(SOURCE_DIR);
        let dest_root = DEST_DIR.iter().fold(root.clone(), |p, seg| p.join(seg));
        Self {
            root,
            source_root,
            dest_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Fail unless the legacy tickets directory exists.
    pub fn ensure_source(&self) -> Result<()> {
        if self.source_root.is_dir() {
            Ok(())
        } else {
            Err(MigrateError::SourceNotFound(self.source_root.clone()))
        }
    }
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return home_dir().ok_or(MigrateError::HomeDirUnavailable);
    }
    if let Some(suffix) = raw.strip_prefix("~/") {
        return home_dir()
            .map(|home| home.join(suffix))
            .ok_or(MigrateError::HomeDirUnavailable);
    }
    Ok(PathBuf::from(raw))
}

/// Fold `.` and `..` segments without touching the filesystem; `..` at the
/// root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("USERPROFILE")
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
}
