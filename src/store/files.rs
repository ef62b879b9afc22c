use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;
use crate::model::{Status, Ticket};

/// Extension of legacy ticket files.
pub const SOURCE_EXT: &str = "md";

/// Extension of migrated ticket records.
pub const RECORD_EXT: &str = "json";

/// Markdown tickets directly inside `status_dir`, sorted by file name.
///
/// Returns `Ok(None)` when the directory does not exist.
pub fn list_sources(status_dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    if !status_dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(status_dir)? {
        let entry = entry?;
        let path = entry.path();
        // `is_file` follows symlinks, so linked tickets are migrated too.
        if path.extension().is_some_and(|ext| ext == SOURCE_EXT) && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(Some(files))
}

/// Writes ticket records under `<dest_root>/<status>/`.
pub struct TicketWriter {
    root: PathBuf,
}

impl TicketWriter {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            root: dest_root.into(),
        }
    }

    pub fn status_dir(&self, status: Status) -> PathBuf {
        self.root.join(status.dir_name())
    }

    /// `<status_dir>/<slug>-<short_id>.json`
    pub fn destination_path(&self, status: Status, slug: &str, short_id: &str) -> PathBuf {
        self.status_dir(status)
            .join(format!("{slug}-{short_id}.{RECORD_EXT}"))
    }

    /// Serialize `ticket` as pretty JSON with a trailing newline, replacing
    /// any existing file at `path`.
    pub fn write(&self, path: &Path, ticket: &Ticket) -> Result<()> {
        let mut json = serde_json::to_string_pretty(ticket)?;
        json.push('\n');

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        write_atomic(path, json.as_bytes())
    }
}

/// Write through a temp file in the target directory, then rename over the
/// target so readers never see a partial record.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = dir.join(format!(".tmp-{}", Uuid::new_v4().simple()));

    let result = (|| -> std::io::Result<()> {
        let mut tmp = fs::File::create(&tmp_path)?;
        tmp.write_all(data)?;
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(&tmp_path, path)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dates, Timestamp};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_ticket(title: &str) -> Ticket {
        let stamp = Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        Ticket {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: String::new(),
            dates: Dates::for_status(Status::Backlog, stamp, stamp),
            comments: vec![],
            session: None,
        }
    }

    #[test]
    fn list_sources_missing_dir_is_none() {
        let dir = tempdir().unwrap();
        assert!(list_sources(&dir.path().join("nope")).unwrap().is_none());
    }

    #[test]
    fn list_sources_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.md", "a.md", "notes.txt", "c.markdown", "C.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let files = list_sources(dir.path()).unwrap().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["C.md", "a.md", "b.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_sources_follows_symlinked_tickets() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.txt");
        fs::write(&target, "# Linked ticket\n").unwrap();
        let status_dir = dir.path().join("backlog");
        fs::create_dir(&status_dir).unwrap();
        std::os::unix::fs::symlink(&target, status_dir.join("linked.md")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), status_dir.join("dangling.md"))
            .unwrap();

        let files = list_sources(&status_dir).unwrap().unwrap();
        assert_eq!(files, vec![status_dir.join("linked.md")]);
    }

    #[test]
    fn list_sources_empty_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert_eq!(list_sources(dir.path()).unwrap(), Some(vec![]));
    }

    #[test]
    fn destination_path_uses_slug_and_short_id() {
        let writer = TicketWriter::new("/p/.cortex/tickets");
        assert_eq!(
            writer.destination_path(Status::Review, "fix-login", "0123abcd"),
            PathBuf::from("/p/.cortex/tickets/review/fix-login-0123abcd.json")
        );
    }

    #[test]
    fn write_creates_dirs_and_ends_with_newline() {
        let dir = tempdir().unwrap();
        let writer = TicketWriter::new(dir.path().join(".cortex").join("tickets"));
        let path = writer.destination_path(Status::Done, "example", "deadbeef");

        writer.write(&path, &sample_ticket("Example")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"title\": \"Example\""));
        let parsed: Ticket = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.title, "Example");

        let leftovers: Vec<_> = fs::read_dir(writer.status_dir(Status::Done))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let writer = TicketWriter::new(dir.path());
        let path = writer.destination_path(Status::Backlog, "same", "00000000");

        writer.write(&path, &sample_ticket("First")).unwrap();
        writer.write(&path, &sample_ticket("Second")).unwrap();

        let parsed: Ticket = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.title, "Second");
    }
}
