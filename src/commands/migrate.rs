use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::dates::{from_system_time, parse_date};
use crate::document::{extract_title_and_body, fallback_title, parse_header};
use crate::error::Result;
use crate::model::{Dates, Status, Ticket, Timestamp};
use crate::output::{self, Format};
use crate::slug::{DEFAULT_MAX_LENGTH, generate_slug};
use crate::store::files::{TicketWriter, list_sources};
use crate::store::paths::ProjectLayout;
use crate::ticket_id::TicketId;

const CREATED_KEY: &str = "created_at";
const UPDATED_KEY: &str = "updated_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Derive every record but write nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedTicket {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub id: String,
    pub title: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFailure {
    pub file: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub dry_run: bool,
    pub migrated: Vec<MigratedTicket>,
    pub errors: Vec<MigrationFailure>,
}

impl MigrationReport {
    fn new(layout: &ProjectLayout, dry_run: bool) -> Self {
        Self {
            source_root: layout.source_root().to_path_buf(),
            dest_root: layout.dest_root().to_path_buf(),
            dry_run,
            migrated: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Convert one markdown ticket into a JSON record under the writer's root.
pub fn migrate_ticket(
    source: &Path,
    status: Status,
    writer: &TicketWriter,
    options: MigrateOptions,
) -> Result<MigratedTicket> {
    let content = fs::read_to_string(source)?;
    let (header, rest) = parse_header(&content);
    trace!(source = %source.display(), keys = header.len(), "parsed header");

    let (mut title, body) = extract_title_and_body(rest);
    if title.is_empty() {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        title = fallback_title(&stem);
        debug!(source = %source.display(), %title, "no heading; title taken from filename");
    }

    let id = TicketId::generate();
    let slug = generate_slug(&title, DEFAULT_MAX_LENGTH);

    let modified = from_system_time(fs::metadata(source)?.modified()?);
    let created = parse_date(header.get(CREATED_KEY)).unwrap_or_else(|| {
        debug!(source = %source.display(), "created_at missing or unparseable; using mtime");
        modified
    });
    let updated = parse_date(header.get(UPDATED_KEY)).unwrap_or_else(|| {
        debug!(source = %source.display(), "updated_at missing or unparseable; using mtime");
        modified
    });

    let dest = writer.destination_path(status, &slug, id.short());
    let ticket = Ticket {
        id: id.into_string(),
        title,
        body,
        dates: Dates::for_status(status, Timestamp::new(created), Timestamp::new(updated)),
        comments: Vec::new(),
        session: None,
    };

    if options.dry_run {
        debug!(dest = %dest.display(), "dry run; skipping write");
    } else {
        writer.write(&dest, &ticket)?;
    }

    Ok(MigratedTicket {
        source: source.to_path_buf(),
        dest,
        id: ticket.id,
        title: ticket.title,
        status,
    })
}

/// Migrate every status folder of `layout`, reporting as it goes.
///
/// Only a missing source root is fatal; anything that goes wrong for a
/// single file or folder is recorded in the report and the run continues.
pub fn run(
    layout: &ProjectLayout,
    options: MigrateOptions,
    format: Format,
) -> Result<MigrationReport> {
    layout.ensure_source()?;

    output::print_run_header(layout, options.dry_run, format);

    let writer = TicketWriter::new(layout.dest_root());
    let mut report = MigrationReport::new(layout, options.dry_run);

    for status in Status::ALL {
        let status_dir = layout.source_root().join(status.dir_name());
        let files = match list_sources(&status_dir) {
            Ok(Some(files)) if !files.is_empty() => files,
            Ok(_) => {
                debug!(status = %status, "no tickets to migrate");
                continue;
            }
            Err(err) => {
                warn!(dir = %status_dir.display(), error = %err, "cannot list status folder");
                record_failure(&mut report, status_dir, err.to_string(), format);
                continue;
            }
        };

        output::print_status_heading(status, files.len(), format);

        for file in files {
            match migrate_ticket(&file, status, &writer, options) {
                Ok(migrated) => {
                    output::print_migrated(&migrated, format);
                    report.migrated.push(migrated);
                }
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "ticket migration failed");
                    record_failure(&mut report, file, err.to_string(), format);
                }
            }
        }
    }

    output::print_summary(&report, format)?;
    Ok(report)
}

fn record_failure(report: &mut MigrationReport, file: PathBuf, error: String, format: Format) {
    let failure = MigrationFailure { file, error };
    output::print_failure(&failure, format);
    report.errors.push(failure);
}
