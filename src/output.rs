use clap::ValueEnum;
use colored::Colorize;

use crate::commands::migrate::{MigratedTicket, MigrationFailure, MigrationReport};
use crate::error::Result;
use crate::model::Status;
use crate::store::paths::ProjectLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

const RULE_WIDTH: usize = 60;

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_run_header(layout: &ProjectLayout, dry_run: bool, format: Format) {
    if format != Format::Pretty {
        return;
    }
    println!("Migrating tickets from: {}", layout.source_root().display());
    println!("                    to: {}", layout.dest_root().display());
    if dry_run {
        println!("{}", "(dry run: nothing will be written)".yellow());
    }
    println!();
}

pub fn print_status_heading(status: Status, count: usize, format: Format) {
    if format != Format::Pretty {
        return;
    }
    println!(
        "{}",
        format!("Processing {status}/ ({count} tickets)...").bold()
    );
}

pub fn print_migrated(ticket: &MigratedTicket, format: Format) {
    if format != Format::Pretty {
        return;
    }
    println!(
        "  {} {} -> {}",
        "-".green(),
        file_name(&ticket.source),
        file_name(&ticket.dest)
    );
}

pub fn print_failure(failure: &MigrationFailure, format: Format) {
    if format != Format::Pretty {
        return;
    }
    println!(
        "  {} {}: {} - {}",
        "!".red(),
        file_name(&failure.file),
        "ERROR".red().bold(),
        failure.error
    );
}

pub fn print_summary(report: &MigrationReport, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(report)?),
        Format::Pretty => {
            println!();
            println!("{}", "=".repeat(RULE_WIDTH));
            let count = report.migrated.len();
            if report.dry_run {
                println!("Dry run complete: {count} tickets would be migrated");
            } else {
                println!("Migration complete: {count} tickets migrated");
            }
            if !report.errors.is_empty() {
                println!("{}", format!("Errors: {}", report.errors.len()).red());
                for err in &report.errors {
                    println!("  - {}: {}", err.file.display(), err.error);
                }
            }
            println!();
            println!("Note: Original tickets folder was NOT deleted.");
            println!("Please verify the migration and delete it manually if satisfied.");
        }
    }
    Ok(())
}
