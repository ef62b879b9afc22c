use clap::Parser;
use cortex_migrate::commands::migrate::{self, MigrateOptions};
use cortex_migrate::output::Format;
use cortex_migrate::store::paths::ProjectLayout;

/// Migrate markdown tickets (tickets/<status>/*.md) into JSON records
/// (.cortex/tickets/<status>/*.json). Source files are never modified.
#[derive(Parser)]
#[command(name = "migrate-tickets", version)]
struct Cli {
    /// Project root containing the legacy tickets/ directory
    project: String,
    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    format: Format,
    /// Show what would be written without creating any files
    #[arg(long)]
    dry_run: bool,
    /// Increase diagnostic logging on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Silence diagnostic logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn run(cli: &Cli) -> cortex_migrate::error::Result<()> {
    let layout = ProjectLayout::resolve(&cli.project)?;
    let options = MigrateOptions {
        dry_run: cli.dry_run,
    };
    migrate::run(&layout, options, cli.format)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    cortex_migrate::logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        match cli.format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            Format::Pretty => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
