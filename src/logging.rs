use tracing::Level;

/// Map `-v` repetitions to a level; `quiet` wins over any verbosity.
pub fn level_for(verbose: u8, quiet: bool) -> Option<Level> {
    if quiet {
        return None;
    }
    Some(match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    })
}

/// Install the stderr diagnostics subscriber. Progress and the summary go to
/// stdout separately, so diagnostics never interleave with JSON output.
pub fn init_logging(verbose: u8, quiet: bool) {
    let Some(level) = level_for(verbose, quiet) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
