use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "neuro_tui=debug,neuro_core=debug,neuro_core_plus=debug,info"
    } else {
        "neuro_tui=info,neuro_core_plus=info,warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Headless subcommands log compactly to stderr, leaving stdout for results.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// The TUI owns the terminal, so its logs go to a file.
pub fn init_file_logger(verbose: bool, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();
    Ok(())
}
