//! TUI entrypoint: plots the selected model's trace (time on X, first state variable on Y)
//! Controls: [m] Model, [+/-] Current, [s] Sweep step, [r] Run/Pause, [e] Export, [q] Quit
//!
//! Subcommands `run`, `sweep` and `models` work headless and write CSV.

mod app;
mod backend;
mod commands;
mod logger;
mod ui;

use anyhow::Result;
use app::App;
use backend::CoreBackend;
use clap::{Parser, Subcommand};
use ui::draw;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEventKind},
    execute, terminal,
};
use neuro_core_plus::{CurrentSweep, SimulationConfig};
use ratatui::{backend::CrosstermBackend, Terminal};

#[derive(Parser)]
#[command(name = "neuro-tui", version, about = "Single-neuron model explorer")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive viewer (the default)
    Tui {
        /// Start on the model and run settings of this config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory for `e` exports
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
        /// Log file (the terminal is taken by the UI)
        #[arg(long, default_value = "neuro-tui.log")]
        log_file: PathBuf,
    },
    /// Simulate a config once and write its trace as CSV
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Output file; stdout if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Sweep the injected current of a config
    Sweep {
        #[arg(short, long)]
        config: PathBuf,
        /// Frames in long form; stdout if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Frequency-current curve
        #[arg(long)]
        fi: Option<PathBuf>,
    },
    /// List the models with their default parameters
    Models,
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    // Leave alternate screen and show cursor
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Run { config, out }) => {
            logger::init_cli_logger(cli.verbose);
            commands::run(&config, out.as_deref())
        }
        Some(Command::Sweep { config, out, fi }) => {
            logger::init_cli_logger(cli.verbose);
            commands::sweep(&config, out.as_deref(), fi.as_deref())
        }
        Some(Command::Models) => {
            commands::models();
            Ok(())
        }
        Some(Command::Tui { config, export_dir, log_file }) => {
            run_tui(cli.verbose, config, export_dir, log_file)
        }
        None => run_tui(cli.verbose, None, PathBuf::from("."), PathBuf::from("neuro-tui.log")),
    }
}

fn run_tui(verbose: bool, config: Option<PathBuf>, export_dir: PathBuf, log_file: PathBuf) -> Result<()> {
    logger::init_file_logger(verbose, &log_file)?;

    // Load before touching the terminal so config errors print normally
    let (backend, sweep) = match config {
        Some(path) => {
            let cfg = SimulationConfig::from_file(&path)?;
            tracing::info!(path = %path.display(), model = cfg.model.name(), "loaded config");
            (CoreBackend::from_config(&cfg), cfg.sweep.unwrap_or_default())
        }
        None => (CoreBackend::new(), CurrentSweep::default()),
    };

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let mut app = App::new(backend, sweep, export_dir);
    let result = event_loop(&mut terminal, &mut app);

    // Cleanup
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<CoreBackend>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        draw(terminal, app)?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('m') => app.next_model(),
                    KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_current(app.current_step),
                    KeyCode::Char('-') => app.adjust_current(-app.current_step),
                    KeyCode::Char('s') => app.step_sweep(),
                    KeyCode::Char('r') => app.toggle_running(),
                    KeyCode::Char('e') => app.export(),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}
