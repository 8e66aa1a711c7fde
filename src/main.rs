//! Casefile
//!
//! A terminal detective game: walk the scene, bag the clues, lean on the
//! suspects and name the culprit before your credibility runs dry.

use anyhow::Context;
use casefile::config::LaunchOptions;
use casefile::tui::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log to a file; the terminal belongs to the game
fn init_logging(path: &Path) -> WorkerGuard {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "casefile.log".into());

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn main() -> casefile::Result<()> {
    let options = LaunchOptions::parse();
    let _guard = init_logging(&options.log_file);
    tracing::info!(version = casefile::VERSION, seed = ?options.seed, tutorial = options.tutorial, "starting");

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&options);

    // Main loop
    let result = (|| -> casefile::Result<()> {
        while app.running {
            terminal.draw(|frame| app.render(frame))?;
            if !app.handle_input()? {
                break;
            }
        }
        Ok(())
    })();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    tracing::info!("shutting down");

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Casefile.                          ║");
    println!("║  The city will still need a detective tomorrow.        ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    result
}
