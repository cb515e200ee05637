// keytap - On-screen keyboard for the terminal
//
// Renders a clickable keyboard under a text field. Clicking a key edits the
// field at its caret; typing on the physical keyboard lights the matching
// on-screen keys.
//
// Architecture:
// - Keyboard: key model, caret-aware edits, pressed state, render tree
// - TUI (ratatui): text field, keyboard panel, event loop
// - Config: TOML file layered under env and CLI overrides
// - Logging: tracing into an in-app buffer plus optional rolling files

mod cli;
mod config;
mod keyboard;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use logging::LogBuffer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle config subcommands first; they exit without starting the UI
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            config::report_error(&e);
            std::process::exit(1);
        }
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    // Logs go to the in-app buffer so they never garble the display.
    // The guard must live until exit so file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, &log_buffer);

    tracing::info!(version = config::VERSION, "keytap starting");

    let text = tui::run_tui(config, log_buffer, cli.text).await?;

    tracing::info!("keytap stopped");

    if cli.print {
        println!("{}", text);
    }

    Ok(())
}
