//! Terminal entry point for the retro todo window.
//!
//! Click "Add" or press Enter to add the typed todo, click a row to toggle
//! it, click "Delete" to remove it. Esc or Ctrl-C quits.

use anyhow::Context;
use retro_todo::{Config, app, telemetry};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    telemetry::init(&config).context("Failed to initialise logging")?;

    tracing::info!(log_file = %config.log_file.display(), "Starting retro-todo");

    app::run(&config).context("Terminal session failed")?;

    tracing::info!("retro-todo exited");
    Ok(())
}
