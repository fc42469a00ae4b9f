//! wobblebox - terminal step sequencer with a wobble bass
//!
//! Run with: cargo run --release
//! Logs go to ./wobblebox.log (RUST_LOG to filter).

mod app;
mod camera;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // The terminal belongs to the UI, so logs go to a file
    let log = File::create("wobblebox.log").wrap_err("failed to create wobblebox.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    app::run()
}
