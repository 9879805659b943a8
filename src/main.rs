mod arena;
mod config;
mod food;
mod game;
mod input;
mod render;
mod snake;
mod term;

use std::fs::File;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Grid cell address. Y grows upwards.
pub type Coords = (i32, i32);

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("starting snake");

    let mut term = term::TermManager::new().context("failed to query terminal size")?;
    term.setup().context("failed to set up terminal")?;

    let result = play(&mut term);

    // Leave the terminal usable even when the game loop failed.
    term.restore().context("failed to restore terminal")?;
    result
}

fn play(term: &mut term::TermManager) -> anyhow::Result<()> {
    let (events_tx, events_rx) = mpsc::channel();
    input::spawn_listener(events_tx).context("failed to start input listener")?;

    let mut game = game::Game::new();
    game.run(term, &events_rx)
}

fn init_logging() -> anyhow::Result<()> {
    let log_file = File::create(config::LOG_FILE)
        .with_context(|| format!("failed to create {}", config::LOG_FILE))?;

    install_subscriber(Arc::new(log_file))
}

fn install_subscriber<W>(writer: W) -> anyhow::Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")
}
