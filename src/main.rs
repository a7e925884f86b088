mod config;
mod display;
mod error;
mod food;
mod game;
mod grid;
mod pacer;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use log::{error, info};
use simplelog::{Config, WriteLogger};

use config::{GameConfig, LogConfig};
use game::GameSession;
use pacer::FramePacer;
use term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    // The terminal is taken over by the game, so logs go to a file
    let log_cfg = LogConfig::from_env();
    let file = File::create(&log_cfg.path)
        .with_context(|| format!("creating log file {}", log_cfg.path.display()))?;
    WriteLogger::init(log_cfg.level, Config::default(), file).context("initializing logger")?;

    let config = GameConfig::default();
    config.validate()?;
    info!("starting on a {}x{} board", config.board.columns(), config.board.rows());

    let term = TermManager::new(config.board)?;
    let mut session = GameSession::new(&config, term, FramePacer::new())?;

    let res = session.display_mut().setup().and_then(|_| session.run());
    if let Err(e) = session.display_mut().restore() {
        error!("failed to restore terminal: {:#}", e);
    }
    if let Err(e) = &res {
        error!("{:#}", e);
    }

    res
}
