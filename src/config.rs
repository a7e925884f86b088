use std::{env, path::PathBuf, str::FromStr};

use simplelog::LevelFilter;

use crate::error::GameError;
use crate::grid::Board;

pub const CELL_SIZE: i32 = 20;
pub const BOARD_START: i32 = 200;
pub const BOARD_WIDTH: i32 = 600;
pub const BOARD_HEIGHT: i32 = 400;
pub const INITIAL_SPEED: u32 = 10;
pub const MAX_FOOD_ATTEMPTS: u32 = 1000;

const LOG_LEVEL_VAR: &str = "SNAKE_LOG";
const LOG_FILE_VAR: &str = "SNAKE_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "snake.log";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub board: Board,
    pub initial_speed: u32,
    pub max_food_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: Board {
                left: BOARD_START,
                top: 0,
                width: BOARD_WIDTH,
                height: BOARD_HEIGHT,
                cell_size: CELL_SIZE,
            },
            initial_speed: INITIAL_SPEED,
            max_food_attempts: MAX_FOOD_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Checks the board can hold a starting snake plus one food cell.
    pub fn validate(&self) -> Result<(), GameError> {
        let b = &self.board;

        if b.cell_size <= 0 {
            return Err(GameError::InvalidConfig("cell size must be positive"));
        }
        if b.width <= 0 || b.height <= 0 {
            return Err(GameError::InvalidConfig("board dimensions must be positive"));
        }
        if b.width % b.cell_size != 0 || b.height % b.cell_size != 0 {
            return Err(GameError::InvalidConfig("board dimensions must be multiples of the cell size"));
        }
        if b.capacity() < 2 {
            return Err(GameError::InvalidConfig("board must hold at least two cells"));
        }
        if self.initial_speed == 0 {
            return Err(GameError::InvalidConfig("initial speed must be non-zero"));
        }
        if self.max_food_attempts == 0 {
            return Err(GameError::InvalidConfig("food placement needs at least one attempt"));
        }

        Ok(())
    }
}

pub struct LogConfig {
    pub level: LevelFilter,
    pub path: PathBuf,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_VAR).ok()
            .and_then(|v| LevelFilter::from_str(&v).ok())
            .unwrap_or(LevelFilter::Info);
        let path = env::var_os(LOG_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        LogConfig { level, path }
    }
}
