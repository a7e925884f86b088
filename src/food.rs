use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::GameError;
use crate::grid::{Board, Cell};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EatResult {
    Missed,
    Eaten,
    /// Eaten, but no free cell was left to put the next food on.
    BoardFull,
}

pub struct Food {
    position: Cell,
    board: Board,
    max_attempts: u32,
    rng: StdRng,
}

impl Food {
    pub fn new(snake: &Snake, board: Board, max_attempts: u32) -> Result<Self, GameError> {
        Self::with_rng(snake, board, max_attempts, StdRng::from_entropy())
    }

    pub fn with_rng(snake: &Snake, board: Board, max_attempts: u32, rng: StdRng) -> Result<Self, GameError> {
        let mut food = Food { position: board.center(), board, max_attempts, rng };
        food.randomize(snake)?;
        Ok(food)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a random cell the snake does not occupy.
    ///
    /// Random sampling is tried `max_attempts` times; after that the free
    /// cells are enumerated and one is picked among them, so a crowded board
    /// still gets a uniform placement. Fails only when every cell is taken.
    pub fn randomize(&mut self, snake: &Snake) -> Result<Cell, GameError> {
        let (cols, rows) = (self.board.columns(), self.board.rows());

        for _ in 0..self.max_attempts {
            let cell = self.board.cell_at(self.rng.gen_range(0..cols), self.rng.gen_range(0..rows));
            if !snake.occupies(cell) {
                self.position = cell;
                return Ok(cell);
            }
        }

        warn!("food placement missed {} times, scanning free cells", self.max_attempts);
        let free: Vec<Cell> = self.board.cells().filter(|c| !snake.occupies(*c)).collect();
        let cell = free.choose(&mut self.rng).copied().ok_or(GameError::BoardFull)?;
        self.position = cell;
        Ok(cell)
    }

    pub fn reset(&mut self, snake: &Snake) -> Result<Cell, GameError> {
        self.randomize(snake)
    }

    /// Relocates the food and grows the snake when the head is on it.
    pub fn eaten_check(&mut self, snake: &mut Snake) -> EatResult {
        if snake.head() != self.position {
            return EatResult::Missed;
        }

        let placed = self.randomize(snake);
        snake.grow();

        match placed {
            Ok(cell) => {
                debug!("food eaten, moved to ({}, {})", cell.x, cell.y);
                EatResult::Eaten
            }
            Err(_) => EatResult::BoardFull,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: Cell) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::grid::Direction::*;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn long_snake(cfg: &GameConfig) -> Snake {
        let mut s = Snake::new(cfg.board, cfg.initial_speed);
        for _ in 0..9 {
            s.grow();
        }
        s.turn(Right);
        for _ in 0..6 {
            s.move_step();
        }
        s.turn(Down);
        for _ in 0..4 {
            s.move_step();
        }
        s
    }

    #[test]
    fn randomize_avoids_body_and_stays_on_grid() {
        let cfg = GameConfig::default();
        let b = cfg.board;
        let snake = long_snake(&cfg);
        let mut food = Food::with_rng(&snake, b, cfg.max_food_attempts, seeded(7)).unwrap();

        for _ in 0..500 {
            let cell = food.randomize(&snake).unwrap();
            assert!(!snake.body().contains(&cell));
            assert!(b.contains(cell));
            assert_eq!((cell.x - b.left) % b.cell_size, 0);
            assert_eq!((cell.y - b.top) % b.cell_size, 0);
            assert_eq!(food.position(), cell);
        }
    }

    #[test]
    fn never_spawns_on_a_fresh_head() {
        let cfg = GameConfig::default();
        let snake = Snake::new(cfg.board, cfg.initial_speed);

        for seed in 0..5000 {
            let food = Food::with_rng(&snake, cfg.board, cfg.max_food_attempts, seeded(seed)).unwrap();
            assert_ne!(food.position(), snake.head(), "seed {}", seed);
        }
    }

    #[test]
    fn reset_avoids_the_restarted_head() {
        let mut cfg = GameConfig::default();
        cfg.board.width = 2 * cfg.board.cell_size;
        cfg.board.height = cfg.board.cell_size;
        let b = cfg.board;

        // the head sits on the right cell of a 2x1 board with an empty body
        let mut snake = Snake::new(b, cfg.initial_speed);
        let mut food = Food::with_rng(&snake, b, 1, seeded(2)).unwrap();
        for _ in 0..20 {
            snake.reset();
            assert_eq!(food.reset(&snake), Ok(b.cell_at(0, 0)));
            assert_eq!(food.position(), b.cell_at(0, 0));
        }
    }

    #[test]
    fn falls_back_to_the_only_free_cell() {
        let mut cfg = GameConfig::default();
        cfg.board.width = 3 * cfg.board.cell_size;
        cfg.board.height = cfg.board.cell_size;
        let b = cfg.board;

        // snake fills the two left cells of a 3x1 board
        let mut snake = Snake::new(b, cfg.initial_speed);
        snake.grow();
        snake.set_head(b.cell_at(-1, 0));
        snake.turn(Right);
        snake.move_step();
        snake.move_step();

        let mut food = Food::with_rng(&snake, b, 1, seeded(3)).unwrap();
        for _ in 0..20 {
            assert_eq!(food.randomize(&snake), Ok(b.cell_at(2, 0)));
        }
    }

    #[test]
    fn full_board_is_reported() {
        let mut cfg = GameConfig::default();
        cfg.board.width = 2 * cfg.board.cell_size;
        cfg.board.height = cfg.board.cell_size;
        let b = cfg.board;

        let mut snake = Snake::new(b, cfg.initial_speed);
        let mut food = Food::with_rng(&snake, b, 4, seeded(1)).unwrap();

        snake.grow();
        snake.set_head(b.cell_at(-1, 0));
        snake.turn(Right);
        snake.move_step();
        snake.move_step();

        assert_eq!(food.randomize(&snake), Err(GameError::BoardFull));
    }

    #[test]
    fn eaten_check_grows_and_relocates() {
        let cfg = GameConfig::default();
        let mut snake = long_snake(&cfg);
        let mut food = Food::with_rng(&snake, cfg.board, cfg.max_food_attempts, seeded(11)).unwrap();

        food.set_position(snake.head());
        let before = snake.length();
        assert_eq!(food.eaten_check(&mut snake), EatResult::Eaten);
        assert_eq!(snake.length(), before + 1);
        assert_ne!(food.position(), snake.head());
        assert!(!snake.body().contains(&food.position()));
    }

    #[test]
    fn eaten_check_ignores_distant_food() {
        let cfg = GameConfig::default();
        let mut snake = Snake::new(cfg.board, cfg.initial_speed);
        let mut food = Food::with_rng(&snake, cfg.board, cfg.max_food_attempts, seeded(5)).unwrap();

        food.set_position(cfg.board.cell_at(0, 0));
        assert_eq!(food.eaten_check(&mut snake), EatResult::Missed);
        assert_eq!(snake.length(), 1);
        assert_eq!(food.position(), cfg.board.cell_at(0, 0));
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let mut cfg = GameConfig::default();
        cfg.board.width = 2 * cfg.board.cell_size;
        cfg.board.height = cfg.board.cell_size;
        let b = cfg.board;

        let mut snake = Snake::new(b, cfg.initial_speed);
        snake.grow();
        snake.set_head(b.cell_at(-1, 0));
        snake.turn(Right);
        snake.move_step();

        let mut food = Food::with_rng(&snake, b, 4, seeded(9)).unwrap();
        assert_eq!(food.position(), b.cell_at(1, 0));

        snake.move_step();
        assert_eq!(food.eaten_check(&mut snake), EatResult::BoardFull);
        assert_eq!(snake.length(), 3);
    }
}
