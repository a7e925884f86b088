use anyhow::Result;
use log::{debug, info};

use crate::config::GameConfig;
use crate::display::{Display, Frame, InputEvent, Menu};
use crate::food::{EatResult, Food};
use crate::grid::{Direction, Heading};
use crate::pacer::Pace;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Starting,
    Playing,
    GameOver { won: bool },
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    Running,
    Paused,
    Crashed,
    Won,
    Quit,
}

/// Whether `direction` is allowed given the current heading: a snake can never
/// turn straight back on itself.
pub fn allows_turn(heading: Heading, direction: Direction) -> bool {
    heading.reverse_turn() != Some(direction)
}

pub struct GameSession<D: Display, P: Pace> {
    snake: Snake,
    food: Food,
    display: D,
    pacer: P,
    state: SessionState,
    paused: bool,
}

impl<D: Display, P: Pace> GameSession<D, P> {
    pub fn new(config: &GameConfig, display: D, pacer: P) -> Result<Self> {
        config.validate()?;
        let snake = Snake::new(config.board, config.initial_speed);
        let food = Food::new(&snake, config.board, config.max_food_attempts)?;
        Ok(Self::with_parts(snake, food, display, pacer))
    }

    pub fn with_parts(snake: Snake, food: Food, display: D, pacer: P) -> Self {
        GameSession { snake, food, display, pacer, state: SessionState::Starting, paused: false }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Runs screens until the player exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.state = match self.state {
                SessionState::Starting => self.starting()?,
                SessionState::Playing => self.play()?,
                SessionState::GameOver { won } => self.game_over(won)?,
                SessionState::Exit => {
                    info!("exiting");
                    return Ok(());
                }
            };
        }
    }

    fn starting(&mut self) -> Result<SessionState> {
        let Menu { start, exit } = self.display.show_start_screen()?;

        loop {
            match self.display.wait_event()? {
                InputEvent::Confirm => return Ok(SessionState::Playing),
                InputEvent::MouseClick(x, y) if start.contains(x, y) => return Ok(SessionState::Playing),
                InputEvent::MouseClick(x, y) if exit.contains(x, y) => return Ok(SessionState::Exit),
                InputEvent::Cancel | InputEvent::Quit => return Ok(SessionState::Exit),
                _ => {}
            }
        }
    }

    fn play(&mut self) -> Result<SessionState> {
        info!("round started at speed {}", self.snake.speed());
        self.paused = false;
        self.display.prepare_board(&frame(&self.snake, &self.food))?;

        loop {
            match self.tick()? {
                TickResult::Running | TickResult::Paused => self.pacer.pace(self.snake.speed()),
                TickResult::Crashed => return Ok(SessionState::GameOver { won: false }),
                TickResult::Won => return Ok(SessionState::GameOver { won: true }),
                TickResult::Quit => return Ok(SessionState::Exit),
            }
        }
    }

    /// One step of play: input, move, collide, eat, render.
    pub fn tick(&mut self) -> Result<TickResult> {
        for event in self.display.poll_events()? {
            match event {
                InputEvent::Quit => return Ok(TickResult::Quit),
                InputEvent::Cancel => {
                    self.paused = !self.paused;
                    self.display.show_paused(self.paused)?;
                }
                InputEvent::Direction(dir) if !self.paused => self.steer(dir),
                _ => {}
            }
        }

        if self.paused {
            return Ok(TickResult::Paused);
        }

        self.snake.move_step();
        if self.snake.collision_check() {
            return Ok(TickResult::Crashed);
        }

        let eaten = self.food.eaten_check(&mut self.snake);
        self.display.render(&frame(&self.snake, &self.food))?;

        Ok(match eaten {
            EatResult::BoardFull => TickResult::Won,
            EatResult::Eaten | EatResult::Missed => TickResult::Running,
        })
    }

    fn steer(&mut self, direction: Direction) {
        if allows_turn(self.snake.heading(), direction) {
            self.snake.turn(direction);
        } else {
            debug!("ignored reversal to {:?}", direction);
        }
    }

    fn game_over(&mut self, won: bool) -> Result<SessionState> {
        info!("game over, score {}{}", self.snake.score(), if won { " (board filled)" } else { "" });
        self.display.show_game_over(&frame(&self.snake, &self.food), won)?;

        loop {
            match self.display.wait_event()? {
                InputEvent::Confirm => {
                    self.restart()?;
                    return Ok(SessionState::Playing);
                }
                InputEvent::Cancel | InputEvent::Quit => return Ok(SessionState::Exit),
                _ => {}
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        info!("restarting");
        self.snake.reset();
        self.food.reset(&self.snake)?;
        Ok(())
    }
}

fn frame<'a>(snake: &'a Snake, food: &Food) -> Frame<'a> {
    Frame {
        body: snake.body(),
        heading: snake.heading(),
        food: food.position(),
        score: snake.score(),
        speed: snake.speed(),
    }
}
