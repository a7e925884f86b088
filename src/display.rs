use std::collections::VecDeque;

use anyhow::Result;

use crate::grid::{Cell, Direction, Heading, Rect};

/// Discrete input the session reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Direction(Direction),
    Confirm,
    Cancel,
    /// Click in the display's own coordinate space.
    MouseClick(i32, i32),
}

/// Everything needed to draw one frame of play.
pub struct Frame<'a> {
    pub body: &'a VecDeque<Cell>,
    pub heading: Heading,
    pub food: Cell,
    pub score: u32,
    pub speed: u32,
}

/// Clickable areas of the start screen, in display coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub start: Rect,
    pub exit: Rect,
}

pub trait Display {
    fn show_start_screen(&mut self) -> Result<Menu>;

    /// Clears whatever the previous round or screen left behind and draws
    /// the opening frame of a round.
    fn prepare_board(&mut self, frame: &Frame) -> Result<()>;

    /// Draws the frame. Must not feed back into game state.
    fn render(&mut self, frame: &Frame) -> Result<()>;

    fn show_paused(&mut self, paused: bool) -> Result<()>;

    fn show_game_over(&mut self, frame: &Frame, won: bool) -> Result<()>;

    /// Drains pending input without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Blocks until the next recognised input.
    fn wait_event(&mut self) -> Result<InputEvent>;
}
