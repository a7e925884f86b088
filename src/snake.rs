use std::collections::VecDeque;

use log::debug;

use crate::grid::{Board, Cell, Direction, Heading};

const SPEED_UP_EVERY: u32 = 5;

#[derive(Clone, Debug)]
pub struct Snake {
    board: Board,
    head: Cell,
    heading: Heading,
    body: VecDeque<Cell>,
    length: u32,
    speed: u32,
    initial_speed: u32,
}

impl Snake {
    pub fn new(board: Board, initial_speed: u32) -> Self {
        Snake {
            board,
            head: board.center(),
            heading: Heading::Stop,
            body: VecDeque::new(),
            length: 1,
            speed: initial_speed,
            initial_speed,
        }
    }

    /// Oldest segment first; the last entry is the current head once moved.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    /// True for the head and every body segment. Before the first move the
    /// body is empty but the head still holds its cell.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn score(&self) -> u32 {
        self.length - 1
    }

    /// Per-tick displacement along each axis, in board units.
    pub fn velocity(&self) -> (i32, i32) {
        let (dx, dy) = self.heading.unit();
        (dx * self.board.cell_size, dy * self.board.cell_size)
    }

    /// Sets the heading unconditionally. Reversal filtering is up to the caller.
    pub fn turn(&mut self, direction: Direction) {
        self.heading = Heading::Moving(direction);
    }

    pub fn move_step(&mut self) {
        let (dx, dy) = self.velocity();
        self.head = Cell::new(self.head.x + dx, self.head.y + dy);
        self.body.push_back(self.head);

        if self.body.len() > self.length as usize {
            self.body.pop_front();
        }
    }

    /// Must run once per tick, after `move_step`. Leaving the board also
    /// stops the snake.
    pub fn collision_check(&mut self) -> bool {
        if !self.board.contains(self.head) {
            self.heading = Heading::Stop;
            return true;
        }

        let older = self.body.len().saturating_sub(1);
        self.body.iter().take(older).any(|seg| *seg == self.head)
    }

    pub fn grow(&mut self) {
        self.length += 1;
        if self.length > 1 && self.length % SPEED_UP_EVERY == 1 {
            self.speed += 1;
            debug!("snake reached length {}, speed now {}", self.length, self.speed);
        }
    }

    pub fn reset(&mut self) {
        *self = Snake::new(self.board, self.initial_speed);
    }

    #[cfg(test)]
    pub(crate) fn set_head(&mut self, head: Cell) {
        self.head = head;
    }
}
