use Direction::*;

/// A grid-aligned position on the board, in board units (multiples of the
/// cell size).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Playable region of the screen. `left`/`top` are inclusive, `right()` and
/// `bottom()` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn capacity(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.left && cell.x < self.right() && cell.y >= self.top && cell.y < self.bottom()
    }

    /// The cell at grid column `col`, row `row`.
    pub fn cell_at(&self, col: i32, row: i32) -> Cell {
        Cell::new(self.left + col * self.cell_size, self.top + row * self.cell_size)
    }

    pub fn center(&self) -> Cell {
        self.cell_at(self.columns() / 2, self.rows() / 2)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }
}

/// Screen-space rectangle used for clickable buttons. Edges are inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && x <= self.x + self.width && self.y <= y && y <= self.y + self.height
    }
}

/// A turn command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Current motion of the snake.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Stop,
    Moving(Direction),
}

impl Heading {
    /// Unit step along each axis, each component in {-1, 0, 1}.
    pub fn unit(&self) -> (i32, i32) {
        match self {
            Heading::Stop => (0, 0),
            Heading::Moving(Up) => (0, -1),
            Heading::Moving(Down) => (0, 1),
            Heading::Moving(Left) => (-1, 0),
            Heading::Moving(Right) => (1, 0),
        }
    }

    /// The one turn that would reverse the snake onto itself, if any.
    pub fn reverse_turn(&self) -> Option<Direction> {
        match self {
            Heading::Stop => None,
            Heading::Moving(Up) => Some(Down),
            Heading::Moving(Down) => Some(Up),
            Heading::Moving(Left) => Some(Right),
            Heading::Moving(Right) => Some(Left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board { left: 200, top: 0, width: 600, height: 400, cell_size: 20 }
    }

    #[test]
    fn center_is_grid_aligned() {
        let b = board();
        let c = b.center();
        assert_eq!(c, Cell::new(500, 200));
        assert_eq!((c.x - b.left) % b.cell_size, 0);
        assert_eq!((c.y - b.top) % b.cell_size, 0);
    }

    #[test]
    fn cells_cover_the_board() {
        let b = board();
        assert_eq!(b.cells().count(), b.capacity());
        assert!(b.cells().all(|c| b.contains(c)));
        assert_eq!(b.cells().last(), Some(Cell::new(780, 380)));
    }

    #[test]
    fn contains_excludes_right_and_bottom_edges() {
        let b = board();
        assert!(b.contains(Cell::new(200, 0)));
        assert!(!b.contains(Cell::new(800, 0)));
        assert!(!b.contains(Cell::new(200, 400)));
        assert!(!b.contains(Cell::new(180, 20)));
        assert!(!b.contains(Cell::new(200, -20)));
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let r = Rect::new(10, 5, 8, 1);
        assert!(r.contains(10, 5));
        assert!(r.contains(18, 6));
        assert!(!r.contains(9, 5));
        assert!(!r.contains(19, 6));
        assert!(!r.contains(12, 7));
    }

    #[test]
    fn reverse_turns() {
        assert_eq!(Heading::Stop.reverse_turn(), None);
        assert_eq!(Heading::Moving(Right).reverse_turn(), Some(Left));
        assert_eq!(Heading::Moving(Left).reverse_turn(), Some(Right));
        assert_eq!(Heading::Moving(Up).reverse_turn(), Some(Down));
        assert_eq!(Heading::Moving(Down).reverse_turn(), Some(Up));
    }
}
