use crate::{TermInt, Coords};
use crate::display::{Display, Frame, InputEvent, Menu};
use crate::grid::{Board, Cell, Direction, Heading, Rect};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind, poll, read,
};

const SNAKE_BODY_CHAR: char = '█';
const DEAD_SNAKE_CHAR: char = 'X';
const FOOD_CHARS: [char; 2] = ['(', ')'];

// Board cells are drawn two characters wide so they look square.
const CELL_CHARS: TermInt = 2;
const PANEL_WIDTH: TermInt = 16;

const START_LINE: usize = 5;
const EXIT_LINE: usize = 6;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    board: Board,
    origin: Coords,
}

#[derive(Copy, Clone)]
struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(board: Board) -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let (need_w, need_h) = layout_size(&board);

        if width < need_w || height < need_h {
            bail!("terminal is {}x{}, the board needs at least {}x{}", width, height, need_w, need_h);
        }

        let origin = ((width - need_w) / 2, (height - need_h) / 2);
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None, board, origin })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture).context("entering alt screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking).context("showing cursor")?;
        execute!(self.stdout, DisableMouseCapture, LeaveAlternateScreen).context("leaving alt screen")?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Top-left terminal position of the board border.
    fn board_origin(&self) -> Coords {
        (self.origin.0 + PANEL_WIDTH, self.origin.1)
    }

    fn board_center(&self) -> Coords {
        let (bx, by) = self.board_origin();
        let w = self.board.columns() as TermInt * CELL_CHARS + 2;
        let h = self.board.rows() as TermInt + 2;
        (bx + w / 2, by + h / 2)
    }

    fn to_term(&self, cell: Cell) -> Option<Coords> {
        if !self.board.contains(cell) {
            return None;
        }

        let col = ((cell.x - self.board.left) / self.board.cell_size) as TermInt;
        let row = ((cell.y - self.board.top) / self.board.cell_size) as TermInt;
        let (bx, by) = self.board_origin();
        Some((bx + 1 + col * CELL_CHARS, by + 1 + row))
    }

    fn draw_cell(&mut self, cell: Cell, chars: [char; 2]) -> Result<()> {
        if let Some((x, y)) = self.to_term(cell) {
            self.print_at((x, y), chars[0])?;
            self.print_at((x + 1, y), chars[1])?;
        }
        Ok(())
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (x0, y0) = self.board_origin();
        let width = self.board.columns() as TermInt * CELL_CHARS + 2;
        let height = self.board.rows() as TermInt + 2;

        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.print_at((x, y0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn draw_panel(&mut self, score: u32, speed: u32) -> Result<()> {
        let (x, y) = (self.origin.0 + 1, self.origin.1 + 1);
        for (i, line) in panel_lines(score, speed).iter().enumerate() {
            self.print_text((x, y + i as TermInt), line)?;
        }
        Ok(())
    }

    /// Diffs the board interior against the screen buffer and redraws only
    /// the characters that changed.
    fn draw_board(&mut self, frame: &Frame, body_char: Option<char>) -> Result<()> {
        let cols = self.board.columns() as usize;
        let rows = self.board.rows() as usize;
        let row_chars = cols * CELL_CHARS as usize;
        let mut wanted = vec![' '; row_chars * rows];

        let mut put = |board: &Board, cell: Cell, chars: [char; 2]| {
            if board.contains(cell) {
                let col = ((cell.x - board.left) / board.cell_size) as usize;
                let row = ((cell.y - board.top) / board.cell_size) as usize;
                let i = row * row_chars + col * CELL_CHARS as usize;
                wanted[i] = chars[0];
                wanted[i + 1] = chars[1];
            }
        };

        put(&self.board, frame.food, FOOD_CHARS);
        let last = frame.body.len().saturating_sub(1);
        for (i, seg) in frame.body.iter().enumerate() {
            let ch = match body_char {
                Some(ch) => ch,
                None if i == last => head_char(frame.heading),
                None => SNAKE_BODY_CHAR,
            };
            put(&self.board, *seg, [ch, ch]);
        }

        let (bx, by) = self.board_origin();
        for row in 0..rows {
            for col in 0..row_chars {
                let pos = (bx + 1 + col as TermInt, by + 1 + row as TermInt);
                let ch = wanted[row * row_chars + col];
                if self.screen_char(pos) != ch {
                    self.print_at(pos, ch)?;
                }
            }
        }

        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<Message> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = self.board_center();
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        let msg = Message::new(msg_width, msg_height, top_left);
        self.current_msg = Some(msg);
        self.flush()?;
        Ok(msg)
    }

    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                let ch = self.screen_char(pos);
                self.print_at_no_save(pos, ch)?;
            }
        }

        self.flush()
    }

    fn print_text(&mut self, pos: Coords, text: &str) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch)?;
        }
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.print_at_no_save(pos, ch)?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Messages go through here so the buffer keeps what lies underneath
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("queueing output")?;
        Ok(())
    }

    fn screen_char(&self, pos: Coords) -> char {
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize]
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }
}

impl Display for TermManager {
    fn show_start_screen(&mut self) -> Result<Menu> {
        self.clear()?;
        let msg = self.show_message(&[
            "S N A K E",
            "",
            "Arrow keys or WASD to move",
            "Esc to pause",
            "",
            "[ START ]",
            "[ EXIT ]",
            "",
            "Enter to start, Esc to quit",
        ])?;

        let line_rect = |line: usize| {
            let (x, y) = msg.top_left();
            Rect::new(x as i32, (y as usize + line + 1) as i32, msg.width() as i32 - 1, 0)
        };
        Ok(Menu { start: line_rect(START_LINE), exit: line_rect(EXIT_LINE) })
    }

    fn prepare_board(&mut self, frame: &Frame) -> Result<()> {
        self.clear()?;
        self.draw_borders()?;
        self.render(frame)
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.draw_board(frame, None)?;
        self.draw_panel(frame.score, frame.speed)?;
        self.flush()
    }

    fn show_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            self.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
            Ok(())
        } else {
            self.hide_message()
        }
    }

    fn show_game_over(&mut self, frame: &Frame, won: bool) -> Result<()> {
        if !won {
            for seg in frame.body.iter() {
                self.draw_cell(*seg, [DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR])?;
            }
        }
        self.draw_panel(frame.score, frame.speed)?;

        let title = if won {"YOU WON"} else {"GAME OVER"};
        self.show_message(&[
            title,
            &*format!("Score: {}", frame.score),
            "",
            "Press Enter to play again,",
            "or Esc to quit.",
        ])?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("polling input")? {
            if let Some(ev) = translate(read().context("reading input")?) {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn wait_event(&mut self) -> Result<InputEvent> {
        loop {
            if let Some(ev) = translate(read().context("reading input")?) {
                return Ok(ev);
            }
        }
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

/// Terminal size needed for the score panel plus the bordered board.
fn layout_size(board: &Board) -> Coords {
    let w = PANEL_WIDTH + board.columns() as TermInt * CELL_CHARS + 2;
    let h = board.rows() as TermInt + 2;
    (w, h)
}

/// Score panel text, padded so a shorter value overwrites a longer one.
fn panel_lines(score: u32, speed: u32) -> [String; 4] {
    [
        "SNAKE".to_string(),
        String::new(),
        format!("{:<14}", format!("SCORE: {}", score)),
        format!("{:<14}", format!("SPEED: {}", speed)),
    ]
}

fn head_char(heading: Heading) -> char {
    match heading {
        Heading::Moving(Direction::Up) => '^',
        Heading::Moving(Direction::Down) => 'v',
        Heading::Moving(Direction::Left) => '<',
        Heading::Moving(Direction::Right) => '>',
        Heading::Stop => 'o',
    }
}

fn translate(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) if is_ctrl_c(&key) => Some(InputEvent::Quit),
        Event::Key(KeyEvent { code, modifiers: _ }) => match code {
            KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Direction(Direction::Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Direction(Direction::Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Direction(Direction::Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Direction(Direction::Right)),
            KeyCode::Enter => Some(InputEvent::Confirm),
            KeyCode::Esc => Some(InputEvent::Cancel),
            _ => None,
        },
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
            Some(InputEvent::MouseClick(column as i32, row as i32))
        }
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
