use crate::Coords;
use crate::game::Game;
use crate::snake::Direction;
use crate::term::{display_width, TermManager};

use crossterm::style::Color;

const TITLE: &str = "Snake Game";
const QUIT_MESSAGE: &str = "Press ESC to quit";
const SNAKE_COLOR: Color = Color::Green;

/// Draws a read-only view of the game.
pub trait Renderer {
    fn render<R>(&mut self, game: &Game<R>) -> anyhow::Result<()>;
}

/// Screen placement of the arena border. Interior cells sit strictly
/// between `left`/`right` and `top`/`bottom`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Frame {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Frame {
    fn centered(screen: (u16, u16), width: i32, height: i32) -> Self {
        let left = (screen.0 as i32 - width) / 2 - 1;
        let top = (screen.1 as i32 - height) / 2 - 1;
        Frame { left, right: left + width + 1, top, bottom: top + height + 1 }
    }

    /// Grid y grows upwards, so row 0 sits just above the bottom border.
    fn cell(&self, (x, y): Coords) -> (i32, i32) {
        (self.left + 1 + x, self.bottom - 1 - y)
    }
}

impl Renderer for TermManager {
    fn render<R>(&mut self, game: &Game<R>) -> anyhow::Result<()> {
        let screen = self.refresh_size()?;
        let arena = game.arena();
        let frame = Frame::centered(screen, arena.width(), arena.height());

        self.clear()?;
        self.print_str((frame.left + 1, frame.top - 1), TITLE)?;
        draw_border(self, frame)?;

        let snake = arena.snake();
        for &pos in snake.body() {
            self.print_colored(frame.cell(pos), ' ', SNAKE_COLOR, SNAKE_COLOR)?;
        }
        self.print_colored(frame.cell(snake.head()), head_char(snake.direction()), Color::Black, SNAKE_COLOR)?;
        let food = arena.food();
        self.print_at(frame.cell(food.pos()), food.glyph())?;

        let status = frame.bottom + 1;
        self.print_str((frame.left + 1, status), &format!("Score: {}", game.score()))?;
        let quit_x = frame.right - display_width(QUIT_MESSAGE) as i32;
        self.print_str((quit_x, status), QUIT_MESSAGE)?;

        if game.is_over() {
            let score = format!("Score: {}", game.score());
            self.show_message(&["Game over!", &score, "", "Press R to play again,", "or ESC to quit."])?;
        }

        self.flush()?;
        Ok(())
    }
}

fn head_char(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn draw_border(term: &mut TermManager, frame: Frame) -> crossterm::Result<()> {
    for x in frame.left + 1..frame.right {
        term.print_at((x, frame.top), '─')?;
        term.print_at((x, frame.bottom), '─')?;
    }
    for y in frame.top + 1..frame.bottom {
        term.print_at((frame.left, y), '│')?;
        term.print_at((frame.right, y), '│')?;
    }

    term.print_at((frame.left, frame.top), '┌')?;
    term.print_at((frame.right, frame.top), '┐')?;
    term.print_at((frame.left, frame.bottom), '└')?;
    term.print_at((frame.right, frame.bottom), '┘')
}
