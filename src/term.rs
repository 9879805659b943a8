use std::io::{stdout, Stdout, Write};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use unicode_width::UnicodeWidthChar;

pub type TermInt = u16;
pub type TermCoords = (TermInt, TermInt);

/// Thin wrapper over crossterm. Everything is queued and only reaches the
/// terminal on `flush`.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Re-reads the terminal size, which may change between frames.
    pub fn refresh_size(&mut self) -> crossterm::Result<TermCoords> {
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        Ok((width, height))
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
    }

    /// Cells outside the screen are dropped.
    pub fn print_at(&mut self, pos: (i32, i32), ch: char) -> crossterm::Result<()> {
        match self.to_screen(pos) {
            Some((x, y)) => queue!(self.stdout, cursor::MoveTo(x, y), Print(ch)),
            None => Ok(()),
        }
    }

    pub fn print_colored(&mut self, pos: (i32, i32), ch: char, fg: Color, bg: Color) -> crossterm::Result<()> {
        match self.to_screen(pos) {
            Some((x, y)) => queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(ch),
                ResetColor
            ),
            None => Ok(()),
        }
    }

    /// Prints left to right, advancing by each glyph's display width so
    /// wide characters don't overlap their neighbours.
    pub fn print_str(&mut self, pos: (i32, i32), text: &str) -> crossterm::Result<()> {
        let (mut x, y) = pos;
        for ch in text.chars() {
            self.print_at((x, y), ch)?;
            x += ch.width().unwrap_or(0) as i32;
        }
        Ok(())
    }

    /// Draws a centred box holding the given lines.
    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        let msg_height = lines.len() as i32 + 2;
        let msg_width = lines.iter().map(|line| display_width(line)).max().unwrap_or(0) as i32 + 4;
        let center = (self.width as i32 / 2, self.height as i32 / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        for y_diff in 0..msg_height {
            for x_diff in 0..msg_width {
                self.print_at((top_left.0 + x_diff, top_left.1 + y_diff), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let x = top_left.0 + (msg_width - display_width(line) as i32) / 2;
            self.print_str((x, top_left.1 + 1 + i as i32), line)?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn to_screen(&self, (x, y): (i32, i32)) -> Option<TermCoords> {
        let in_bounds = x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32;
        if in_bounds {
            Some((x as TermInt, y as TermInt))
        } else {
            None
        }
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}
