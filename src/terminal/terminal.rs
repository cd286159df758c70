use super::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
use crate::ui::span::Span;
use crate::ui::style::Color;
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, ScrollUp};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Inline terminal surface: draws a block of lines below the shell prompt
/// and redraws it in place.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    anchor_row: u16,
    drawn_lines: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let (_, row) = cursor::position()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            anchor_row: row,
            drawn_lines: 0,
        })
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            match read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    return Ok(TerminalEvent::Key(map_key_event(key)));
                }
                Event::Resize(width, height) => {
                    self.size = TerminalSize { width, height };
                    return Ok(TerminalEvent::Resize(self.size));
                }
                _ => continue,
            }
        }
    }

    /// Redraws `lines` at the anchor row and parks the cursor at `cursor`
    /// (relative to the block).
    pub fn render(&mut self, lines: &[Vec<Span>], cursor: Option<CursorPos>) -> io::Result<()> {
        let needed = lines.len().min(u16::MAX as usize) as u16;
        let bottom = self.anchor_row.saturating_add(needed);
        if bottom > self.size.height {
            let overflow = bottom - self.size.height;
            queue!(self.stdout, ScrollUp(overflow))?;
            self.anchor_row = self.anchor_row.saturating_sub(overflow);
        }

        for row in 0..needed.max(self.drawn_lines) {
            queue!(
                self.stdout,
                cursor::MoveTo(0, self.anchor_row + row),
                Clear(ClearType::CurrentLine)
            )?;
            if let Some(line) = lines.get(row as usize) {
                self.queue_line(line)?;
            }
        }
        self.drawn_lines = needed;

        match cursor {
            Some(pos) => queue!(
                self.stdout,
                cursor::MoveTo(pos.col, self.anchor_row + pos.row),
                cursor::Show
            )?,
            None => queue!(self.stdout, cursor::Hide)?,
        }
        self.stdout.flush()
    }

    /// Moves below the drawn block so the shell continues on a fresh line.
    pub fn finish(&mut self) -> io::Result<()> {
        execute!(
            self.stdout,
            cursor::MoveTo(0, self.anchor_row + self.drawn_lines),
            cursor::Show
        )
    }

    fn queue_line(&mut self, line: &[Span]) -> io::Result<()> {
        for span in line {
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(self.stdout, Print(&span.text))?;
            if !span.style.is_plain() {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Yellow => crossterm::style::Color::Yellow,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Insert => KeyCode::Insert,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}
