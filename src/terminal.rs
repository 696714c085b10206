// Prompter on a plain terminal, using crossterm for key handling and colors.

use crate::error::Result;
use crate::traits::{Prompter, Tone};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, Stylize},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Stdout, Write};

/// Keeps the terminal in raw mode while alive.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn read_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Interactive prompts on stdout, reading keys from the terminal.
pub struct TerminalPrompter {
    out: Stdout,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        TerminalPrompter::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter { out: io::stdout() }
    }

    fn heading(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message.bold())
    }

    fn draw_options(&mut self, options: &[String], selected: usize) -> io::Result<()> {
        for (i, option) in options.iter().enumerate() {
            queue!(self.out, Clear(ClearType::CurrentLine))?;
            if i == selected {
                queue!(self.out, Print(format!("● {option}").with(Color::Cyan)))?;
            } else {
                queue!(self.out, Print(format!("○ {option}").dim()))?;
            }
            queue!(self.out, Print("\r\n"))?;
        }
        self.out.flush()
    }

    fn draw_input(&mut self, input: &str, placeholder: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print("│ ")
        )?;
        if input.is_empty() {
            queue!(self.out, Print(placeholder.dim()), cursor::MoveToColumn(2))?;
        } else {
            queue!(self.out, Print(input))?;
        }
        self.out.flush()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.heading(message)?;
        let mut selected = 0;
        let rows = options.len() as u16;

        let _raw = RawMode::enable()?;
        queue!(self.out, cursor::Hide)?;
        self.draw_options(options, selected)?;
        let choice = loop {
            let key = read_key()?;
            if is_cancel(&key) {
                break None;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    selected = (selected + options.len() - 1) % options.len();
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    selected = (selected + 1) % options.len();
                }
                KeyCode::Enter => break Some(selected),
                _ => continue,
            }
            queue!(self.out, cursor::MoveUp(rows))?;
            self.draw_options(options, selected)?;
        };
        queue!(self.out, cursor::Show)?;
        self.out.flush()?;
        Ok(choice)
    }

    fn text(&mut self, message: &str, placeholder: &str) -> Result<Option<String>> {
        self.heading(message)?;
        let mut input = String::new();

        let _raw = RawMode::enable()?;
        self.draw_input(&input, placeholder)?;
        let res = loop {
            let key = read_key()?;
            if is_cancel(&key) {
                break None;
            }
            match key.code {
                KeyCode::Enter => break Some(input),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                _ => continue,
            }
            self.draw_input(&input, placeholder)?;
        };
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()?;
        Ok(res)
    }

    fn note(&mut self, tone: Tone, message: &str) -> Result<()> {
        match tone {
            Tone::Info => writeln!(self.out, "{message}")?,
            Tone::Success => writeln!(self.out, "{}", message.green())?,
            Tone::Warning => writeln!(self.out, "{}", message.yellow())?,
        }
        Ok(())
    }

    fn show(&mut self, content: &str) -> Result<()> {
        writeln!(self.out, "{content}")?;
        self.text("Press Enter to continue", "")?;
        Ok(())
    }
}
