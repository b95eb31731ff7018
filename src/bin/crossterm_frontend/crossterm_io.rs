use chip8_vm::emulator::display::Display;
use chip8_vm::emulator::input::{EmulatorInput, InputEvent};
use chip8_vm::emulator::output::EmulatorOutput;
use chip8_vm::emulator::{Config, Error, Result, Rgba};

use super::key_buffer::KeyBuffer;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

const KEY_HOLD: Duration = Duration::from_millis(250);

fn frontend_error<E: std::fmt::Display>(error: E) -> Error {
    Error::Frontend(error.to_string())
}

fn init_error<E: std::fmt::Display>(error: E) -> Error {
    Error::Initialization(error.to_string())
}

/// CHIP-8 keypad on the left side of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub fn keymap(c: char) -> Option<u8> {
    match c.to_ascii_lowercase() {
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        '4' => Some(0xC),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'r' => Some(0xD),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'f' => Some(0xE),
        'z' => Some(0xA),
        'x' => Some(0x0),
        'c' => Some(0xB),
        'v' => Some(0xF),
        _ => None,
    }
}

/// Translate one terminal key event.
fn translate(key_event: KeyEvent) -> Option<Translated> {
    match key_event.code {
        KeyCode::Esc => Some(Translated::Control(InputEvent::Quit)),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Translated::Control(InputEvent::Quit))
        }
        KeyCode::Char(' ') => Some(Translated::Control(InputEvent::TogglePause)),
        KeyCode::Char(c) => keymap(c).map(Translated::Key),
        _ => None,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Translated {
    Key(u8),
    Control(InputEvent),
}

pub struct CrosstermInput {
    keys: KeyBuffer,
}

impl CrosstermInput {
    pub fn new() -> CrosstermInput {
        CrosstermInput {
            keys: KeyBuffer::new(KEY_HOLD),
        }
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let now = Instant::now();
        let mut events = Vec::new();

        while event::poll(Duration::from_secs(0)).map_err(frontend_error)? {
            let key_event = match event::read().map_err(frontend_error)? {
                Event::Key(key_event) => key_event,
                _ => continue,
            };
            log::debug!("Got key event {:?}", key_event);
            match translate(key_event) {
                Some(Translated::Key(key)) => {
                    if self.keys.push(key, now) {
                        events.push(InputEvent::KeyDown(key));
                    }
                }
                Some(Translated::Control(control)) => events.push(control),
                None => {}
            }
        }

        events.extend(self.keys.expire(now).into_iter().map(InputEvent::KeyUp));
        Ok(events)
    }
}

pub struct CrosstermOutput {
    stdout: Stdout,
    scale: u16,
    foreground: Color,
    background: Color,
    beeping: bool,
}

fn to_color(rgba: Rgba) -> Color {
    Color::Rgb {
        r: rgba.r(),
        g: rgba.g(),
        b: rgba.b(),
    }
}

impl CrosstermOutput {
    /// Take over the terminal and clear it to the background colour.
    pub fn new(config: &Config) -> Result<CrosstermOutput> {
        let mut stdout = stdout();
        terminal::enable_raw_mode().map_err(init_error)?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide).map_err(init_error)?;

        let mut output = CrosstermOutput {
            stdout,
            scale: config.scale_factor.max(1) as u16,
            foreground: to_color(config.foreground),
            background: to_color(config.background),
            beeping: false,
        };
        execute!(
            output.stdout,
            SetBackgroundColor(output.background),
            Clear(ClearType::All)
        )
        .map_err(init_error)?;
        Ok(output)
    }

    fn draw(&mut self, display: &Display) -> crossterm::Result<()> {
        // A pixel is two cells wide so it comes out roughly square
        let width = 2 * self.scale as usize;
        let mut current = None;
        for (y, row) in display.rows().enumerate() {
            for sub_row in 0..self.scale {
                queue!(self.stdout, cursor::MoveTo(0, y as u16 * self.scale + sub_row))?;
                for &lit in row {
                    let color = if lit { self.foreground } else { self.background };
                    if current != Some(color) {
                        queue!(self.stdout, SetBackgroundColor(color))?;
                        current = Some(color);
                    }
                    queue!(self.stdout, Print(format!("{:width$}", "", width = width)))?;
                }
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn render(&mut self, display: &Display) -> Result<()> {
        self.draw(display).map_err(frontend_error)
    }

    /// Ring the terminal bell when the sound timer starts.
    fn sound(&mut self, active: bool) {
        if active && !self.beeping {
            let _ = execute!(self.stdout, Print('\u{7}'));
        }
        self.beeping = active;
    }
}
