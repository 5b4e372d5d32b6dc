/**
 * Terminal Session Module
 *
 * Owns the raw-mode terminal for the lifetime of the game and runs the
 * keyboard reader thread. Drawing goes through the `FrameSink` trait so the
 * game session can be tested without a terminal.
 */
use std::io::{self, Stdout, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::Sender;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use drive_physics::CancelToken;
use log::{error, info, warn};

use crate::keyboard::{translate, InputEvent};

/// How long the reader waits for an event before rechecking cancellation
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Anything that can show a frame of text lines
pub trait FrameSink {
    fn draw(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Raw mode and alternate screen, restored on drop
pub struct TerminalSession {
    out: Stdout,
    release_events: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }

        let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && execute!(out, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)).is_ok();
        if release_events {
            info!("Terminal reports key releases");
        } else {
            info!("Terminal lacks key release events, using hold window");
        }
        Ok(Self { out, release_events })
    }

    /// True when key releases arrive as events
    pub fn release_events(&self) -> bool {
        self.release_events
    }
}

impl FrameSink for TerminalSession {
    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line), Clear(ClearType::UntilNewLine))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.release_events {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Read terminal key events on a dedicated thread until cancelled or the
/// frame loop stops listening
pub fn spawn_input_reader(sender: Sender<InputEvent>, cancel: CancelToken) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name("input".into()).spawn(move || {
        while !cancel.is_cancelled() {
            let ready = match event::poll(INPUT_POLL) {
                Ok(ready) => ready,
                Err(e) => {
                    error!("Polling terminal input failed: {}", e);
                    cancel.cancel();
                    break;
                }
            };
            if !ready {
                continue;
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(input) = translate(&key) {
                        if sender.send(input).is_err() {
                            break;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Reading terminal input failed: {}", e);
                    cancel.cancel();
                    break;
                }
            }
        }
        info!("Input reader stopped");
    })
}
