//! Terminal key events to logical keys and host commands

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use drive_common::{HeldKeys, LogicalKey};
use phf::phf_map;

/// Host-level actions that never reach the physics input mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    TogglePause,
    Reset,
    Quit,
    Faster,
    Slower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Drive(LogicalKey),
    Command(HostCommand),
}

/// Events sent from the input thread to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(LogicalKey),
    Release(LogicalKey),
    Command(HostCommand),
}

// Perfect-hash map from key names to actions
static KEY_MAP: phf::Map<&'static str, KeyAction> = phf_map! {
    "w"     => KeyAction::Drive(LogicalKey::Forward),
    "up"    => KeyAction::Drive(LogicalKey::Forward),
    "s"     => KeyAction::Drive(LogicalKey::Backward),
    "down"  => KeyAction::Drive(LogicalKey::Backward),
    "a"     => KeyAction::Drive(LogicalKey::TurnLeft),
    "left"  => KeyAction::Drive(LogicalKey::TurnLeft),
    "d"     => KeyAction::Drive(LogicalKey::TurnRight),
    "right" => KeyAction::Drive(LogicalKey::TurnRight),
    "space" => KeyAction::Drive(LogicalKey::Brake),
    "p"     => KeyAction::Command(HostCommand::TogglePause),
    "r"     => KeyAction::Command(HostCommand::Reset),
    "q"     => KeyAction::Command(HostCommand::Quit),
    "esc"   => KeyAction::Command(HostCommand::Quit),
    "+"     => KeyAction::Command(HostCommand::Faster),
    "="     => KeyAction::Command(HostCommand::Faster),
    "-"     => KeyAction::Command(HostCommand::Slower),
};

fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Esc => "esc".to_string(),
        _ => return None,
    };
    Some(name)
}

pub fn lookup(code: KeyCode) -> Option<KeyAction> {
    key_name(code).and_then(|name| KEY_MAP.get(name.as_str()).copied())
}

/// Translate one terminal key event; unmapped keys yield `None`
pub fn translate(event: &KeyEvent) -> Option<InputEvent> {
    // raw mode swallows SIGINT
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(InputEvent::Command(HostCommand::Quit));
    }
    match (lookup(event.code)?, event.kind) {
        (KeyAction::Drive(key), KeyEventKind::Release) => Some(InputEvent::Release(key)),
        (KeyAction::Drive(key), _) => Some(InputEvent::Press(key)),
        (KeyAction::Command(cmd), KeyEventKind::Press) => Some(InputEvent::Command(cmd)),
        (KeyAction::Command(_), _) => None,
    }
}

/// Tracks which logical keys are held.
///
/// With release events a key stays held until released. Without them a key
/// counts as held for `hold_window` after its last press or auto-repeat.
#[derive(Debug, Clone)]
pub struct HeldKeyTracker {
    hold_window: Duration,
    release_events: bool,
    last_seen: [Option<Instant>; LogicalKey::ALL.len()],
}

#[inline]
fn slot(key: LogicalKey) -> usize {
    key.mask().trailing_zeros() as usize
}

impl HeldKeyTracker {
    pub fn new(hold_window: Duration, release_events: bool) -> Self {
        Self {
            hold_window,
            release_events,
            last_seen: [None; LogicalKey::ALL.len()],
        }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Press(key) => self.last_seen[slot(key)] = Some(now),
            InputEvent::Release(key) => self.last_seen[slot(key)] = None,
            InputEvent::Command(_) => {}
        }
    }

    /// Keys held at `now`; expired keys are forgotten
    pub fn held(&mut self, now: Instant) -> HeldKeys {
        let mut keys = HeldKeys::empty();
        for key in LogicalKey::ALL {
            let entry = &mut self.last_seen[slot(key)];
            match *entry {
                Some(at) if self.release_events || now.saturating_duration_since(at) <= self.hold_window => {
                    keys.press(key)
                }
                Some(_) => *entry = None,
                None => {}
            }
        }
        keys
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; LogicalKey::ALL.len()];
    }
}
