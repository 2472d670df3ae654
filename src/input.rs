//! Keyboard handling: turns crossterm key events into a held-key snapshot.
//!
//! Terminals with the keyboard-enhancement protocol report releases, so a key
//! is held from its press until its release. Classic terminals only send
//! presses (OS key repeat shows up as more presses); there a key stays "held"
//! for a short window after its last event and the repeat rate refreshes it
//! before that runs out. The first release event seen switches a tracker into
//! release mode for good.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::FPS;
use crate::entities::InputState;

/// Frames a key stays live after its last press/repeat event at `FPS`.
pub const HOLD_WINDOW: u64 = 4;

/// One-shot actions triggered on key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enter: advance the current screen.
    Confirm,
    /// Esc: back to the menu.
    Back,
    Quit,
}

/// How the tracker decides a key is still down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldMode {
    /// Held from press until the matching release event.
    Release,
    /// Held for this many frames after the last press or repeat.
    Window(u64),
}

#[derive(Debug)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    mode: HoldMode,
}

impl Default for KeyTracker {
    fn default() -> Self {
        KeyTracker {
            key_frame: HashMap::new(),
            mode: HoldMode::Window(HOLD_WINDOW),
        }
    }
}

impl KeyTracker {
    /// Press-only tracking sized for the default frame rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Press-only tracking whose window lasts as long at `fps` as
    /// `HOLD_WINDOW` frames do at `FPS`.
    pub fn for_fps(fps: u32) -> Self {
        let fps = u64::from(fps);
        let base = u64::from(FPS);
        let frames = (HOLD_WINDOW * fps + base / 2) / base;
        KeyTracker {
            mode: HoldMode::Window(frames.max(1)),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> HoldMode {
        self.mode
    }

    /// Switch to release tracking, for terminals known to report releases.
    pub fn use_release_events(&mut self) {
        self.mode = HoldMode::Release;
    }

    /// Record a key event seen during `frame`.
    pub fn handle(&mut self, event: KeyEvent, frame: u64) -> Option<Command> {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') => Some(Command::Quit),
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Command::Quit)
                    }
                    KeyCode::Enter => Some(Command::Confirm),
                    KeyCode::Esc => Some(Command::Back),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.mode = HoldMode::Release;
                self.key_frame.remove(&code);
                None
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        let Some(&last) = self.key_frame.get(&normalize(code)) else {
            return false;
        };
        match self.mode {
            HoldMode::Release => true,
            HoldMode::Window(window) => frame.saturating_sub(last) <= window,
        }
    }

    /// Movement and fire keys live at `frame`. Arrows and WASD are equivalent.
    pub fn snapshot(&self, frame: u64) -> InputState {
        let held = |a: KeyCode, b: char| self.is_held(a, frame) || self.is_held(KeyCode::Char(b), frame);
        InputState {
            left: held(KeyCode::Left, 'a'),
            right: held(KeyCode::Right, 'd'),
            up: held(KeyCode::Up, 'w'),
            down: held(KeyCode::Down, 's'),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
    }
}

/// Letters are tracked case-insensitively.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
