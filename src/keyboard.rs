/// Translation from crossterm key events to game input.
///
/// Terminals that speak the kitty keyboard protocol report presses,
/// repeats and releases, so key state follows the physical keyboard.
/// Classic terminals only report presses (OS key-repeat shows up as more
/// presses); for those a key is released once it has gone unreported for
/// `HOLD_WINDOW`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{InputEvent, Key};

/// Longer than the usual OS repeat delay, so a held key is refreshed by its
/// first auto-repeat before it lapses.
pub const HOLD_WINDOW: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Game(InputEvent),
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}

fn is_quit(key: Key, modifiers: KeyModifiers) -> bool {
    match key {
        Key::Char('q') | Key::Char('Q') | Key::Esc => true,
        Key::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub struct Keyboard {
    reports_release: bool,
    /// Last press per key; only tracked when releases are not reported.
    last_seen: HashMap<Key, Instant>,
}

impl Keyboard {
    pub fn new(reports_release: bool) -> Self {
        Keyboard {
            reports_release,
            last_seen: HashMap::new(),
        }
    }

    /// Translate one terminal event received at `now`.
    pub fn translate(&mut self, ev: Event, now: Instant) -> Option<Control> {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            return None;
        };
        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press => {
                if is_quit(key, modifiers) {
                    return Some(Control::Quit);
                }
                if !self.reports_release {
                    self.last_seen.insert(key, now);
                }
                Some(Control::Game(InputEvent::KeyDown(key)))
            }
            // The key is already down; a repeat never becomes a new press.
            KeyEventKind::Repeat => {
                if let Some(seen) = self.last_seen.get_mut(&key) {
                    *seen = now;
                }
                None
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
                Some(Control::Game(InputEvent::KeyUp(key)))
            }
        }
    }

    /// Releases for keys unreported for longer than `HOLD_WINDOW`.  Always
    /// empty when the terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        if self.reports_release {
            return Vec::new();
        }
        let mut released = Vec::new();
        self.last_seen.retain(|&key, &mut seen| {
            let fresh = now.saturating_duration_since(seen) <= HOLD_WINDOW;
            if !fresh {
                released.push(InputEvent::KeyUp(key));
            }
            fresh
        });
        released
    }
}
