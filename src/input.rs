/// Keyboard state shared between the input collaborator and the frame loop.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Esc,
}

impl Key {
    pub const SPACE: Key = Key::Char(' ');
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// One-shot actions, produced only on a fresh press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Fire,
    Restart,
}

impl Action {
    pub fn for_key(key: Key) -> Option<Action> {
        match key {
            Key::Char(' ') => Some(Action::Fire),
            Key::Char('r') | Key::Char('R') => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Pressed/released flag per key.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    keys: HashMap<Key, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as down. Returns `true` only when it was previously up,
    /// so a key held down (or auto-repeated) yields a single edge.
    pub fn press(&mut self, key: Key) -> bool {
        !self.keys.insert(key, true).unwrap_or(false)
    }

    pub fn release(&mut self, key: Key) {
        self.keys.insert(key, false);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Keys currently held, in no particular order.
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().filter(|(_, &down)| down).map(|(&k, _)| k)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Apply one event and report the edge-triggered action it produced.
    pub fn apply(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::KeyDown(key) => {
                if self.press(key) {
                    Action::for_key(key)
                } else {
                    None
                }
            }
            InputEvent::KeyUp(key) => {
                self.release(key);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_reports_edge_once() {
        let mut keys = KeyState::new();
        assert!(keys.press(Key::SPACE));
        assert!(!keys.press(Key::SPACE));
        keys.release(Key::SPACE);
        assert!(keys.press(Key::SPACE));
    }

    #[test]
    fn held_lists_only_pressed_keys() {
        let mut keys = KeyState::new();
        keys.press(Key::Char('w'));
        keys.press(Key::Char('a'));
        keys.release(Key::Char('a'));
        let held: Vec<Key> = keys.held().collect();
        assert_eq!(held, vec![Key::Char('w')]);
    }
}
