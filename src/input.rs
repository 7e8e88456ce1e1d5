//! Host-side key tracking.
//!
//! Hosts report raw key down/up events by name; once per frame they collect
//! a `FrameInput`.  Fire is latched on the press edge so holding the key (or
//! auto-repeat) produces one shot, not one per frame.

use std::collections::HashSet;

use crate::entities::FrameInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map a DOM-style key name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " => Some(Key::Fire),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Key::Left => "ArrowLeft",
            Key::Right => "ArrowRight",
            Key::Up => "ArrowUp",
            Key::Down => "ArrowDown",
            Key::Fire => " ",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    fire_latched: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, name: &str) {
        let Some(key) = Key::from_name(name) else {
            return;
        };
        // insert() is false on auto-repeat of a key that is already down
        if self.held.insert(key) && key == Key::Fire {
            self.fire_latched = true;
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot for the next frame. Consumes the pending fire edge.
    pub fn frame_input(&mut self) -> FrameInput {
        FrameInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            fire: std::mem::take(&mut self.fire_latched),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_directions_persist_across_frames() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.key_down("ArrowUp");
        assert!(input.frame_input().left);
        let second = input.frame_input();
        assert!(second.left && second.up);
        assert!(!second.right && !second.down);

        input.key_up("ArrowLeft");
        assert!(!input.frame_input().left);
    }

    #[test]
    fn fire_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down(" ");
        assert!(input.frame_input().fire);
        // still held, plus an auto-repeat event
        input.key_down(" ");
        assert!(!input.frame_input().fire);

        input.key_up(" ");
        input.key_down(" ");
        assert!(input.frame_input().fire);
    }

    #[test]
    fn tap_between_frames_still_fires() {
        let mut input = InputState::new();
        input.key_down(" ");
        input.key_up(" ");
        assert!(input.frame_input().fire);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputState::new();
        input.key_down("Shift");
        input.key_up("F13");
        assert_eq!(input.frame_input(), FrameInput::default());
    }

    #[test]
    fn names_round_trip() {
        for key in [Key::Left, Key::Right, Key::Up, Key::Down, Key::Fire] {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }
}
