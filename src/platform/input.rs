//! Held-key table
//!
//! Key callbacks write one slot each; the frame loop reads the whole table
//! once per step. Only the current held state matters, so there is no queue.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::TickInput;

/// Physical keys the game listens to, by `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
}

/// Logical control a key drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Key {
    pub const COUNT: usize = 4;

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "Space" => Some(Key::Space),
            _ => None,
        }
    }

    pub fn control(self) -> Control {
        match self {
            Key::ArrowLeft => Control::MoveLeft,
            Key::ArrowRight => Control::MoveRight,
            Key::ArrowUp | Key::Space => Control::Jump,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Pressed state per key. Shared by reference between listeners and the loop.
#[derive(Debug, Default)]
pub struct KeyTable {
    pressed: [AtomicBool; Key::COUNT],
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: Key, down: bool) {
        self.pressed[key.slot()].store(down, Ordering::Relaxed);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed[key.slot()].load(Ordering::Relaxed)
    }

    /// Record a key event by its code. Returns false for keys the game ignores.
    pub fn handle_code(&self, code: &str, down: bool) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.set(key, down);
                true
            }
            None => false,
        }
    }

    /// Forget every held key (focus lost, keyups will never arrive)
    pub fn release_all(&self) {
        for slot in &self.pressed {
            slot.store(false, Ordering::Relaxed);
        }
    }

    /// Whether any key bound to `control` is held
    pub fn control_down(&self, control: Control) -> bool {
        [Key::ArrowLeft, Key::ArrowRight, Key::ArrowUp, Key::Space]
            .into_iter()
            .any(|key| key.control() == control && self.is_down(key))
    }

    /// Sample the table into this step's input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.control_down(Control::MoveLeft),
            right: self.control_down(Control::MoveRight),
            jump: self.control_down(Control::Jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("KeyA"), None);
        assert_eq!(Key::ArrowUp.control(), Control::Jump);
    }

    #[test]
    fn test_snapshot_is_level_triggered() {
        let keys = KeyTable::new();
        assert_eq!(keys.snapshot(), TickInput::default());

        assert!(keys.handle_code("ArrowRight", true));
        assert!(keys.snapshot().right);
        // Still held next frame
        assert!(keys.snapshot().right);

        keys.handle_code("ArrowRight", false);
        assert!(!keys.snapshot().right);
        assert!(!keys.handle_code("Enter", true));
    }

    #[test]
    fn test_either_jump_key() {
        let keys = KeyTable::new();
        keys.set(Key::Space, true);
        keys.set(Key::ArrowUp, true);
        keys.set(Key::ArrowUp, false);
        // Space is still down
        assert!(keys.snapshot().jump);
        keys.set(Key::Space, false);
        assert!(!keys.snapshot().jump);
    }

    #[test]
    fn test_release_all() {
        let keys = KeyTable::new();
        keys.set(Key::ArrowLeft, true);
        keys.set(Key::Space, true);
        keys.release_all();
        assert_eq!(keys.snapshot(), TickInput::default());
    }
}
