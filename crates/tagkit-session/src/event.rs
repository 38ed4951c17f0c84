#![forbid(unsafe_code)]

//! Key events delivered by the host.
//!
//! Only arrow keys and `T` mean anything to a session; everything else is
//! passed through as [`KeyCode::Char`] and ignored.

use bitflags::bitflags;
use tagkit_markup::Arrow;

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// The arrow this key maps to, if any.
    #[must_use]
    pub const fn arrow(&self) -> Option<Arrow> {
        match self.code {
            KeyCode::Up => Some(Arrow::Up),
            KeyCode::Down => Some(Arrow::Down),
            KeyCode::Left => Some(Arrow::Left),
            KeyCode::Right => Some(Arrow::Right),
            KeyCode::Char(_) => None,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    /// A character key, as typed (case preserved).
    Char(char),
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_queries() {
        let event = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::ALT | Modifiers::SHIFT);
        assert!(event.shift());
        assert!(!KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::ALT).shift());
    }

    #[test]
    fn arrows_map_and_chars_do_not() {
        assert_eq!(KeyEvent::new(KeyCode::Left).arrow(), Some(Arrow::Left));
        assert_eq!(KeyEvent::new(KeyCode::Char('t')).arrow(), None);
        assert!(KeyEvent::from(KeyCode::Char('T')).is_char('T'));
    }
}
