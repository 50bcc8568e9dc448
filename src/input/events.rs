//! Generic input event types for cross-backend compatibility.

use crate::draw::Coordinate;

/// Generic key representation.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Space bar
    Space,
    /// Tab key
    Tab,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used when matching against configured keybinding strings.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Tab => Some("Tab".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (the drawing button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Whether a button or key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// One event delivered by the platform event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The platform asked the session to end (window closed, signal received).
    Quit,
    Key {
        key: Key,
        state: ButtonState,
    },
    PointerButton {
        button: MouseButton,
        position: Coordinate,
        state: ButtonState,
    },
}

/// Answers "where is the pointer right now" for the trail animator.
pub trait PointerSource {
    fn pointer_position(&self) -> Coordinate;
}

impl PointerSource for Coordinate {
    fn pointer_position(&self) -> Coordinate {
        *self
    }
}
