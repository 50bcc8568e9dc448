//! Keyboard modifier state tracking.

/// Which modifier keys (Shift, Ctrl, Alt) are currently held.
///
/// Used when matching key presses against configured keybindings such as
/// `"Ctrl+Q"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }
}
