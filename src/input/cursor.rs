//! Named cursor icons and the collaborator that shows them.

use crate::error::{InvariantViolation, ResourceError};
use std::collections::BTreeMap;

/// Cursor icon names the session may request, mapped to the cursor theme
/// icon the backend should show for each (e.g. `pencil` -> `cell`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorRegistry {
    icons: BTreeMap<String, String>,
}

impl CursorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, theme_icon: impl Into<String>) {
        self.icons.insert(name.into(), theme_icon.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// Looks up the theme icon for `name`.
    ///
    /// # Errors
    /// [`InvariantViolation::UnregisteredCursor`] if `name` was never registered.
    pub fn resolve(&self, name: &str) -> Result<&str, InvariantViolation> {
        self.icons
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| InvariantViolation::UnregisteredCursor(name.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CursorRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, icon) in iter {
            registry.register(name, icon);
        }
        registry
    }
}

/// Collaborator that changes the visible pointer icon.
pub trait CursorPresenter {
    fn set_cursor_icon(&mut self, theme_icon: &str) -> Result<(), ResourceError>;
}
