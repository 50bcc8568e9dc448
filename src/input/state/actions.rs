use crate::config::Action;
use crate::error::InvariantViolation;
use crate::input::events::Key;
use log::info;

use super::StrokeSession;

impl StrokeSession {
    /// Processes a key press event.
    ///
    /// Modifier keys only update the modifier state. Any other key is looked
    /// up in the keybinding map and its action runs.
    pub fn on_key_press(&mut self, key: Key) -> Result<(), InvariantViolation> {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return Ok(());
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return Ok(());
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return Ok(());
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return Ok(());
        };

        match self.find_action(&key_str) {
            Some(action) => self.handle_action(action),
            None => Ok(()),
        }
    }

    /// Processes a key release event (only modifier state changes).
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    pub(super) fn handle_action(&mut self, action: Action) -> Result<(), InvariantViolation> {
        match action {
            Action::Exit => {
                self.should_exit = true;
                Ok(())
            }
            Action::CycleStrategy => self.cycle_strategy(),
        }
    }

    /// Switches to the next strategy and queues its cursor.
    ///
    /// Safe mid-stroke: the strategy active at release time decides how the
    /// stroke is finalized.
    pub fn cycle_strategy(&mut self) -> Result<(), InvariantViolation> {
        let from = self.strategies.active().name();
        let to = self.strategies.cycle().name();
        info!("Changing line drawing strategy from {from} to {to}");
        self.refresh_cursor()
    }
}
