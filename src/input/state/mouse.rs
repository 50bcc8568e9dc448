use crate::draw::{Coordinate, SegmentKind};
use crate::error::InvariantViolation;
use crate::input::events::MouseButton;
use log::debug;

use super::StrokeSession;

impl StrokeSession {
    /// Processes a mouse button press event.
    ///
    /// A left press opens the stroke's `Begin` segment and starts the trail
    /// animator. Other buttons are ignored.
    ///
    /// # Errors
    /// [`InvariantViolation::SegmentAlreadyOpen`] if a stroke is already in
    /// progress (a second press without a release in between).
    pub fn on_mouse_press(
        &mut self,
        button: MouseButton,
        position: Coordinate,
    ) -> Result<(), InvariantViolation> {
        if button != MouseButton::Left {
            return Ok(());
        }

        self.ledger_mut().open_segment(position, SegmentKind::Begin)?;
        self.animator.begin_stroke();
        debug!("Stroke started at {position}");
        Ok(())
    }

    /// Processes a mouse button release event.
    ///
    /// Closes the open segment at `position`, runs the active strategy's
    /// finalize step and stops the animator. Samples deferred while straight
    /// synthesis was skipped are replayed first when the active strategy keeps
    /// intermediate segments. A release with no stroke in
    /// progress (e.g. the press happened before the surface had focus) is
    /// ignored.
    pub fn on_mouse_release(
        &mut self,
        button: MouseButton,
        position: Coordinate,
    ) -> Result<(), InvariantViolation> {
        if button != MouseButton::Left {
            return Ok(());
        }

        if self.ledger().last_open_segment().is_none() {
            debug!("Ignoring button release at {position}: no stroke in progress");
            return Ok(());
        }

        let strategy = self.strategies.active().clone();
        // Deferred samples only matter if the finishing strategy keeps them.
        if self.animator.synthesizes_for(strategy.kind()) {
            self.replay_deferred_samples()?;
        }
        let terminal = self.ledger_mut().close_and_finalize(position)?;
        strategy.finalize(self.ledger_mut(), terminal)?;
        self.animator.end_stroke();
        self.needs_redraw = true;
        debug!("Stroke finished at {position} ({})", strategy.name());
        Ok(())
    }
}
