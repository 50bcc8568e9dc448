//! Session controller: routes input into the ledger, strategies and animator.

use crate::config::{Action, KeyBinding, KeybindingsConfig};
use crate::draw::{Canvas, Coordinate, Segment, SegmentKind, render_history};
use crate::error::{InvariantViolation, ResourceError};
use crate::input::animator::{DEFAULT_TICK_INTERVAL, TickDecision, TrailAnimator};
use crate::input::cursor::{CursorPresenter, CursorRegistry};
use crate::input::events::{ButtonState, InputEvent, PointerSource};
use crate::input::modifiers::Modifiers;
use crate::input::strategy::{Strategy, StrategyKind, StrategySelector};
use crate::stroke::StrokeLedger;
use log::{debug, warn};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Everything a [`StrokeSession`] needs at startup.
///
/// Built from the user configuration by [`crate::Config::session_settings`];
/// [`Default`] matches the stock configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Registered strategies in cycle order.
    pub strategies: Vec<Strategy>,
    /// Strategy active when the session starts.
    pub initial: StrategyKind,
    pub tick_interval: Duration,
    pub synthesize_straight: bool,
    pub cursors: CursorRegistry,
    pub action_map: HashMap<KeyBinding, Action>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            strategies: vec![
                Strategy::new(StrategyKind::Straight, Some("crosshair".to_string())),
                Strategy::new(StrategyKind::Wavy, Some("pencil".to_string())),
            ],
            initial: StrategyKind::Straight,
            tick_interval: DEFAULT_TICK_INTERVAL,
            synthesize_straight: true,
            cursors: [("crosshair", "crosshair"), ("pencil", "cell")]
                .into_iter()
                .collect(),
            action_map: KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default(),
        }
    }
}

/// Main drawing session state.
///
/// Owns the segment ledger and decides what each pointer, keyboard and tick
/// event does to it. The backend reads `needs_redraw` and `should_exit` after
/// dispatching events, the same way it would poll any input state.
pub struct StrokeSession {
    ledger: StrokeLedger,
    pub(super) strategies: StrategySelector,
    pub(super) animator: TrailAnimator,
    cursors: CursorRegistry,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether the user (or the platform) asked to end the session
    pub should_exit: bool,
    /// Whether the history changed since the last redraw
    pub needs_redraw: bool,
    /// Theme cursor icon waiting to be shown
    pending_cursor: Option<String>,
}

impl StrokeSession {
    /// Creates a session with the configured strategies and cursors.
    ///
    /// The initial strategy's cursor is queued right away so the backend shows
    /// it as soon as the pointer enters the surface.
    ///
    /// # Errors
    /// - [`InvariantViolation::NoStrategies`] if no strategy is registered
    /// - [`InvariantViolation::UnregisteredCursor`] if a strategy's cursor hint
    ///   is missing from the cursor registry
    pub fn new(settings: SessionSettings, now: Instant) -> Result<Self, InvariantViolation> {
        let mut strategies = StrategySelector::new(settings.strategies)?;
        for strategy in strategies.iter() {
            if let Some(hint) = strategy.cursor_hint() {
                settings.cursors.resolve(hint)?;
            }
        }

        if !strategies.select(settings.initial) {
            warn!(
                "Strategy '{}' is not registered; starting with '{}'",
                settings.initial,
                strategies.active().name()
            );
        }

        let animator = TrailAnimator::new(settings.tick_interval, now)
            .with_straight_synthesis(settings.synthesize_straight);

        let mut session = Self {
            ledger: StrokeLedger::new(),
            strategies,
            animator,
            cursors: settings.cursors,
            action_map: settings.action_map,
            modifiers: Modifiers::new(),
            should_exit: false,
            needs_redraw: true,
            pending_cursor: None,
        };
        session.refresh_cursor()?;
        Ok(session)
    }

    /// Applies one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), InvariantViolation> {
        match event {
            InputEvent::Quit => {
                self.should_exit = true;
                Ok(())
            }
            InputEvent::Key {
                key,
                state: ButtonState::Pressed,
            } => self.on_key_press(key),
            InputEvent::Key {
                key,
                state: ButtonState::Released,
            } => {
                self.on_key_release(key);
                Ok(())
            }
            InputEvent::PointerButton {
                button,
                position,
                state: ButtonState::Pressed,
            } => self.on_mouse_press(button, position),
            InputEvent::PointerButton {
                button,
                position,
                state: ButtonState::Released,
            } => self.on_mouse_release(button, position),
        }
    }

    /// Runs one time-gated animator evaluation.
    ///
    /// When a tick is due and a stroke is open, the open segment is closed at
    /// the sampled pointer position and a new `Inter` segment is opened there.
    /// If synthesis is skipped for the active strategy the sample is deferred
    /// instead, and replayed as soon as a strategy that keeps it is active.
    /// Returns whether the ledger changed.
    pub fn on_tick<P: PointerSource + ?Sized>(
        &mut self,
        now: Instant,
        pointer: &P,
    ) -> Result<bool, InvariantViolation> {
        match self.animator.poll(now) {
            TickDecision::NotDue | TickDecision::Idle => Ok(false),
            TickDecision::Sample => {
                if self.ledger.last_open_segment().is_none() {
                    return Ok(false);
                }

                let position = pointer.pointer_position();
                if !self
                    .animator
                    .synthesizes_for(self.strategies.active().kind())
                {
                    self.animator.defer_sample(position);
                    return Ok(false);
                }

                self.replay_deferred_samples()?;
                self.extend_trail(position)?;
                Ok(true)
            }
        }
    }

    /// Closes the open segment at `position` and opens the next one there.
    fn extend_trail(&mut self, position: Coordinate) -> Result<(), InvariantViolation> {
        self.ledger.close_and_finalize(position)?;
        self.needs_redraw = true;
        self.ledger.open_segment(position, SegmentKind::Inter)
    }

    /// Synthesizes the segments for samples taken while synthesis was skipped.
    pub(super) fn replay_deferred_samples(&mut self) -> Result<(), InvariantViolation> {
        let deferred = self.animator.take_deferred();
        if !deferred.is_empty() {
            debug!("Replaying {} deferred trail samples", deferred.len());
        }
        for position in deferred {
            self.extend_trail(position)?;
        }
        Ok(())
    }

    /// How long the event loop may block before the next tick needs to run.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.animator.time_until_next_tick(now)
    }

    /// Clears the canvas, draws the history in order and presents it.
    pub fn redraw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), ResourceError> {
        render_history(canvas, self.ledger.history())?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Queues the active strategy's cursor icon, if it has one.
    ///
    /// Called again when the pointer re-enters the surface, since compositors
    /// reset the cursor on enter.
    pub fn refresh_cursor(&mut self) -> Result<(), InvariantViolation> {
        if let Some(hint) = self.strategies.active().cursor_hint() {
            let icon = self.cursors.resolve(hint)?;
            self.pending_cursor = Some(icon.to_string());
        }
        Ok(())
    }

    /// Hands the queued cursor icon to `presenter`.
    ///
    /// Returns `Ok(true)` if an icon was applied. On failure the icon stays
    /// queued for the next attempt.
    pub fn apply_pending_cursor<P: CursorPresenter + ?Sized>(
        &mut self,
        presenter: &mut P,
    ) -> Result<bool, ResourceError> {
        let Some(icon) = self.pending_cursor.as_deref() else {
            return Ok(false);
        };
        presenter.set_cursor_icon(icon)?;
        self.pending_cursor = None;
        Ok(true)
    }

    /// Theme cursor icon waiting to be shown, if any.
    pub fn pending_cursor(&self) -> Option<&str> {
        self.pending_cursor.as_deref()
    }

    /// Drops an unfinished stroke. Used on shutdown.
    pub fn discard_open_stroke(&mut self) {
        if let Some(open) = self.ledger.discard_open() {
            debug!("Discarding unfinished stroke segment starting at {}", open.begin);
        }
        self.animator.end_stroke();
    }

    pub fn ledger(&self) -> &StrokeLedger {
        &self.ledger
    }

    pub(super) fn ledger_mut(&mut self) -> &mut StrokeLedger {
        &mut self.ledger
    }

    /// Finalized segments in render order.
    pub fn history(&self) -> &[Segment] {
        self.ledger.history()
    }

    pub fn active_strategy(&self) -> &Strategy {
        self.strategies.active()
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Look up an action for the given key string using current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        for (binding, action) in &self.action_map {
            if binding.matches(
                key_str,
                self.modifiers.ctrl,
                self.modifiers.shift,
                self.modifiers.alt,
            ) {
                return Some(*action);
            }
        }
        None
    }
}
