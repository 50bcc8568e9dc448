//! Fixed-cadence tick that turns a held button into a growing trail.
//!
//! While a stroke is open, every due tick closes the current segment at the
//! sampled pointer position and opens the next one from there, so the stroke is
//! visible before the button is released. The animator only decides *when* a
//! tick happens; the session performs the ledger mutation.

use super::strategy::StrategyKind;
use crate::draw::Coordinate;
use std::time::{Duration, Instant};

/// Reference cadence: one synthetic segment every 10 ms (~100 per second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Added to computed waits so the wake-up lands past the tick threshold.
const TICK_SLACK: Duration = Duration::from_micros(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    /// No stroke is open.
    Idle,
    /// A stroke is open and ticks synthesize segments.
    Animating,
}

/// Outcome of polling the animator at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// The interval has not elapsed yet.
    NotDue,
    /// The interval elapsed, but no stroke is being drawn.
    Idle,
    /// Sample the pointer and extend the trail.
    Sample,
}

#[derive(Debug, Clone)]
pub struct TrailAnimator {
    interval: Duration,
    last_tick: Instant,
    phase: AnimatorPhase,
    synthesize_straight: bool,
    /// Samples taken while synthesis was skipped, oldest first.
    deferred: Vec<Coordinate>,
}

impl TrailAnimator {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            phase: AnimatorPhase::Idle,
            synthesize_straight: true,
            deferred: Vec::new(),
        }
    }

    /// When `false`, ticks skip synthesis while the straight strategy is
    /// active. Compaction would discard those segments anyway. The skipped
    /// samples are still recorded (see [`Self::defer_sample`]) in case the
    /// stroke is switched to a strategy that keeps them.
    pub fn with_straight_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_straight = enabled;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn begin_stroke(&mut self) {
        self.phase = AnimatorPhase::Animating;
        self.deferred.clear();
    }

    pub fn end_stroke(&mut self) {
        self.phase = AnimatorPhase::Idle;
        self.deferred.clear();
    }

    /// Records a sample whose segment was not synthesized.
    pub fn defer_sample(&mut self, position: Coordinate) {
        self.deferred.push(position);
    }

    /// Hands over the deferred samples in the order they were taken.
    pub fn take_deferred(&mut self) -> Vec<Coordinate> {
        std::mem::take(&mut self.deferred)
    }

    /// Whether ticks should synthesize segments under `strategy`.
    pub fn synthesizes_for(&self, strategy: StrategyKind) -> bool {
        self.synthesize_straight || strategy != StrategyKind::Straight
    }

    /// Checks whether a tick is due at `now`.
    ///
    /// A tick is due once strictly more than the interval has elapsed since the
    /// previous due tick. A due tick resets the reference instant, so missed
    /// ticks are dropped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> TickDecision {
        if now.saturating_duration_since(self.last_tick) <= self.interval {
            return TickDecision::NotDue;
        }
        self.last_tick = now;
        match self.phase {
            AnimatorPhase::Idle => TickDecision::Idle,
            AnimatorPhase::Animating => TickDecision::Sample,
        }
    }

    /// How long the event loop may wait before the next tick is due.
    ///
    /// `None` while idle: nothing will happen until an input event arrives.
    /// The wait ends just past the interval boundary, since [`Self::poll`]
    /// only fires once strictly more than the interval has elapsed.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            AnimatorPhase::Idle => None,
            AnimatorPhase::Animating => {
                let elapsed = now.saturating_duration_since(self.last_tick);
                if elapsed > self.interval {
                    Some(Duration::ZERO)
                } else {
                    Some(self.interval - elapsed + TICK_SLACK)
                }
            }
        }
    }
}
