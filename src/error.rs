//! Error types for the stroke engine.
//!
//! Two classes exist and must never be confused:
//! - [`InvariantViolation`]: a logic defect in the engine (or a broken startup
//!   configuration). The session cannot continue and is torn down.
//! - [`ResourceError`]: a failure reported by an external collaborator (surface,
//!   cursor theme, connection). These are logged and survived where possible.

use crate::draw::Coordinate;
use thiserror::Error;

/// Structural invariants of the ledger, strategies and cursor registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no open segment to finalize")]
    EmptyOpenStack,

    #[error("cannot open a segment at {at}: a segment starting at {open} is still open")]
    SegmentAlreadyOpen { at: Coordinate, open: Coordinate },

    #[error("segment {index} does not belong to a stroke with a BEGIN segment")]
    MissingBegin { index: usize },

    #[error("history index {index} out of range (history holds {len} segments)")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("cursor icon '{0}' is not registered")]
    UnregisteredCursor(String),

    #[error("at least one drawing strategy must be registered")]
    NoStrategies,
}

/// Failures reported by the windowing/rendering collaborators.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("render failed: {0}")]
    Render(String),

    #[error("cursor update failed: {0}")]
    Cursor(String),

    #[error("teardown step '{step}' failed: {reason}")]
    Teardown { step: &'static str, reason: String },
}

/// Any error surfaced by a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl SessionError {
    /// Invariant violations end the session; resource failures do not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Invariant(_))
    }
}
