//! Stroke engine behind the trailpen overlay.
//!
//! The library holds everything that does not talk to the compositor: the
//! segment ledger, the straight/wavy finalize strategies, the trail animator,
//! the session controller that ties them to input events, configuration, and
//! the Cairo canvas the history is rendered into.

pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod stroke;
pub mod util;

pub use config::Config;
pub use error::{InvariantViolation, ResourceError, SessionError};
pub use input::{SessionSettings, StrokeSession};
