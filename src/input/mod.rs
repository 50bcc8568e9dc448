//! Input handling and the stroke session state machine.
//!
//! This module translates backend keyboard and pointer events into ledger
//! operations. It owns the strategy selector, the trail animator that extends
//! a held stroke on a fixed cadence, and the cursor registry.

pub mod animator;
pub mod cursor;
pub mod events;
pub mod modifiers;
pub mod state;
pub mod strategy;

// Re-export commonly used types at module level
pub use animator::{DEFAULT_TICK_INTERVAL, TrailAnimator};
pub use cursor::{CursorPresenter, CursorRegistry};
pub use events::{ButtonState, InputEvent, Key, MouseButton, PointerSource};
pub use modifiers::Modifiers;
pub use state::{SessionSettings, StrokeSession};
pub use strategy::{Strategy, StrategyKind, StrategySelector};
