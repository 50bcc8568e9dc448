//! Stroke finalization strategies and the selector that cycles them.

use crate::error::InvariantViolation;
use crate::stroke::StrokeLedger;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to a stroke's segments once the button is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Collapse the stroke into one segment from press point to release point.
    Straight,
    /// Keep every synthesized segment; the stroke follows the pointer path.
    Wavy,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Straight => "straight",
            StrategyKind::Wavy => "wavy",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "straight" | "straight-lines" => Ok(StrategyKind::Straight),
            "wavy" | "wavy-lines" => Ok(StrategyKind::Wavy),
            other => Err(format!(
                "Unknown strategy '{other}' (expected 'straight' or 'wavy')"
            )),
        }
    }
}

/// A registered strategy: its finalize behavior plus an optional cursor hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    kind: StrategyKind,
    cursor_hint: Option<String>,
}

impl Strategy {
    pub fn new(kind: StrategyKind, cursor_hint: Option<String>) -> Self {
        Self { kind, cursor_hint }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Cursor registry name to show while this strategy is active.
    pub fn cursor_hint(&self) -> Option<&str> {
        self.cursor_hint.as_deref()
    }

    /// Runs this strategy's finalize step on the segment just moved into the
    /// history at `terminal`.
    pub fn finalize(
        &self,
        ledger: &mut StrokeLedger,
        terminal: usize,
    ) -> Result<(), InvariantViolation> {
        match self.kind {
            StrategyKind::Straight => ledger.compact_stroke(terminal),
            StrategyKind::Wavy => Ok(()),
        }
    }
}

/// Fixed, ordered set of strategies with exactly one active.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    strategies: Vec<Strategy>,
    active: usize,
}

impl StrategySelector {
    /// Creates a selector with the first strategy active.
    ///
    /// # Errors
    /// [`InvariantViolation::NoStrategies`] if `strategies` is empty.
    pub fn new(strategies: Vec<Strategy>) -> Result<Self, InvariantViolation> {
        if strategies.is_empty() {
            return Err(InvariantViolation::NoStrategies);
        }
        Ok(Self {
            strategies,
            active: 0,
        })
    }

    /// Makes the first strategy of `kind` active. Returns `false` if none is registered.
    pub fn select(&mut self, kind: StrategyKind) -> bool {
        match self.strategies.iter().position(|s| s.kind == kind) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> &Strategy {
        &self.strategies[self.active]
    }

    /// Advances to the next strategy, wrapping around, and returns it.
    pub fn cycle(&mut self) -> &Strategy {
        self.active = (self.active + 1) % self.strategies.len();
        &self.strategies[self.active]
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Strategy> {
        self.strategies.iter()
    }
}
