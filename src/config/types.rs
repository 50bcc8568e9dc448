//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::StrategyKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Drawing-related settings.
///
/// Controls how the canvas and the finalized strokes look.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke color - either a named color (black, white, red, green, blue, yellow)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,

    /// Color the surface is cleared to before every redraw ("transparent" allowed)
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            pen_color: default_pen_color(),
            background_color: default_background_color(),
            line_width: default_line_width(),
        }
    }
}

/// Trail animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnimationConfig {
    /// Milliseconds between synthetic segments while a button is held
    /// (valid range: 1 - 1000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Synthesize intermediate segments for straight strokes too.
    /// They are collapsed on release, so `false` only saves work; the final
    /// drawing is identical either way.
    #[serde(default = "default_synthesize_straight")]
    pub synthesize_straight: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            synthesize_straight: default_synthesize_straight(),
        }
    }
}

/// Line drawing strategy selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategiesConfig {
    /// Cycle order of the available strategies
    #[serde(default = "default_order")]
    pub order: Vec<StrategyKind>,

    /// Strategy active at startup (must appear in `order`)
    #[serde(default = "default_strategy")]
    pub default: StrategyKind,

    /// Cursor icon name (from `[cursors]`) shown while drawing straight lines
    #[serde(default = "default_straight_cursor")]
    pub straight_cursor: String,

    /// Cursor icon name (from `[cursors]`) shown while drawing wavy lines
    #[serde(default = "default_wavy_cursor")]
    pub wavy_cursor: String,
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            default: default_strategy(),
            straight_cursor: default_straight_cursor(),
            wavy_cursor: default_wavy_cursor(),
        }
    }
}

impl StrategiesConfig {
    /// Cursor icon name configured for `kind`.
    pub fn cursor_for(&self, kind: StrategyKind) -> &str {
        match kind {
            StrategyKind::Straight => &self.straight_cursor,
            StrategyKind::Wavy => &self.wavy_cursor,
        }
    }
}

/// Named cursor icons mapped to cursor theme names.
///
/// ```toml
/// [cursors]
/// crosshair = "crosshair"
/// pencil = "cell"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CursorsConfig(pub BTreeMap<String, String>);

impl Default for CursorsConfig {
    fn default() -> Self {
        Self(
            [("crosshair", "crosshair"), ("pencil", "cell")]
                .into_iter()
                .map(|(name, icon)| (name.to_string(), icon.to_string()))
                .collect(),
        )
    }
}

/// Performance tuning options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Number of buffers for buffering (valid range: 2 - 4)
    /// - 2 = double buffering (lower memory, potential tearing)
    /// - 3 = triple buffering (balanced, recommended)
    /// - 4 = quad buffering (highest memory, smoothest)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Enable vsync frame synchronization to prevent tearing
    /// Set to false for lower latency at the cost of potential screen tearing
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_line_width() -> f64 {
    1.0
}

fn default_tick_interval_ms() -> u64 {
    10
}

fn default_synthesize_straight() -> bool {
    true
}

pub(super) fn default_order() -> Vec<StrategyKind> {
    vec![StrategyKind::Straight, StrategyKind::Wavy]
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Straight
}

fn default_straight_cursor() -> String {
    "crosshair".to_string()
}

fn default_wavy_cursor() -> String {
    "pencil".to_string()
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}
