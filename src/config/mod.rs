//! Configuration file support for trailpen.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/trailpen/config.toml`. Settings include colors, the
//! trail animation cadence, strategy order and cursors, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    AnimationConfig, CursorsConfig, DrawingConfig, PerformanceConfig, StrategiesConfig,
};

use crate::draw::Palette;
use crate::input::{CursorRegistry, SessionSettings, Strategy, StrategyKind};
use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// pen_color = "black"
/// background_color = "white"
/// line_width = 1.0
///
/// [animation]
/// tick_interval_ms = 10
///
/// [strategies]
/// order = ["straight", "wavy"]
/// default = "straight"
///
/// [keybindings]
/// exit = ["Escape"]
/// cycle_strategy = ["Space"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Colors and stroke width
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Trail animation cadence
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Strategy order, startup strategy and their cursors
    #[serde(default)]
    pub strategies: StrategiesConfig,

    /// Named cursor icons
    #[serde(default)]
    pub cursors: CursorsConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped (or replaced by their default) and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `line_width`: 1.0 - 20.0
    /// - `tick_interval_ms`: 1 - 1000
    /// - `buffer_count`: 2 - 4
    pub fn validate_and_clamp(&mut self) {
        // Line width: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.drawing.line_width) {
            warn!(
                "Invalid line_width {:.1}, clamping to 1.0-20.0 range",
                self.drawing.line_width
            );
            self.drawing.line_width = if self.drawing.line_width.is_nan() {
                1.0
            } else {
                self.drawing.line_width.clamp(1.0, 20.0)
            };
        }

        // Tick interval: 1 - 1000 ms
        if !(1..=1000).contains(&self.animation.tick_interval_ms) {
            warn!(
                "Invalid tick_interval_ms {}, clamping to 1-1000 range",
                self.animation.tick_interval_ms
            );
            self.animation.tick_interval_ms = self.animation.tick_interval_ms.clamp(1, 1000);
        }

        // Buffer count: 2 - 4
        if !(2..=4).contains(&self.performance.buffer_count) {
            warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        // Strategy order: non-empty, no duplicates
        if self.strategies.order.is_empty() {
            warn!("Empty strategy order, falling back to straight, wavy");
            self.strategies.order = types::default_order();
        }
        let mut seen = Vec::with_capacity(self.strategies.order.len());
        self.strategies.order.retain(|kind| {
            if seen.contains(kind) {
                warn!("Strategy '{}' listed twice in order, ignoring duplicate", kind);
                false
            } else {
                seen.push(*kind);
                true
            }
        });

        if !self.strategies.order.contains(&self.strategies.default) {
            let fallback = self.strategies.order[0];
            warn!(
                "Default strategy '{}' is not in the strategy order, using '{}'",
                self.strategies.default, fallback
            );
            self.strategies.default = fallback;
        }

        // Every strategy cursor must name a registered icon
        let missing: Vec<String> = self
            .strategies
            .order
            .iter()
            .map(|kind| self.strategies.cursor_for(*kind))
            .filter(|name| !self.cursors.0.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            warn!(
                "Cursor icon(s) {:?} not defined in [cursors], falling back to default cursors",
                missing
            );
            let defaults = StrategiesConfig::default();
            self.strategies.straight_cursor = defaults.straight_cursor;
            self.strategies.wavy_cursor = defaults.wavy_cursor;
            self.cursors = CursorsConfig::default();
        }
    }

    /// Colors and width used by the Cairo canvas.
    pub fn palette(&self) -> Palette {
        Palette {
            background: self.drawing.background_color.to_color(),
            pen: self.drawing.pen_color.to_color(),
            line_width: self.drawing.line_width,
        }
    }

    /// Builds the stroke session settings, optionally overriding the startup strategy.
    ///
    /// # Errors
    /// Returns an error if a keybinding string is invalid or bound twice.
    pub fn session_settings(&self, initial: Option<StrategyKind>) -> Result<SessionSettings> {
        let action_map = self
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow!(e))
            .context("Invalid keybinding configuration")?;

        let strategies = self
            .strategies
            .order
            .iter()
            .map(|kind| {
                Strategy::new(
                    *kind,
                    Some(self.strategies.cursor_for(*kind).to_string()),
                )
            })
            .collect();

        let cursors: CursorRegistry = self
            .cursors
            .0
            .iter()
            .map(|(name, icon)| (name.as_str(), icon.as_str()))
            .collect();

        Ok(SessionSettings {
            strategies,
            initial: initial.unwrap_or(self.strategies.default),
            tick_interval: Duration::from_millis(self.animation.tick_interval_ms),
            synthesize_straight: self.animation.synthesize_straight,
            cursors,
            action_map,
        })
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/trailpen/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("trailpen");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config = Self::load_from(&config_path)?;
        info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate_and_clamp();
        debug!("Config: {:?}", config);
        Ok(config)
    }

    fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");
