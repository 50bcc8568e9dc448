use anyhow::Result;

use trailpen::input::StrategyKind;

pub mod wayland;

/// Run Wayland backend with full event loop
///
/// # Arguments
/// * `initial_strategy` - Optional strategy to start with (overrides config default)
pub fn run_wayland(initial_strategy: Option<StrategyKind>) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(initial_strategy);
    backend.run()
}
