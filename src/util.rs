//! Small helpers shared by the config and rendering code.

use crate::draw::color::*;
use std::time::Duration;

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "black", "white", "red", "green", "blue", "yellow", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "transparent" | "none" => Some(TRANSPARENT),
        _ => None,
    }
}

/// Approximate synthetic segment rate for a tick interval, for log output.
pub fn ticks_per_second(interval: Duration) -> f64 {
    if interval.is_zero() {
        return 0.0;
    }
    1.0 / interval.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(name_to_color("White"), Some(WHITE));
        assert_eq!(name_to_color(" BLACK "), Some(BLACK));
        assert_eq!(name_to_color("none"), Some(TRANSPARENT));
        assert_eq!(name_to_color("mauve"), None);
    }

    #[test]
    fn reference_cadence_is_one_hundred_hertz() {
        let rate = ticks_per_second(Duration::from_millis(10));
        assert!((rate - 100.0).abs() < f64::EPSILON * 100.0);
        assert_eq!(ticks_per_second(Duration::ZERO), 0.0);
    }
}
