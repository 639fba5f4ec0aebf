//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Info/Value:    cyan    (the answer to a statistic)
//!   - Warning:       yellow  (skipped rows, empty selections)
//!   - Muted:         dimmed  (counts, field labels, missing values)
//!   - Emphasis:      bold    (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply dimmed style to text (for labels and counts).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
