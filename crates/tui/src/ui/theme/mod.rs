//! Theme styling for the shell.
//!
//! Two palettes exist: Dracula for truecolor terminals and an ANSI 256-color
//! approximation for everything else. Components style through the methods
//! of [`Theme`] and the builders in [`theme_helpers`] instead of naming
//! colors.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod dracula;
pub mod palette;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use dracula::DraculaTheme;
pub use palette::Theme;

/// Forces the palette: `truecolor` or `ansi256`.
pub const COLOR_MODE_ENV: &str = "WERKSTATT_COLOR_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Select a theme from the color capability of the terminal.
pub fn load() -> Box<dyn Theme> {
    let theme: Box<dyn Theme> = match detect_color_capability() {
        ColorCapability::Truecolor => Box::new(DraculaTheme),
        ColorCapability::Ansi256 => Box::new(Ansi256Theme),
    };
    debug!(theme = theme.name(), "selected palette");
    theme
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_override_wins() {
        temp_env::with_vars([(COLOR_MODE_ENV, Some("ansi256")), ("COLORTERM", Some("truecolor"))], || {
            assert_eq!(detect_color_capability(), ColorCapability::Ansi256);
        });
        temp_env::with_vars([(COLOR_MODE_ENV, Some("24bit")), ("COLORTERM", None)], || {
            assert_eq!(detect_color_capability(), ColorCapability::Truecolor);
        });
    }

    #[test]
    fn load_follows_capability() {
        temp_env::with_var(COLOR_MODE_ENV, Some("ansi256"), || assert_eq!(load().name(), "ansi256"));
        temp_env::with_var(COLOR_MODE_ENV, Some("truecolor"), || assert_eq!(load().name(), "dracula"));
    }

    #[test]
    fn colorterm_selects_truecolor() {
        temp_env::with_vars(
            [(COLOR_MODE_ENV, None), ("COLORTERM", Some("truecolor")), ("TERM", Some("xterm"))],
            || assert_eq!(detect_color_capability(), ColorCapability::Truecolor),
        );
        temp_env::with_vars(
            [(COLOR_MODE_ENV, Some("bogus")), ("COLORTERM", None), ("TERM", Some("xterm-256color"))],
            || assert_eq!(detect_color_capability(), ColorCapability::Ansi256),
        );
    }
}
