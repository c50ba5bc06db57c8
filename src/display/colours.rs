//! Colour output for CLI messages
//!
//! Honours `NO_COLOR` and only colours a terminal stdout unless forced.

use std::io::IsTerminal;

use colored::{ColoredString, Colorize};

/// Decides whether and how to colour CLI output
#[derive(Debug, Clone)]
pub struct ColourManager {
    enabled: bool,
}

impl ColourManager {
    /// Detect from environment: `NO_COLOR` disables, otherwise only on a TTY
    pub fn detect() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self::with_colours(enabled)
    }

    /// Create a ColourManager with explicit colour control
    pub fn with_colours(enabled: bool) -> Self {
        colored::control::set_override(enabled);
        Self { enabled }
    }

    /// Create a ColourManager from the `--no-color` flag
    pub fn from_args(no_color_flag: bool) -> Self {
        if no_color_flag {
            Self::with_colours(false)
        } else {
            Self::detect()
        }
    }

    pub fn colours_enabled(&self) -> bool {
        self.enabled
    }

    pub fn success(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.green()
        } else {
            text.normal()
        }
    }

    pub fn warning(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.yellow()
        } else {
            text.normal()
        }
    }

    pub fn highlight(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.cyan()
        } else {
            text.normal()
        }
    }

    /// A two-cell block painted in `value`, or blanks if it is not a hex colour
    pub fn swatch(&self, value: &str) -> ColoredString {
        match (self.enabled, parse_hex_colour(value)) {
            (true, Some((r, g, b))) => "██".truecolor(r, g, b),
            _ => "  ".normal(),
        }
    }
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional)
pub fn parse_hex_colour(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!(parse_hex_colour("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex_colour("1d2021"), Some((29, 32, 33)));
        assert_eq!(parse_hex_colour("#f0f"), Some((255, 0, 255)));
        assert_eq!(parse_hex_colour("#ff80"), None);
        assert_eq!(parse_hex_colour("#gg0000"), None);
        assert_eq!(parse_hex_colour("rgb:ff/00/00"), None);
        assert_eq!(parse_hex_colour("#é0"), None);
    }

    #[test]
    fn test_colour_formatting_disabled() {
        let manager = ColourManager::with_colours(false);

        assert!(!manager.colours_enabled());
        assert_eq!(manager.success("applied").to_string(), "applied");
        assert_eq!(manager.warning("skipped").to_string(), "skipped");
        assert_eq!(manager.highlight("foot.ini").to_string(), "foot.ini");
        assert_eq!(manager.swatch("#ffffff").to_string(), "  ");
    }

    #[test]
    fn test_from_args_no_color_flag() {
        assert!(!ColourManager::from_args(true).colours_enabled());
    }
}
