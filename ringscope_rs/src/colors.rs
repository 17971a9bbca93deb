//! Terminal color utilities for CLI output.
//!
//! ANSI codes plus semantic helpers so flagged accounts, rings and risk
//! scores look the same across every `ringscope` command.

use std::io::IsTerminal;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

pub const BRIGHT_RED: &str = "\x1b[91m";
pub const BRIGHT_CYAN: &str = "\x1b[96m";

/// When to emit ANSI codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer passed to the formatting functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    // === Domain colors ===

    /// Flagged account ids - RED
    pub fn flagged(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Clean account ids - BLUE
    pub fn clean(&self, s: &str) -> String {
        self.wrap(s, BLUE)
    }

    /// Ring ids - MAGENTA
    pub fn ring(&self, s: &str) -> String {
        self.wrap(s, MAGENTA)
    }

    /// Pattern labels - CYAN
    pub fn pattern(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    /// Scores by magnitude. Scores above 1 are taken as percentages.
    pub fn risk(&self, score: f64) -> String {
        let normalized = if score > 1.0 { score / 100.0 } else { score };
        let code = if normalized >= 0.8 {
            BRIGHT_RED
        } else if normalized >= 0.5 {
            YELLOW
        } else {
            DIM
        };
        self.wrap(&score.to_string(), code)
    }

    /// Truecolor swatch for a `#rrggbb` color; plain text for anything else.
    pub fn swatch(&self, s: &str, hex: &str) -> String {
        match parse_hex(hex) {
            Some((r, g, b)) => self.wrap(s, &format!("\x1b[38;2;{r};{g};{b}m")),
            None => s.to_string(),
        }
    }

    // === General ===

    fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    fn warn(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    fn ok(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    pub fn header(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    pub fn number(&self, n: impl std::fmt::Display) -> String {
        self.wrap(&n.to_string(), BRIGHT_CYAN)
    }

    /// [OK] prefix
    pub fn status_ok(&self, msg: &str) -> String {
        format!("{} {}", self.ok("[OK]"), msg)
    }

    /// [WARN] prefix
    pub fn status_warn(&self, msg: &str) -> String {
        format!("{} {}", self.warn("[WARN]"), msg)
    }

    /// [ERROR] prefix
    pub fn status_error(&self, msg: &str) -> String {
        format!("{} {}", self.error("[ERROR]"), msg)
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
