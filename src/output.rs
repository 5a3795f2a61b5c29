//! Console output configuration.
//!
//! Controls whether command summaries use color and emoji, resolving the
//! `--color` CLI flag against the usual environment conventions:
//! `NO_COLOR` (https://no-color.org/), `CLICOLOR=0`, `CLICOLOR_FORCE=1`
//! and `TERM=dumb`.

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag ("always", "never" or "auto") against the
    /// environment. "always" overrides `NO_COLOR`; "auto" detects terminal
    /// support.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(),
        };
        Self { use_color }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// Returns the emoji when colors are enabled, the plain marker otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
