//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips these escapes when the
//! stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style, Styled};
use std::fmt::Display;

/// Check mark used in completion lines
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Headings and important words
    fn emphasis(&self) -> Styled<&Self>;
    /// Names, numbers, URLs
    fn accent(&self) -> Styled<&Self>;
    /// Successful outcomes
    fn success(&self) -> Styled<&Self>;
    /// Recoverable problems
    fn warn(&self) -> Styled<&Self>;
    /// Fatal problems
    fn error(&self) -> Styled<&Self>;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> Styled<&Self> {
        self.style(Style::new().bold())
    }

    fn accent(&self) -> Styled<&Self> {
        self.style(Style::new().cyan())
    }

    fn success(&self) -> Styled<&Self> {
        self.style(Style::new().green())
    }

    fn warn(&self) -> Styled<&Self> {
        self.style(Style::new().yellow())
    }

    fn error(&self) -> Styled<&Self> {
        self.style(Style::new().red().bold())
    }
}

/// Spinner style for network waits
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
