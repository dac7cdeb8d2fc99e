//! XML Formatting
//!
//! Two best-effort formatters over raw text. Neither fails on malformed input.

pub mod compact;
pub mod printer;

use serde::Deserialize;

pub use compact::break_tags;
pub use printer::{normalize, pretty_print, INDENT};

/// Formatting style applied by `format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// Re-indent by tag depth
    #[default]
    Indent,
    /// One tag per line, no indentation
    Break,
}

/// Format text with the given style
pub fn format(xml: &str, style: FormatStyle) -> String {
    match style {
        FormatStyle::Indent => pretty_print(xml),
        FormatStyle::Break => break_tags(xml),
    }
}
