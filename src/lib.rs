//! XSLT Language Server
//!
//! Diagnostics, formatting and transformation support for XSLT stylesheets.
//!
//! This library provides:
//! - Heuristic structure, XSLT and XPath validation
//! - An indenting pretty-printer
//! - LSP protocol implementation
//! - A sample library and an external processor bridge

pub mod cli;
pub mod config;
pub mod core;
pub mod format;
pub mod lsp;
pub mod parser;
pub mod samples;
pub mod transform;
pub mod validation;

pub use config::Config;
pub use format::{format, pretty_print, FormatStyle};
pub use samples::{Sample, SampleManager};
pub use transform::{TransformEngine, Workbench};
pub use validation::{validate_document, Diagnostic, DiagnosticsAggregator};
