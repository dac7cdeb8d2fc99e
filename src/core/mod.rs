//! Core Types
//!
//! Diagnostics, positions and open-document state shared by the validators,
//! the formatter and the LSP layer.

pub mod diagnostics;
pub mod document;
pub mod position;

pub use diagnostics::{Diagnostic, Severity, SeverityFilter, ValidationResult};
pub use document::{DocumentManager, DocumentState};
pub use position::{LineIndex, Position};
