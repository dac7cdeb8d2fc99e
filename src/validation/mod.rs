//! Validation
//!
//! Heuristic checks over stylesheet text. Every check takes the full text and
//! returns positioned diagnostics; none of them keep state between calls.

pub mod engine;
pub mod structure;
pub mod stylesheet;
pub mod xpath;

pub use engine::{validate_document, DiagnosticSink, DiagnosticsAggregator};
pub use structure::check_structure;
pub use stylesheet::check_xslt_syntax;
pub use xpath::{check_xpath_expressions, check_xpath_syntax};

pub use crate::core::diagnostics::{Diagnostic, Severity, SeverityFilter, ValidationResult};
