//! Diagnostics
//!
//! Positioned messages produced by one validation pass. Positions are only
//! meaningful for the text they were computed from.

use serde::Serialize;

use crate::core::position::{LineIndex, Position};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message for a validation issue.
///
/// Lines and columns are 1-based; columns count characters and `end_column`
/// is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            severity,
            message: message.into(),
            start_line: start.line,
            start_column: start.column,
            end_line: end.line,
            end_column: end.column,
        }
    }

    pub fn error(message: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(Severity::Error, message, start, end)
    }

    pub fn warning(message: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(Severity::Warning, message, start, end)
    }

    /// Build a diagnostic covering the byte range `start..end` of the indexed text
    pub fn spanning(
        severity: Severity,
        message: impl Into<String>,
        index: &LineIndex,
        start: usize,
        end: usize,
    ) -> Self {
        Self::new(severity, message, index.position(start), index.position(end))
    }
}

/// Which severities reach the diagnostics sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    /// Only warnings are surfaced; errors are computed and dropped
    #[default]
    WarningsOnly,
    All,
}

impl SeverityFilter {
    pub fn allows(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::WarningsOnly => severity == Severity::Warning,
            SeverityFilter::All => true,
        }
    }
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// The subset of diagnostics the filter lets through, order preserved
    pub fn surfaced(self, filter: SeverityFilter) -> Vec<Diagnostic> {
        self.diagnostics
            .into_iter()
            .filter(|d| filter.allows(d.severity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.push(Diagnostic::warning("Test warning", at(1, 1), at(1, 2)));
        assert!(result.is_valid()); // Warnings don't make it invalid

        result.push(Diagnostic::error("Test error", at(2, 1), at(2, 2)));
        assert!(!result.is_valid());
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_surfaced_drops_errors_by_default() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::error("e", at(1, 1), at(1, 2)));
        result.push(Diagnostic::warning("w", at(1, 1), at(1, 2)));

        let surfaced = result.clone().surfaced(SeverityFilter::default());
        assert_eq!(surfaced.len(), 1);
        assert_eq!(surfaced[0].message, "w");

        assert_eq!(result.surfaced(SeverityFilter::All).len(), 2);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
