//! Validation Engine
//!
//! Runs every check over the full text and decides which diagnostics reach
//! the consumer. Each pass starts from scratch; nothing is carried over.

use crate::core::diagnostics::{Diagnostic, SeverityFilter, ValidationResult};
use crate::validation::structure::check_structure;
use crate::validation::stylesheet::check_xslt_syntax;
use crate::validation::xpath::check_xpath_expressions;

/// Receives the complete diagnostic set for a document, replacing any set
/// published before
pub trait DiagnosticSink {
    fn publish(&mut self, diagnostics: Vec<Diagnostic>);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn publish(&mut self, diagnostics: Vec<Diagnostic>) {
        *self = diagnostics;
    }
}

/// Validate an entire document: structure, then XSLT syntax, then XPath
pub fn validate_document(content: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.extend(check_structure(content));
    result.extend(check_xslt_syntax(content));
    result.extend(check_xpath_expressions(content));
    result
}

/// Validates on demand and forwards the surfaced subset to a sink
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticsAggregator {
    filter: SeverityFilter,
}

impl DiagnosticsAggregator {
    pub fn new(filter: SeverityFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> SeverityFilter {
        self.filter
    }

    /// Diagnostics that would be published for `content`
    pub fn collect(&self, content: &str) -> Vec<Diagnostic> {
        let result = validate_document(content);
        let total = result.diagnostics.len();
        let surfaced = result.surfaced(self.filter);
        log::debug!(
            "Validation pass: {} diagnostics, {} surfaced",
            total,
            surfaced.len()
        );
        surfaced
    }

    /// Validate `content` and publish the surfaced set to `sink`
    pub fn refresh(&self, content: &str, sink: &mut impl DiagnosticSink) {
        sink.publish(self.collect(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::Severity;

    const NO_NAMESPACE: &str = "<xsl:stylesheet version=\"3.0\">\n  <xsl:template mode=\"x\">\n    <xsl:value-of select=\"a[1\"/>\n  </xsl:template>\n</xsl:stylesheet>";

    #[test]
    fn test_validate_document_order() {
        let result = validate_document("<xsl:stylesheet><a></b>\n<xsl:value-of select=\"x)\"/>");
        let messages: Vec<&str> = result
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();

        let mismatch = messages
            .iter()
            .position(|m| m.starts_with("Mismatched tags"))
            .unwrap();
        let namespace = messages
            .iter()
            .position(|m| *m == "Missing XSL namespace declaration")
            .unwrap();
        let xpath = messages
            .iter()
            .position(|m| m.starts_with("Invalid XPath"))
            .unwrap();
        assert!(mismatch < namespace && namespace < xpath);
    }

    #[test]
    fn test_default_aggregator_surfaces_only_warnings() {
        let aggregator = DiagnosticsAggregator::default();
        let surfaced = aggregator.collect(NO_NAMESPACE);

        assert_eq!(surfaced.len(), 1);
        assert_eq!(surfaced[0].severity, Severity::Warning);
        assert_eq!(surfaced[0].message, "Missing XSL namespace declaration");

        // Errors still exist in the full result
        assert_eq!(validate_document(NO_NAMESPACE).errors().count(), 2);
    }

    #[test]
    fn test_all_filter_surfaces_errors() {
        let aggregator = DiagnosticsAggregator::new(SeverityFilter::All);
        assert_eq!(aggregator.collect(NO_NAMESPACE).len(), 3);
    }

    #[test]
    fn test_refresh_replaces_previous_set() {
        let aggregator = DiagnosticsAggregator::default();
        let mut sink: Vec<Diagnostic> = Vec::new();

        aggregator.refresh(NO_NAMESPACE, &mut sink);
        assert_eq!(sink.len(), 1);

        let fixed = NO_NAMESPACE.replace(
            "version=\"3.0\"",
            "xmlns:xsl=\"http://www.w3.org/1999/XSL/Transform\" version=\"3.0\"",
        );
        aggregator.refresh(&fixed, &mut sink);
        assert!(sink.is_empty());
    }
}
