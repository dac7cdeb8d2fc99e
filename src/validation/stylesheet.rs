//! XSLT-specific checks: root element, namespace declaration and template
//! attributes. Plain text searches, no attribute parsing.

use crate::core::diagnostics::{Diagnostic, Severity};
use crate::core::position::{LineIndex, Position};
use crate::parser::patterns;

pub const XSL_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Widest span used for the namespace warning
const NAMESPACE_SPAN: usize = 50;

pub const MISSING_ROOT: &str =
    "XSLT document should start with <xsl:stylesheet> or <xsl:transform>";
pub const MISSING_NAMESPACE: &str = "Missing XSL namespace declaration";
pub const TEMPLATE_WITHOUT_MATCH_OR_NAME: &str =
    "xsl:template must have either match or name attribute";

/// Run the root, namespace and template checks
pub fn check_xslt_syntax(content: &str) -> Vec<Diagnostic> {
    let index = LineIndex::new(content);
    let mut diagnostics = Vec::new();

    if let Some(d) = check_root_element(content, &index) {
        diagnostics.push(d);
    }
    if let Some(d) = check_namespace(content, &index) {
        diagnostics.push(d);
    }
    diagnostics.extend(check_templates(content, &index));

    diagnostics
}

fn line_start() -> Position {
    Position { line: 1, column: 1 }
}

fn check_root_element(content: &str, index: &LineIndex) -> Option<Diagnostic> {
    let re = patterns::XSLT_ROOT.as_ref()?;
    if content.trim().is_empty() || re.is_match(content) {
        return None;
    }

    // Cover the first tag when it ends on line 1, otherwise the whole line
    let first_line_end = index.end_of_line(1);
    let end = content
        .find('>')
        .map(|offset| index.position(offset + 1))
        .filter(|pos| pos.line == 1)
        .unwrap_or(first_line_end);

    Some(Diagnostic::warning(MISSING_ROOT, line_start(), end))
}

fn check_namespace(content: &str, index: &LineIndex) -> Option<Diagnostic> {
    let double_quoted = format!("xmlns:xsl=\"{}\"", XSL_NAMESPACE);
    let single_quoted = format!("xmlns:xsl='{}'", XSL_NAMESPACE);
    if content.contains(&double_quoted) || content.contains(&single_quoted) {
        return None;
    }

    let end = Position {
        line: 1,
        column: NAMESPACE_SPAN.min(index.line_len(1) + 1),
    };
    Some(Diagnostic::warning(MISSING_NAMESPACE, line_start(), end))
}

fn check_templates(content: &str, index: &LineIndex) -> Vec<Diagnostic> {
    let Some(re) = patterns::TEMPLATE.as_ref() else {
        return Vec::new();
    };

    re.captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if attrs.contains("match=") || attrs.contains("name=") {
                return None;
            }
            Some(Diagnostic::spanning(
                Severity::Error,
                TEMPLATE_WITHOUT_MATCH_OR_NAME,
                index,
                whole.start(),
                whole.end(),
            ))
        })
        .collect()
}
