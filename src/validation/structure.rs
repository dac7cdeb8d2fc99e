//! Tag-balance check.
//!
//! Walks element tags in document order with a stack of open names. This is a
//! heuristic: attribute values containing `>` or tags inside comments can
//! confuse it, and it never claims a document is well-formed.

use crate::core::diagnostics::{Diagnostic, Severity};
use crate::core::position::{LineIndex, Position};
use crate::parser::lexer::scan_tags;

/// Report unexpected, mismatched and unclosed tags as errors
pub fn check_structure(content: &str) -> Vec<Diagnostic> {
    let index = LineIndex::new(content);
    let mut diagnostics = Vec::new();
    let mut stack: Vec<&str> = Vec::new();

    for tag in scan_tags(content) {
        if tag.is_closing() {
            match stack.pop() {
                None => diagnostics.push(Diagnostic::spanning(
                    Severity::Error,
                    format!("Unexpected closing tag {}", tag.name),
                    &index,
                    tag.start,
                    tag.end,
                )),
                Some(expected) if expected != tag.name => {
                    diagnostics.push(Diagnostic::spanning(
                        Severity::Error,
                        format!("Mismatched tags: expected {}, found {}", expected, tag.name),
                        &index,
                        tag.start,
                        tag.end,
                    ))
                }
                Some(_) => {}
            }
        } else if !tag.is_self_closing() {
            stack.push(tag.name);
        }
    }

    let last_line = index.line_count();
    while let Some(unclosed) = stack.pop() {
        diagnostics.push(Diagnostic::error(
            format!("Unclosed tag {}", unclosed),
            Position {
                line: last_line,
                column: 1,
            },
            index.end_of_line(last_line),
        ));
    }

    diagnostics
}
