//! XPath sanity checks on `select`, `test` and `match` attribute values.
//!
//! This is a lint, not a grammar. It checks bracket and parenthesis balance
//! outside string literals and flags characters that rarely belong in an
//! expression.

use crate::core::diagnostics::{Diagnostic, Severity};
use crate::core::position::LineIndex;
use crate::parser::patterns;

pub const UNMATCHED_CLOSING_BRACKET: &str = "Unmatched closing bracket";
pub const UNMATCHED_OPENING_BRACKET: &str = "Unmatched opening bracket";
pub const UNMATCHED_CLOSING_PAREN: &str = "Unmatched closing parenthesis";
pub const UNMATCHED_OPENING_PAREN: &str = "Unmatched opening parenthesis";
pub const SUSPICIOUS_CHARACTERS: &str = "Potentially invalid characters in XPath expression";

/// Punctuation that is part of ordinary XPath
const ALLOWED_PUNCTUATION: &str = ".-/@[]()*+|!=<>&:,";

/// Characters outside the allowed set that are still not reported
const TOLERATED: &[char] = &['/', '#', '$', '?', '^'];

/// Check every XPath-bearing attribute, one error per bad expression
pub fn check_xpath_expressions(content: &str) -> Vec<Diagnostic> {
    let Some(re) = patterns::XPATH_ATTRIBUTE.as_ref() else {
        return Vec::new();
    };
    let index = LineIndex::new(content);

    re.captures_iter(content)
        .filter_map(|caps| {
            let attribute = caps.get(1)?.as_str();
            let value = caps.get(2).or_else(|| caps.get(3))?;
            let problem = check_xpath_syntax(value.as_str()).into_iter().next()?;

            // Span from the opening quote through the closing quote
            let quote = value.start() - 1;
            Some(Diagnostic::spanning(
                Severity::Error,
                format!("Invalid XPath in {} attribute: {}", attribute, problem),
                &index,
                quote,
                value.end() + 1,
            ))
        })
        .collect()
}

/// Return the problems found in one expression; empty means none
pub fn check_xpath_syntax(expr: &str) -> Vec<String> {
    let mut problems = Vec::new();

    problems.extend(check_balance(
        expr,
        '[',
        ']',
        UNMATCHED_OPENING_BRACKET,
        UNMATCHED_CLOSING_BRACKET,
    ));
    problems.extend(check_balance(
        expr,
        '(',
        ')',
        UNMATCHED_OPENING_PAREN,
        UNMATCHED_CLOSING_PAREN,
    ));

    if has_suspicious_characters(expr) {
        problems.push(SUSPICIOUS_CHARACTERS.to_string());
    }

    problems
}

/// Count `open`/`close` outside string literals. Stops at the first close
/// without a matching open.
fn check_balance(
    expr: &str,
    open: char,
    close: char,
    unmatched_open: &str,
    unmatched_close: &str,
) -> Option<String> {
    let mut depth: i64 = 0;
    let mut quote: Option<char> = None;
    let mut previous: Option<char> = None;

    for ch in expr.chars() {
        match quote {
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            Some(q) if ch == q && previous != Some('\\') => quote = None,
            _ => {}
        }

        if quote.is_none() {
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
                if depth < 0 {
                    return Some(unmatched_close.to_string());
                }
            }
        }
        previous = Some(ch);
    }

    (depth > 0).then(|| unmatched_open.to_string())
}

fn has_suspicious_characters(expr: &str) -> bool {
    let stripped = patterns::replace_all(&patterns::STRING_LITERAL, expr, "");
    stripped
        .chars()
        .filter(|&c| !is_allowed(c))
        .any(|c| !TOLERATED.contains(&c))
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(c)
}
