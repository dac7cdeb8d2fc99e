//! Indenting pretty-printer.
//!
//! Re-indents markup by tag depth. Works on tokens, not a tree, so malformed
//! input still produces output: depth is clamped at zero and nothing fails.

use crate::parser::lexer::{tokenize, Token, TokenKind};
use crate::parser::patterns;

/// One indentation level
pub const INDENT: &str = "    ";

/// Collapse inter-tag whitespace and whitespace hugging `<` / `>`
pub fn normalize(xml: &str) -> String {
    let xml = patterns::replace_all(&patterns::GAP_BETWEEN_TAGS, xml, "><");
    let xml = patterns::replace_all(&patterns::SPACE_AFTER_OPEN, &xml, "<");
    let xml = patterns::replace_all(&patterns::SPACE_BEFORE_CLOSE, &xml, ">");
    xml.trim().to_string()
}

/// Pretty-print XML with four-space indentation.
///
/// An element whose only content is a text run is kept on one line:
/// `<b>text</b>`.
pub fn pretty_print(xml: &str) -> String {
    let normalized = normalize(xml);
    let tokens = tokenize(&normalized);

    let mut lines: Vec<String> = Vec::with_capacity(tokens.len());
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Closing => {
                depth = depth.saturating_sub(1);
                lines.push(indented(depth, token.text));
            }
            TokenKind::SelfClosing | TokenKind::Instruction | TokenKind::Text => {
                lines.push(indented(depth, token.text));
            }
            // Comments and other `<!` markup indent like opening tags
            TokenKind::Opening | TokenKind::Markup => {
                if let Some(leaf) = collapse_leaf(token, tokens.get(i + 1), tokens.get(i + 2)) {
                    lines.push(indented(depth, &leaf));
                    i += 2;
                } else {
                    lines.push(indented(depth, token.text));
                    depth += 1;
                }
            }
        }
        i += 1;
    }

    lines.join("\n").trim().to_string()
}

/// `<name>` + text + `</name>` on one line, when the three tokens line up
fn collapse_leaf(open: &Token, text: Option<&Token>, close: Option<&Token>) -> Option<String> {
    let text = text.filter(|t| t.kind == TokenKind::Text)?;
    let close = close.filter(|t| t.kind == TokenKind::Closing)?;
    if close.tag_name() != open.tag_name() {
        return None;
    }
    Some(format!("{}{}{}", open.text, text.text, close.text))
}

fn indented(depth: usize, text: &str) -> String {
    format!("{}{}", INDENT.repeat(depth), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_element_collapses() {
        assert_eq!(
            pretty_print("<a><b>text</b></a>"),
            "<a>\n    <b>text</b>\n</a>"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let input = "<root><list><item/><item/></list></root>";
        let expected = "<root>\n    <list>\n        <item/>\n        <item/>\n    </list>\n</root>";
        assert_eq!(pretty_print(input), expected);
    }

    #[test]
    fn test_processing_instruction_keeps_depth() {
        let input = "<?xml version=\"1.0\"?>\n<a>\n<b/></a>";
        assert_eq!(
            pretty_print(input),
            "<?xml version=\"1.0\"?>\n<a>\n    <b/>\n</a>"
        );
    }

    #[test]
    fn test_comment_indents_like_opening_tag() {
        let input = "<a><!-- c --><b/></a>";
        assert_eq!(
            pretty_print(input),
            "<a>\n    <!-- c -->\n        <b/>\n    </a>"
        );
    }

    #[test]
    fn test_comment_is_never_collapsed() {
        assert_eq!(
            pretty_print("<a><!-- c -->text</a>"),
            "<a>\n    <!-- c -->\n        text\n    </a>"
        );
    }

    #[test]
    fn test_mixed_content_text_on_own_line() {
        let input = "<p>Hello <b>world</b></p>";
        assert_eq!(pretty_print(input), "<p>\n    Hello\n    <b>world</b>\n</p>");
    }

    #[test]
    fn test_leaf_requires_matching_close() {
        assert_eq!(pretty_print("<a>text</b>"), "<a>\n    text\n</b>");
    }

    #[test]
    fn test_unbalanced_close_clamps_depth() {
        assert_eq!(pretty_print("</a></b><c/>"), "</a>\n</b>\n<c/>");
    }

    #[test]
    fn test_whitespace_normalization() {
        assert_eq!(normalize("  < a >\n  < /a >  "), "<a></a>");
        assert_eq!(pretty_print("< a >\n\n   < b/>\n</a >"), "<a>\n    <b/>\n</a>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pretty_print(""), "");
        assert_eq!(pretty_print("   \n "), "");
    }

    #[test]
    fn test_idempotent() {
        let input = r#"<?xml version="1.0"?><xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0"><xsl:template match="/"><out>text<x/></out><name>v</name></xsl:template></xsl:stylesheet>"#;
        let once = pretty_print(input);
        assert_eq!(pretty_print(&once), once);
    }
}
