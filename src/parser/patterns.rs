//! Compiled patterns shared by the lexer, formatter and validators.
//!
//! Each pattern compiles once on first use. A pattern that fails to compile is
//! logged and becomes `None`, which disables the check that needs it instead of
//! failing the whole pass.

use std::sync::LazyLock;

use regex::Regex;

fn compile(name: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("Failed to compile {} pattern: {}", name, e);
            None
        }
    }
}

/// Opening, closing or self-closing element tag. Group 1 is the element name.
pub static TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("tag", r"</?([A-Za-z_:][\w:.-]*)(?:\s[^>]*)?/?>"));

/// Any `<...>` markup, used to split text into tokens
pub static MARKUP: LazyLock<Option<Regex>> = LazyLock::new(|| compile("markup", r"<[^>]*>"));

pub static GAP_BETWEEN_TAGS: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("gap between tags", r">\s+<"));

pub static OPTIONAL_GAP_BETWEEN_TAGS: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("optional gap between tags", r">\s*<"));

pub static SPACE_AFTER_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("space after <", r"<\s+"));

pub static SPACE_BEFORE_CLOSE: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("space before >", r"\s+>"));

/// Self-closing element whose name does not start with `?`, `/` or `!`
pub static SELF_CLOSING: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("self-closing tag", r"<([^?/!][^>]*?)\s*/>"));

pub static XSLT_ROOT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        "xslt root",
        r"<(\w+:)?stylesheet[^>]*>|<(\w+:)?transform[^>]*>",
    )
});

/// `xsl:template` start tag. Group 1 is the attribute text.
pub static TEMPLATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("template", r"<xsl:template([^>]*)>"));

/// `select`/`test`/`match` attribute. Group 1 is the attribute name, group 2 a
/// double-quoted value and group 3 a single-quoted value.
pub static XPATH_ATTRIBUTE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(
        "xpath attribute",
        r#"(?i)\b(select|test|match)\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
    )
});

/// Quoted string literal inside an XPath expression
pub static STRING_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile("string literal", r#"'.*?'|".*?""#));

/// Apply `replacement` to every match of `pattern`, or return the text
/// unchanged when the pattern is unavailable
pub fn replace_all(pattern: &LazyLock<Option<Regex>>, text: &str, replacement: &str) -> String {
    match pattern.as_ref() {
        Some(re) => re.replace_all(text, replacement).into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in [
            &TAG,
            &MARKUP,
            &GAP_BETWEEN_TAGS,
            &OPTIONAL_GAP_BETWEEN_TAGS,
            &SPACE_AFTER_OPEN,
            &SPACE_BEFORE_CLOSE,
            &SELF_CLOSING,
            &XSLT_ROOT,
            &TEMPLATE,
            &XPATH_ATTRIBUTE,
            &STRING_LITERAL,
        ] {
            assert!(pattern.is_some());
        }
    }

    #[test]
    fn test_tag_pattern_skips_declarations() {
        let re = TAG.as_ref().unwrap();
        assert!(re.is_match("<xsl:value-of select=\"a\"/>"));
        assert!(re.is_match("</xsl:template>"));
        let caps = re.captures("<root/>").unwrap();
        assert_eq!(&caps[1], "root");
        assert!(!re.is_match("<?xml version=\"1.0\"?>"));
        assert!(!re.is_match("<!-- comment -->"));
        assert!(!re.is_match("<1abc>"));
    }

    #[test]
    fn test_xpath_attribute_quotes() {
        let re = XPATH_ATTRIBUTE.as_ref().unwrap();
        let caps = re.captures(r#"test="@a = 'x'""#).unwrap();
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("@a = 'x'"));

        let caps = re.captures("SELECT='b'").unwrap();
        assert_eq!(&caps[1], "SELECT");
        assert_eq!(caps.get(3).map(|m| m.as_str()), Some("b"));

        assert!(re.captures(r#"deselect="x""#).is_none());
    }
}
