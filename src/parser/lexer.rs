//! XML Lexer
//!
//! Two shallow scans over raw text: `scan_tags` finds element tags with their
//! byte offsets, `tokenize` splits text into tag and text tokens. Neither
//! builds a tree or checks well-formedness.

use crate::parser::patterns;

/// An element tag found by `scan_tags`
#[derive(Debug, Clone, PartialEq)]
pub struct TagMatch<'a> {
    /// Element name, including any prefix (e.g. "xsl:template")
    pub name: &'a str,
    /// Full tag text from `<` to `>`
    pub text: &'a str,
    /// Byte offset of `<`
    pub start: usize,
    /// Byte offset just past `>`
    pub end: usize,
}

impl TagMatch<'_> {
    pub fn is_closing(&self) -> bool {
        self.text.starts_with("</")
    }

    pub fn is_self_closing(&self) -> bool {
        self.text.ends_with("/>")
    }
}

/// Find every element tag in document order
pub fn scan_tags(content: &str) -> Vec<TagMatch<'_>> {
    let Some(re) = patterns::TAG.as_ref() else {
        return Vec::new();
    };

    re.captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            if name.trim().is_empty() {
                return None;
            }
            Some(TagMatch {
                name,
                text: whole.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Token types produced by `tokenize`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// `</name>`
    Closing,
    /// `<name .../>`
    SelfClosing,
    /// `<?...?>`
    Instruction,
    /// `<!-- -->`, `<!DOCTYPE>`, `<![CDATA[...]]>`
    Markup,
    /// `<name ...>`
    Opening,
    /// Text run between tags
    Text,
}

/// A trimmed token with its kind
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn classify(text: &'a str) -> Self {
        let kind = if !text.starts_with('<') {
            TokenKind::Text
        } else if text.starts_with("</") {
            TokenKind::Closing
        } else if text.starts_with("<?") {
            TokenKind::Instruction
        } else if text.starts_with("<!") {
            TokenKind::Markup
        } else if text.ends_with("/>") {
            TokenKind::SelfClosing
        } else {
            TokenKind::Opening
        };
        Token { kind, text }
    }

    /// Element name of an opening, closing or self-closing tag
    pub fn tag_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Opening | TokenKind::Closing | TokenKind::SelfClosing => {
                Some(tag_name(self.text))
            }
            TokenKind::Instruction | TokenKind::Markup | TokenKind::Text => None,
        }
    }
}

/// Name portion of a tag: text after `<` or `</` up to whitespace, `/` or `>`
pub fn tag_name(tag: &str) -> &str {
    let rest = tag
        .strip_prefix("</")
        .or_else(|| tag.strip_prefix('<'))
        .unwrap_or(tag);
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Split text on `<...>` boundaries, keeping both tags and the text between
/// them in order. Whitespace-only runs are dropped and every token is trimmed.
pub fn tokenize(xml: &str) -> Vec<Token<'_>> {
    let Some(re) = patterns::MARKUP.as_ref() else {
        let trimmed = xml.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![Token::classify(trimmed)]
        };
    };

    let mut tokens = Vec::new();
    let mut last = 0;
    for m in re.find_iter(xml) {
        push_trimmed(&mut tokens, &xml[last..m.start()]);
        push_trimmed(&mut tokens, m.as_str());
        last = m.end();
    }
    push_trimmed(&mut tokens, &xml[last..]);

    tokens
}

fn push_trimmed<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        tokens.push(Token::classify(trimmed));
    }
}
