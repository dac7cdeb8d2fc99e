//! XML Scanning
//!
//! Regex-level scanning of XML/XSLT text. This is deliberately not an XML
//! parser: it finds tags and text runs and nothing more.

pub mod lexer;
pub mod patterns;

pub use lexer::{scan_tags, tag_name, tokenize, TagMatch, Token, TokenKind};
