//! Line-per-tag formatting without indentation.

use crate::parser::patterns;

/// Put every tag that directly follows another tag on its own line and write
/// self-closing tags as `<name attrs />`. Text content is left in place.
pub fn break_tags(xml: &str) -> String {
    let joined = patterns::replace_all(&patterns::OPTIONAL_GAP_BETWEEN_TAGS, xml, "><");
    let spaced = patterns::replace_all(&patterns::SELF_CLOSING, &joined, "<$1 />");
    spaced.replace("><", ">\n<")
}
