//! Identifier quoting helpers.
//!
//! Quoting must be normalized identically on the write side (when a column is
//! rendered into a statement) and the read side (when a result column is
//! looked up by name), so both go through these two functions.

use crate::dialect::Dialect;

/// Quote an identifier for the given dialect, doubling any embedded quote
/// characters.
#[must_use]
pub fn quote_ident(name: &str, dialect: Dialect) -> String {
    let quote = dialect.quote_chars()[0];
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for ch in name.chars() {
        if ch == quote {
            quoted.push(quote);
        }
        quoted.push(ch);
    }
    quoted.push(quote);
    quoted
}

/// Strip the dialect's quoting characters from `name`, if present.
///
/// An unquoted name is returned unchanged; a quoted one loses its surrounding
/// quotes and has doubled embedded quotes collapsed.
#[must_use]
pub fn unquote_ident(name: &str, dialect: Dialect) -> String {
    for &quote in dialect.quote_chars() {
        let mut chars = name.chars();
        if chars.next() == Some(quote) && name.len() >= 2 && name.ends_with(quote) {
            let inner = &name[quote.len_utf8()..name.len() - quote.len_utf8()];
            let doubled = format!("{quote}{quote}");
            return inner.replace(&doubled, &quote.to_string());
        }
    }
    name.to_string()
}
