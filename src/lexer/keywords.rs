//! Keyword recognition for the query language.
//!
//! Unlike method words in the shape matcher, lexical keywords are
//! case-sensitive: `Collection` is an ordinary identifier.

use super::token::TokenCategory;

/// Looks up a keyword by its exact spelling.
pub fn lookup_keyword(word: &str) -> Option<TokenCategory> {
    match word {
        "collection" => Some(TokenCategory::KeywordCollection),
        "document" => Some(TokenCategory::KeywordDocument),
        _ => None,
    }
}

/// Returns true if `ch` is one of the single-character symbols.
pub fn is_symbol(ch: char) -> bool {
    matches!(ch, ';' | ',' | '*' | '=' | '<' | '>' | '!' | '+' | '-' | '/')
}
