//! Token categories, lexemes, and per-query token tallies.

use crate::ast::Span;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// The classification assigned to a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    /// The whole word `collection`.
    KeywordCollection,
    /// The whole word `document`.
    KeywordDocument,
    /// A letter or underscore followed by letters, digits, or underscores.
    Identifier,
    /// A run of decimal digits.
    Number,
    /// A single punctuation symbol.
    Symbol,
    /// A single-quoted string.
    StringLiteral,
    /// Any other single character, whitespace included.
    Unrecognized,
}

impl TokenCategory {
    /// Number of categories.
    pub const COUNT: usize = 7;

    /// Every category, in tally order.
    pub const ALL: [TokenCategory; Self::COUNT] = [
        TokenCategory::KeywordCollection,
        TokenCategory::KeywordDocument,
        TokenCategory::Identifier,
        TokenCategory::Number,
        TokenCategory::StringLiteral,
        TokenCategory::Symbol,
        TokenCategory::Unrecognized,
    ];

    /// Short name used when a tally is serialized.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::KeywordCollection => "COLLECTION",
            Self::KeywordDocument => "DOCUMENT",
            Self::Identifier => "ID",
            Self::Number => "NUM",
            Self::Symbol => "SYM",
            Self::StringLiteral => "STR",
            Self::Unrecognized => "ERR",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::KeywordCollection => 0,
            Self::KeywordDocument => 1,
            Self::Identifier => 2,
            Self::Number => 3,
            Self::StringLiteral => 4,
            Self::Symbol => 5,
            Self::Unrecognized => 6,
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCategory::KeywordCollection => write!(f, "Keyword-Collection"),
            TokenCategory::KeywordDocument => write!(f, "Keyword-Document"),
            TokenCategory::Identifier => write!(f, "Identifier"),
            TokenCategory::Number => write!(f, "Number"),
            TokenCategory::Symbol => write!(f, "Symbol"),
            TokenCategory::StringLiteral => write!(f, "StringLiteral"),
            TokenCategory::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

/// A single classified unit of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The category this unit was classified as.
    pub category: TokenCategory,
    /// Byte range of the unit in the source text.
    pub span: Span,
}

impl Lexeme {
    /// Creates a new lexeme.
    pub fn new(category: TokenCategory, span: Span) -> Self {
        Self { category, span }
    }

    /// Returns the slice of `source` this lexeme covers.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Per-category counts for one analyzed query.
///
/// All seven categories are always present, starting at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTally {
    counts: [usize; TokenCategory::COUNT],
}

impl TokenTally {
    /// Creates a zeroed tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `category`.
    pub fn record(&mut self, category: TokenCategory) {
        self.counts[category.index()] += 1;
    }

    /// Returns the count for `category`.
    pub fn get(&self, category: TokenCategory) -> usize {
        self.counts[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterates `(category, count)` pairs in tally order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenCategory, usize)> + '_ {
        TokenCategory::ALL.iter().map(|&cat| (cat, self.get(cat)))
    }
}

impl Serialize for TokenTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TokenCategory::COUNT))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.wire_name(), &count)?;
        }
        map.end()
    }
}
