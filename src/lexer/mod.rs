//! Lexical analysis for document-database queries.
//!
//! The lexer classifies every character of the input into exactly one
//! [`Lexeme`]. It never fails: characters that fit no rule are counted as
//! [`TokenCategory::Unrecognized`] and handed to an optional
//! [`LexObserver`], then scanning continues with the next character.

pub mod keywords;
pub mod token;

use crate::ast::Span;
use crate::diag::Diag;
use token::{Lexeme, TokenCategory, TokenTally};

/// Receives every unrecognized character seen during a scan.
///
/// This is a reporting hook only; it cannot stop or alter the scan.
pub trait LexObserver {
    /// Called once per unrecognized character.
    fn on_unrecognized(&mut self, ch: char, span: Span);
}

impl<F> LexObserver for F
where
    F: FnMut(char, Span),
{
    fn on_unrecognized(&mut self, ch: char, span: Span) {
        self(ch, span)
    }
}

/// Observer that emits a `tracing` event per unrecognized character.
///
/// Whitespace is logged at trace level, anything else at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LexObserver for TracingObserver {
    fn on_unrecognized(&mut self, ch: char, span: Span) {
        if ch.is_whitespace() {
            tracing::trace!(offset = span.start, "whitespace counted as unrecognized");
        } else {
            tracing::debug!(offset = span.start, "illegal character {ch:?}");
        }
    }
}

/// Result of lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexResult {
    /// Every classified unit, in source order. Spans tile the input.
    pub lexemes: Vec<Lexeme>,
    /// Per-category counts over `lexemes`.
    pub tally: TokenTally,
    /// One diagnostic per illegal non-whitespace character.
    pub diagnostics: Vec<Diag>,
}

/// A lexical analyzer over one query string.
pub struct Lexer<'a> {
    /// The source text being lexed.
    source: &'a str,
    /// Current byte position in source.
    pos: usize,
    lexemes: Vec<Lexeme>,
    tally: TokenTally,
    diagnostics: Vec<Diag>,
    observer: Option<&'a mut dyn LexObserver>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            lexemes: Vec::new(),
            tally: TokenTally::new(),
            diagnostics: Vec::new(),
            observer: None,
        }
    }

    /// Routes unrecognized characters to `observer` instead of the
    /// default [`TracingObserver`].
    pub fn with_observer(mut self, observer: &'a mut dyn LexObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Scans the whole source and returns lexemes, tally, and diagnostics.
    pub fn scan(mut self) -> LexResult {
        while !self.is_at_end() {
            self.scan_unit();
        }

        LexResult {
            lexemes: self.lexemes,
            tally: self.tally,
            diagnostics: self.diagnostics,
        }
    }

    /// Classifies the unit starting at the current position.
    ///
    /// Rules are tried in a fixed order and the first match wins.
    fn scan_unit(&mut self) {
        let start = self.pos;
        let ch = self.advance();

        match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.scan_word(start),
            '0'..='9' => self.scan_number(start),
            '\'' => self.scan_string_literal(start),
            c if keywords::is_symbol(c) => self.add(TokenCategory::Symbol, start),
            _ => self.unrecognized(ch, start),
        }
    }

    /// Scans a keyword or identifier.
    fn scan_word(&mut self, start: usize) {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let word = &self.source[start..self.pos];
        let category = keywords::lookup_keyword(word).unwrap_or(TokenCategory::Identifier);
        self.add(category, start);
    }

    fn scan_number(&mut self, start: usize) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        self.add(TokenCategory::Number, start);
    }

    /// Scans a single-quoted string.
    ///
    /// Without a closing quote the opening `'` is unrecognized on its own
    /// and scanning resumes right after it.
    fn scan_string_literal(&mut self, start: usize) {
        match self.source[self.pos..].find('\'') {
            Some(offset) => {
                self.pos += offset + 1;
                self.add(TokenCategory::StringLiteral, start);
            }
            None => self.unrecognized('\'', start),
        }
    }

    fn unrecognized(&mut self, ch: char, start: usize) {
        let span = start..self.pos;
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_unrecognized(ch, span.clone());
        } else {
            TracingObserver.on_unrecognized(ch, span.clone());
        }

        if !ch.is_whitespace() {
            self.diagnostics.push(
                Diag::warning(format!("illegal character {ch:?}"))
                    .with_primary_label(span, "not part of any token")
                    .with_code("L001"),
            );
        }

        self.add(TokenCategory::Unrecognized, start);
    }

    fn add(&mut self, category: TokenCategory, start: usize) {
        self.tally.record(category);
        self.lexemes.push(Lexeme::new(category, start..self.pos));
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Advances and returns the current character.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if !self.is_at_end() {
            self.pos += ch.len_utf8();
        }
        ch
    }

    /// Returns true if at end of input.
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Convenience function returning only the token tally of `source`.
pub fn tokenize(source: &str) -> TokenTally {
    Lexer::new(source).scan().tally
}

/// Scans `source` with the default observer.
pub fn scan(source: &str) -> LexResult {
    Lexer::new(source).scan()
}
