//! Spans and spanned values.

use std::ops::Range;

/// A byte range in source text.
pub type Span = Range<usize>;

/// A value with an associated source span.
///
/// Used for names pulled out of a query so diagnostics can point back at
/// where they were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// The span in source text where this value appears.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_new() {
        let spanned = Spanned::new("users", 12..17);
        assert_eq!(spanned.node, "users");
        assert_eq!(spanned.span, 12..17);
    }
}
