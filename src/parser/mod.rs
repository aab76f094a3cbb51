//! Statement shape matching.
//!
//! A query is syntactically valid only if the whole string is exactly one
//! statement in one of the [`StatementShape`]s. Shapes are tried in
//! [`StatementShape::ALL`] order and the first full match wins. Method
//! words are matched case-insensitively; names keep their casing.

pub(crate) mod cursor;

use crate::ast::{Span, Statement, StatementShape};
use crate::diag::Diag;
use cursor::Cursor;

/// Reason reported for any string that matches no shape.
pub const INVALID_STRUCTURE: &str = "Invalid basic structure for a document-database query.";

/// Outcome of shape matching for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeVerdict {
    /// The query matched this shape.
    Valid(StatementShape),
    /// The query matched no shape.
    Invalid(String),
}

impl ShapeVerdict {
    /// Returns true if a shape matched.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The matched shape, if any.
    pub fn shape(&self) -> Option<StatementShape> {
        match self {
            Self::Valid(shape) => Some(*shape),
            Self::Invalid(_) => None,
        }
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(reason) => Some(reason.as_str()),
        }
    }

    /// Builds a diagnostic covering `span` for an invalid verdict.
    pub fn to_diag(&self, span: Span) -> Option<Diag> {
        self.reason().map(|reason| {
            Diag::error(reason)
                .with_primary_label(span, "expected a single collection(...) statement")
                .with_help("permitted forms: .document(..).set({..}), .add({..}), .document(..).update({..}), .document(..).delete()")
                .with_code("P001")
        })
    }
}

/// Checks `source` against the permitted shapes.
pub fn match_shape(source: &str) -> ShapeVerdict {
    match parse_statement(source) {
        Some(statement) => ShapeVerdict::Valid(statement.shape),
        None => ShapeVerdict::Invalid(INVALID_STRUCTURE.to_string()),
    }
}

/// Parses `source` as one statement, returning its captured pieces.
pub fn parse_statement(source: &str) -> Option<Statement> {
    // End anchor tolerates a single trailing newline.
    let source = source.strip_suffix('\n').unwrap_or(source);

    StatementShape::ALL
        .iter()
        .find_map(|&shape| parse_shape(source, shape))
}

/// Matches `source` against one shape, anchored at both ends.
fn parse_shape(source: &str, shape: StatementShape) -> Option<Statement> {
    let mut cursor = Cursor::new(source);

    let collection = selector(&mut cursor, "collection")?;
    let document = if shape.has_document() {
        cursor.literal(".")?;
        Some(selector(&mut cursor, "document")?)
    } else {
        None
    };

    cursor.literal(".")?;
    cursor.keyword(shape.method())?;
    cursor.literal("(")?;

    let body = if shape.has_body() {
        cursor.literal("{")?;
        Some(cursor.body_until("});")?.to_string())
    } else {
        cursor.literal(");")?;
        None
    };

    cursor.finish()?;

    Some(Statement {
        shape,
        collection: collection.into(),
        document: document.map(Into::into),
        body,
    })
}

/// Matches `<keyword>('<name>')` and returns the name.
pub(crate) fn selector<'s>(cursor: &mut Cursor<'s>, keyword: &str) -> Option<&'s str> {
    cursor.keyword(keyword)?;
    cursor.literal("('")?;
    let name = cursor.word()?;
    cursor.literal("')")?;
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_shape() {
        let stmt = parse_statement("collection('users').document('u1').set({\"id\": 1});").unwrap();
        assert_eq!(stmt.shape, StatementShape::Set);
        assert_eq!(stmt.collection, "users");
        assert_eq!(stmt.document.as_deref(), Some("u1"));
        assert_eq!(stmt.body.as_deref(), Some("\"id\": 1"));
    }

    #[test]
    fn add_shape_has_no_document() {
        let stmt = parse_statement("collection('users').add({\"nombre\": \"ana\"});").unwrap();
        assert_eq!(stmt.shape, StatementShape::Add);
        assert_eq!(stmt.document, None);
    }

    #[test]
    fn update_shape() {
        assert_eq!(
            match_shape("collection('a').document('b').update({x});"),
            ShapeVerdict::Valid(StatementShape::Update)
        );
    }

    #[test]
    fn delete_shape_has_no_body() {
        let stmt = parse_statement("collection('x').document('y').delete();").unwrap();
        assert_eq!(stmt.shape, StatementShape::Delete);
        assert_eq!(stmt.body, None);
    }

    #[test]
    fn method_words_are_case_insensitive() {
        assert!(match_shape("COLLECTION('A').Document('B').DELETE();").is_valid());
        let stmt = parse_statement("Collection('Users').ADD({x});").unwrap();
        assert_eq!(stmt.collection, "Users");
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(!match_shape("collection('a').add({});").is_valid());
    }

    #[test]
    fn body_extends_to_final_closer() {
        let stmt = parse_statement("collection('a').add({x});y});").unwrap();
        assert_eq!(stmt.body.as_deref(), Some("x});y"));
    }

    #[test]
    fn body_cannot_span_lines() {
        assert!(!match_shape("collection('a').add({x\ny});").is_valid());
    }

    #[test]
    fn trailing_newline_is_tolerated_once() {
        assert!(match_shape("collection('a').document('b').delete();\n").is_valid());
        assert!(!match_shape("collection('a').document('b').delete();\n\n").is_valid());
    }

    #[test]
    fn whole_string_must_match() {
        assert!(!match_shape(" collection('a').document('b').delete();").is_valid());
        assert!(!match_shape("collection('a').document('b').delete(); ").is_valid());
        assert!(!match_shape("collection('a').document('b').delete()").is_valid());
    }

    #[test]
    fn add_with_document_selector_is_rejected() {
        assert!(!match_shape("collection('a').document('b').add({x});").is_valid());
    }

    #[test]
    fn invalid_verdict_carries_fixed_reason() {
        let verdict = match_shape("DROP TABLE users;");
        assert_eq!(verdict.reason(), Some(INVALID_STRUCTURE));
        let diag = verdict.to_diag(0..17).unwrap();
        assert_eq!(diag.code.as_deref(), Some("P001"));
    }

    #[test]
    fn names_must_be_word_characters() {
        assert!(!match_shape("collection('a-b').document('c').delete();").is_valid());
        assert!(!match_shape("collection('').document('c').delete();").is_valid());
    }
}
