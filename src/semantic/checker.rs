//! Collection and field name checking.
//!
//! The checker re-scans the raw query text; it does not depend on the
//! query having a valid shape. Collection references are matched
//! anywhere in the text, case-insensitively, and every one of them is
//! declared in the registry right after it is checked.

use super::registry::Registry;
use crate::ast::{Span, Spanned};
use crate::diag::Diag;
use crate::parser::cursor::Cursor;
use crate::parser::selector;
use smol_str::SmolStr;

/// Outcome of name checking for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticVerdict {
    /// Every referenced name is known.
    Valid,
    /// Reasons in the order they were found.
    Invalid(Vec<String>),
}

impl SemanticVerdict {
    /// Returns true if no reasons were found.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The collected reasons; empty when valid.
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Valid => &[],
            Self::Invalid(reasons) => reasons,
        }
    }
}

/// Verdict plus one diagnostic per reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCheck {
    pub verdict: SemanticVerdict,
    /// S001 for collections, then S002 for fields.
    pub diagnostics: Vec<Diag>,
}

/// Checks collection and field names in `source` against `registry`.
pub fn check_names(source: &str, registry: &mut Registry) -> SemanticVerdict {
    check_names_detailed(source, registry).verdict
}

/// Like [`check_names`], also returning spanned diagnostics.
pub fn check_names_detailed(source: &str, registry: &mut Registry) -> NameCheck {
    let mut reasons = Vec::new();
    let mut diagnostics = Vec::new();

    for collection in collection_references(source) {
        if !registry.contains_collection(&collection.node) {
            let reason = format!("Collection '{}' does not exist.", collection.node);
            let declared = registry.collections().collect::<Vec<_>>().join(", ");
            diagnostics.push(
                Diag::error(reason.as_str())
                    .with_primary_label(collection.span.clone(), "unknown collection")
                    .with_secondary_label(selector_keyword_span(&collection.span), "selected here")
                    .with_help(format!("declared collections: {declared}"))
                    .with_note("the collection counts as declared from here on")
                    .with_code("S001"),
            );
            reasons.push(reason);
        }
        registry.declare_collection(collection.node);
    }

    if let Some(block) = first_brace_block(source) {
        for field in field_names(&block) {
            if !registry.is_known_field(&field.node) {
                let reason = format!(
                    "Field '{}' does not exist in the declared collections.",
                    field.node
                );
                let known = registry.fields().collect::<Vec<_>>().join(", ");
                diagnostics.push(
                    Diag::error(reason.as_str())
                        .with_primary_label(field.span, "unknown field")
                        .with_help(format!("known fields: {known}"))
                        .with_code("S002"),
                );
                reasons.push(reason);
            }
        }
    }

    let verdict = if reasons.is_empty() {
        SemanticVerdict::Valid
    } else {
        SemanticVerdict::Invalid(reasons)
    };

    NameCheck {
        verdict,
        diagnostics,
    }
}

/// Finds every `collection('<name>')` in `source`, left to right.
///
/// Matches do not overlap and duplicates are kept. Spans cover the name.
pub fn collection_references(source: &str) -> Vec<Spanned<SmolStr>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let mut cursor = Cursor::new(&source[pos..]);
        if let Some(name) = selector(&mut cursor, "collection") {
            let end = pos + cursor.position() - "')".len();
            found.push(Spanned::new(SmolStr::new(name), end - name.len()..end));
            pos += cursor.position();
        } else {
            pos += source[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    found
}

/// Span of the `collection` keyword in front of a name found by
/// [`collection_references`].
fn selector_keyword_span(name: &Span) -> Span {
    let end = name.start - "('".len();
    end - "collection".len()..end
}

/// Finds the first `{...}` block and returns its contents.
///
/// A block is a `{`, at least one character, then the nearest `}`, all on
/// one line. An opening brace that cannot be closed that way is skipped
/// and the search resumes at the next one.
pub fn first_brace_block(source: &str) -> Option<Spanned<&str>> {
    source
        .match_indices('{')
        .find_map(|(open, _)| {
            let start = open + 1;
            let inner = &source[start..];
            let first = inner.chars().next().filter(|&ch| ch != '\n')?;
            let after_first = first.len_utf8();
            let close = inner[after_first..].find(['}', '\n'])? + after_first;
            (inner.as_bytes()[close] == b'}')
                .then(|| Spanned::new(&inner[..close], start..start + close))
        })
}

/// Splits a brace block into field names.
///
/// Each comma-separated piece contributes the text before its first `:`,
/// trimmed of whitespace and then of surrounding double quotes. Empty
/// names are kept.
pub fn field_names(block: &Spanned<&str>) -> Vec<Spanned<SmolStr>> {
    let mut offset = block.span.start;
    let mut names = Vec::new();

    for piece in block.node.split(',') {
        let key = piece.split_once(':').map_or(piece, |(key, _)| key);
        let trimmed = key.trim();
        let name = trimmed.trim_matches('"');

        let lead = (key.len() - key.trim_start().len())
            + (trimmed.len() - trimmed.trim_start_matches('"').len());
        let start = offset + lead.min(key.len());
        names.push(Spanned::new(SmolStr::new(name), start..start + name.len()));

        offset += piece.len() + 1;
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::LabelRole;

    fn names(refs: Vec<Spanned<SmolStr>>) -> Vec<String> {
        refs.into_iter().map(|r| r.node.to_string()).collect()
    }

    #[test]
    fn finds_collections_in_order_with_duplicates() {
        let refs = collection_references("collection('a') collection('b') COLLECTION('a')");
        assert_eq!(names(refs), vec!["a", "b", "a"]);
    }

    #[test]
    fn collection_span_points_at_name() {
        let source = "collection('users').add({x});";
        let refs = collection_references(source);
        assert_eq!(&source[refs[0].span.clone()], "users");
    }

    #[test]
    fn collection_match_is_not_word_bounded() {
        let refs = collection_references("subcollection('inner')");
        assert_eq!(names(refs), vec!["inner"]);
    }

    #[test]
    fn malformed_collection_references_are_ignored() {
        assert!(collection_references("collection(\"a\") collection('') collection('a-b')").is_empty());
    }

    #[test]
    fn brace_block_is_first_shortest() {
        let block = first_brace_block("x {a: 1} {b: 2}").unwrap();
        assert_eq!(block.node, "a: 1");
        assert_eq!(block.span, 3..7);
    }

    #[test]
    fn brace_block_needs_one_char() {
        let block = first_brace_block("{}}").unwrap();
        assert_eq!(block.node, "}");
        assert!(first_brace_block("{}").is_none());
    }

    #[test]
    fn brace_block_skips_line_breaks() {
        assert!(first_brace_block("{a\n}").is_none());
        let block = first_brace_block("{a\n{b}").unwrap();
        assert_eq!(block.node, "b");
    }

    #[test]
    fn brace_block_ignores_nesting() {
        let block = first_brace_block("{\"a\": {\"b\": 1}}").unwrap();
        assert_eq!(block.node, "\"a\": {\"b\": 1");
    }

    #[test]
    fn field_names_strip_whitespace_and_quotes() {
        let source = "{ \"nombre\": \"ana\",  edad : 3 }";
        let block = first_brace_block(source).unwrap();
        let fields = field_names(&block);
        assert_eq!(names(fields.clone()), vec!["nombre", "edad"]);
        assert_eq!(&source[fields[0].span.clone()], "nombre");
        assert_eq!(&source[fields[1].span.clone()], "edad");
    }

    #[test]
    fn field_without_colon_uses_whole_piece() {
        let block = Spanned::new("id, x", 0..5);
        assert_eq!(names(field_names(&block)), vec!["id", "x"]);
    }

    #[test]
    fn trailing_comma_yields_empty_name() {
        let block = Spanned::new("\"id\": 1,", 0..8);
        assert_eq!(names(field_names(&block)), vec!["id", ""]);
    }

    #[test]
    fn known_collection_and_field_is_valid() {
        let mut registry = Registry::default();
        let verdict = check_names("collection('mi_coleccion').add({\"nombre\": \"ana\"});", &mut registry);
        assert_eq!(verdict, SemanticVerdict::Valid);
    }

    #[test]
    fn unknown_collection_then_known_within_same_query() {
        let mut registry = Registry::default();
        let verdict = check_names("collection('x') collection('x')", &mut registry);
        assert_eq!(
            verdict.reasons(),
            &["Collection 'x' does not exist.".to_string()]
        );
        assert!(registry.contains_collection("x"));
    }

    #[test]
    fn reasons_are_collections_then_fields() {
        let mut registry = Registry::default();
        let check = check_names_detailed(
            "collection('clientes').document('c1').update({\"telefono\": \"123\"});",
            &mut registry,
        );
        assert_eq!(
            check.verdict.reasons(),
            &[
                "Collection 'clientes' does not exist.".to_string(),
                "Field 'telefono' does not exist in the declared collections.".to_string(),
            ]
        );
        let codes: Vec<_> = check
            .diagnostics
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect();
        assert_eq!(codes, vec!["S001", "S002"]);
    }

    #[test]
    fn unknown_collection_points_at_selector() {
        let source = "x.Collection('ghost')";
        let mut registry = Registry::default();
        let check = check_names_detailed(source, &mut registry);
        let diag = &check.diagnostics[0];

        assert_eq!(diag.labels[0].role, LabelRole::Primary);
        assert_eq!(&source[diag.labels[0].span.clone()], "ghost");
        assert_eq!(diag.labels[1].role, LabelRole::Secondary);
        assert_eq!(&source[diag.labels[1].span.clone()], "Collection");
        assert_eq!(diag.help.as_deref(), Some("declared collections: mi_coleccion"));
    }

    #[test]
    fn no_brace_block_skips_fields() {
        let mut registry = Registry::default();
        let verdict = check_names("collection('mi_coleccion').document('a').delete();", &mut registry);
        assert!(verdict.is_valid());
    }
}
