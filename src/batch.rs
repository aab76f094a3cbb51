//! Batch requests: the `{"queries": [...]}` document callers submit.
//!
//! A malformed request is rejected as a whole with a [`BatchError`]; it
//! never turns into per-query reports.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Request-level failures.
#[derive(Debug, Error, Diagnostic)]
pub enum BatchError {
    #[error("request body is not valid JSON")]
    #[diagnostic(code(batch::invalid_json))]
    InvalidJson(#[source] serde_json::Error),

    #[error("request body must be a JSON object")]
    #[diagnostic(code(batch::not_an_object), help("send {{\"queries\": [\"...\"]}}"))]
    NotAnObject,

    #[error("request has no `queries` field")]
    #[diagnostic(code(batch::missing_queries), help("send {{\"queries\": [\"...\"]}}"))]
    MissingQueries,

    #[error("`queries` must be an array of strings")]
    #[diagnostic(code(batch::queries_not_array))]
    QueriesNotArray,

    #[error("query at index {index} is not a string")]
    #[diagnostic(code(batch::non_string_query))]
    NonStringQuery { index: usize },
}

/// An ordered list of queries to analyze together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub queries: Vec<String>,
}

impl BatchRequest {
    pub fn new(queries: Vec<String>) -> Self {
        Self { queries }
    }

    /// Parses a JSON request, naming exactly what is wrong when it is
    /// malformed.
    pub fn from_json(body: &str) -> Result<Self, BatchError> {
        let value: Value = serde_json::from_str(body).map_err(BatchError::InvalidJson)?;
        let object = value.as_object().ok_or(BatchError::NotAnObject)?;
        let queries = object
            .get("queries")
            .ok_or(BatchError::MissingQueries)?
            .as_array()
            .ok_or(BatchError::QueriesNotArray)?;

        let queries = queries
            .iter()
            .enumerate()
            .map(|(index, query)| {
                query
                    .as_str()
                    .map(str::to_owned)
                    .ok_or(BatchError::NonStringQuery { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { queries })
    }

    /// Treats each non-empty line of `text` as one query.
    ///
    /// Line endings are dropped; other whitespace is kept because it
    /// affects the analysis.
    pub fn from_lines(text: &str) -> Self {
        let queries = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { queries }
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_queries_in_order() {
        let request = BatchRequest::from_json(r#"{"queries": ["a", "b"]}"#).unwrap();
        assert_eq!(request.queries, vec!["a", "b"]);
    }

    #[test]
    fn empty_array_is_fine() {
        let request = BatchRequest::from_json(r#"{"queries": []}"#).unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let request = BatchRequest::from_json(r#"{"queries": ["a"], "client": "web"}"#).unwrap();
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            BatchRequest::from_json("{queries"),
            Err(BatchError::InvalidJson(_))
        ));
    }

    #[test]
    fn rejects_non_object() {
        assert!(matches!(
            BatchRequest::from_json(r#"["a"]"#),
            Err(BatchError::NotAnObject)
        ));
    }

    #[test]
    fn rejects_missing_queries() {
        assert!(matches!(
            BatchRequest::from_json(r#"{"query": ["a"]}"#),
            Err(BatchError::MissingQueries)
        ));
    }

    #[test]
    fn rejects_non_array_queries() {
        assert!(matches!(
            BatchRequest::from_json(r#"{"queries": "a"}"#),
            Err(BatchError::QueriesNotArray)
        ));
    }

    #[test]
    fn rejects_non_string_element() {
        assert!(matches!(
            BatchRequest::from_json(r#"{"queries": ["a", 3]}"#),
            Err(BatchError::NonStringQuery { index: 1 })
        ));
    }

    #[test]
    fn error_codes() {
        let err = BatchRequest::from_json("{}").unwrap_err();
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("batch::missing_queries")
        );
    }

    #[test]
    fn lines_skip_blanks_and_keep_spaces() {
        let request = BatchRequest::from_lines("a;\r\n\n  b;\n");
        assert_eq!(request.queries, vec!["a;", "  b;"]);
    }
}
