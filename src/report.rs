//! Per-query validation reports.

use crate::lexer::token::TokenTally;
use crate::parser::ShapeVerdict;
use crate::semantic::SemanticVerdict;
use serde::Serialize;

/// Syntactic display string for a valid shape.
pub const CORRECT_SYNTAX: &str = "Correct syntax";

/// Semantic display string when every name is known.
pub const CORRECT_SEMANTICS: &str = "Correct use of semantic structures";

/// The combined result of all three stages for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Token counts by category.
    pub lexical: TokenTally,
    /// [`CORRECT_SYNTAX`] or the structure error.
    pub syntactic: String,
    /// [`CORRECT_SEMANTICS`] or the reasons joined by spaces.
    pub semantic: String,
    /// True only if both the syntactic and semantic verdicts are valid.
    pub valid: bool,
    /// Empty when valid; otherwise the syntactic message if syntax failed,
    /// else the semantic message.
    pub error: String,
}

impl ValidationReport {
    /// Combines the three independent stage outputs.
    pub fn build(lexical: TokenTally, shape: &ShapeVerdict, names: &SemanticVerdict) -> Self {
        let syntactic = match shape {
            ShapeVerdict::Valid(_) => CORRECT_SYNTAX.to_string(),
            ShapeVerdict::Invalid(reason) => reason.clone(),
        };
        let semantic = match names {
            SemanticVerdict::Valid => CORRECT_SEMANTICS.to_string(),
            SemanticVerdict::Invalid(reasons) => reasons.join(" "),
        };

        let valid = shape.is_valid() && names.is_valid();
        let error = if valid {
            String::new()
        } else if !shape.is_valid() {
            syntactic.clone()
        } else {
            semantic.clone()
        };

        Self {
            lexical,
            syntactic,
            semantic,
            valid,
            error,
        }
    }
}
