//! Validator for document-database method-chain queries.
//!
//! Each query goes through three independent stages: a tokenizer that
//! tallies token categories, a shape matcher that accepts exactly one of
//! four statement forms, and a name checker that looks collections and
//! fields up in a [`Registry`]. The results are combined into a
//! [`ValidationReport`].
//!
//! # Example
//!
//! ```
//! use docquery_analyzer::{Analyzer, TokenCategory};
//!
//! let mut analyzer = Analyzer::default();
//! let report = analyzer.analyze("collection('mi_coleccion').add({\"nombre\": \"ana\"});");
//!
//! assert!(report.valid);
//! assert_eq!(report.syntactic, "Correct syntax");
//! assert_eq!(report.lexical.get(TokenCategory::KeywordCollection), 1);
//! ```

pub mod analyzer;
pub mod ast;
pub mod batch;
pub mod cli;
pub mod config;
pub mod diag;
pub mod lexer;
pub mod parser;
pub mod report;
pub mod semantic;

// Re-export syntax primitives.
pub use ast::{Span, Spanned, Statement, StatementShape};

// Re-export each stage's entry point for convenience.
pub use analyzer::{Analyzer, QueryAnalysis};
pub use batch::{BatchError, BatchRequest};
pub use config::AnalyzerConfig;
pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole};
pub use lexer::token::{Lexeme, TokenCategory, TokenTally};
pub use lexer::{LexObserver, LexResult, Lexer, tokenize};
pub use parser::{ShapeVerdict, match_shape, parse_statement};
pub use report::ValidationReport;
pub use semantic::{Registry, SemanticVerdict, check_names};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_accessible() {
        let _span: Span = 0..5;
        let _spanned = Spanned::new(42, 0..5);
        let tally = tokenize("collection");
        assert_eq!(tally.get(TokenCategory::KeywordCollection), 1);
        assert!(match_shape("x").reason().is_some());
        let mut registry = Registry::default();
        assert!(check_names("", &mut registry).is_valid());
    }
}
