//! Runs the three stages over queries and batches.
//!
//! Tokenizing and shape matching hold no state and may run on any thread.
//! Name checking mutates the registry, so it always runs on the calling
//! thread, one query at a time, in submission order.

use crate::ast::Statement;
use crate::config::AnalyzerConfig;
use crate::diag::Diag;
use crate::lexer::{self, LexResult};
use crate::parser::{self, INVALID_STRUCTURE, ShapeVerdict};
use crate::report::ValidationReport;
use crate::semantic::{self, Registry};
use rayon::prelude::*;

/// Everything produced for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    /// The report returned to callers.
    pub report: ValidationReport,
    /// Captured pieces when the query matched a shape.
    pub statement: Option<Statement>,
    /// Lexer, shape, and name diagnostics, in that order.
    pub diagnostics: Vec<Diag>,
}

/// Owns a registry and analyzes queries against it.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    registry: Registry,
}

impl Analyzer {
    /// Creates an analyzer with a fresh registry seeded from `config`.
    pub fn new(config: AnalyzerConfig) -> Self {
        let registry = Registry::new(&config);
        Self { config, registry }
    }

    /// The configuration this analyzer was built with.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The registry as it stands after every query analyzed so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Analyzes one query.
    pub fn analyze(&mut self, query: &str) -> ValidationReport {
        self.analyze_detailed(query).report
    }

    /// Analyzes one query, keeping the statement and diagnostics.
    pub fn analyze_detailed(&mut self, query: &str) -> QueryAnalysis {
        let front = FrontStages::run(query);
        self.finish(query, front)
    }

    /// Analyzes a batch, returning reports in input order.
    pub fn analyze_batch<S>(&mut self, queries: &[S]) -> Vec<ValidationReport>
    where
        S: AsRef<str> + Sync,
    {
        self.analyze_batch_detailed(queries)
            .into_iter()
            .map(|analysis| analysis.report)
            .collect()
    }

    /// Analyzes a batch, keeping statements and diagnostics.
    pub fn analyze_batch_detailed<S>(&mut self, queries: &[S]) -> Vec<QueryAnalysis>
    where
        S: AsRef<str> + Sync,
    {
        tracing::debug!(
            queries = queries.len(),
            parallel = self.config.parallel,
            "analyzing batch"
        );

        let fronts: Vec<FrontStages> = if self.config.parallel {
            queries
                .par_iter()
                .map(|query| FrontStages::run(query.as_ref()))
                .collect()
        } else {
            queries
                .iter()
                .map(|query| FrontStages::run(query.as_ref()))
                .collect()
        };

        let analyses: Vec<QueryAnalysis> = queries
            .iter()
            .zip(fronts)
            .map(|(query, front)| self.finish(query.as_ref(), front))
            .collect();

        tracing::debug!(
            valid = analyses.iter().filter(|a| a.report.valid).count(),
            collections = self.registry.collection_count(),
            "batch analyzed"
        );

        analyses
    }

    /// Runs name checking and assembles the report.
    fn finish(&mut self, query: &str, front: FrontStages) -> QueryAnalysis {
        let names = semantic::check_names_detailed(query, &mut self.registry);

        let shape = match &front.statement {
            Some(statement) => ShapeVerdict::Valid(statement.shape),
            None => ShapeVerdict::Invalid(INVALID_STRUCTURE.to_string()),
        };

        let mut diagnostics = front.lex.diagnostics;
        diagnostics.extend(shape.to_diag(0..query.len()));
        diagnostics.extend(names.diagnostics);

        let report = ValidationReport::build(front.lex.tally, &shape, &names.verdict);
        tracing::trace!(valid = report.valid, "query analyzed");

        QueryAnalysis {
            report,
            statement: front.statement,
            diagnostics,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

/// Output of the stateless stages.
struct FrontStages {
    lex: LexResult,
    statement: Option<Statement>,
}

impl FrontStages {
    fn run(query: &str) -> Self {
        Self {
            lex: lexer::scan(query),
            statement: parser::parse_statement(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenCategory;

    #[test]
    fn single_query_report() {
        let mut analyzer = Analyzer::default();
        let report = analyzer.analyze("collection('mi_coleccion').add({\"nombre\": \"ana\"});");
        assert!(report.valid);
        assert_eq!(report.lexical.get(TokenCategory::KeywordCollection), 1);
    }

    #[test]
    fn batch_preserves_order_and_learns() {
        let mut analyzer = Analyzer::default();
        let reports = analyzer.analyze_batch(&[
            "collection('nueva').add({\"id\": \"1\"});",
            "DROP TABLE users;",
            "collection('nueva').add({\"id\": \"2\"});",
        ]);
        assert_eq!(reports.len(), 3);
        assert!(!reports[0].valid);
        assert!(!reports[1].valid);
        assert!(reports[2].valid);
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let queries = vec![
            "collection('a').add({\"id\": 1});".to_string(),
            "collection('a').document('b').delete();".to_string(),
            "collection('b').document('c').set({\"x\": 1});".to_string(),
            "nonsense".to_string(),
        ];
        let mut parallel = Analyzer::new(AnalyzerConfig::default().with_parallel(true));
        let mut sequential = Analyzer::new(AnalyzerConfig::default().with_parallel(false));
        assert_eq!(
            parallel.analyze_batch(&queries),
            sequential.analyze_batch(&queries)
        );
        assert_eq!(parallel.registry(), sequential.registry());
    }

    #[test]
    fn detailed_collects_diagnostics_in_stage_order() {
        let mut analyzer = Analyzer::default();
        let analysis = analyzer.analyze_detailed("collection('x') # {\"zz\": 1}");
        let codes: Vec<_> = analysis
            .diagnostics
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect();
        let lexical = codes.iter().take_while(|&&c| c == "L001").count();
        assert_eq!(lexical, 8);
        assert_eq!(&codes[lexical..], &["P001", "S001", "S002"]);
        assert!(analysis.statement.is_none());
    }

    #[test]
    fn detailed_keeps_statement() {
        let mut analyzer = Analyzer::default();
        let analysis = analyzer.analyze_detailed("collection('mi_coleccion').document('d').delete();");
        let statement = analysis.statement.unwrap();
        assert_eq!(statement.document.as_deref(), Some("d"));
        assert!(analysis.diagnostics.iter().all(|d| d.code.as_deref() == Some("L001")));
    }
}
