//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! - [`analyze_fresh`] - Analyze one query against a freshly seeded analyzer
//! - [`assert_valid`] - Assert that a report is fully valid
//! - [`assert_reasons`] - Assert the exact semantic reasons of a report
//! - [`format_diags`] - Format diagnostics for assertion messages

#![allow(dead_code)]

use docquery_analyzer::{Analyzer, Diag, ValidationReport};

/// Collection every default registry starts with.
pub const SEED: &str = "mi_coleccion";

/// Analyze a single query with a new default analyzer.
pub fn analyze_fresh(query: &str) -> ValidationReport {
    Analyzer::default().analyze(query)
}

/// Assert that a report is valid in every respect.
///
/// # Panics
/// Panics with the full report when any part is invalid.
pub fn assert_valid(report: &ValidationReport, query: &str) {
    assert!(
        report.valid && report.error.is_empty(),
        "expected `{query}` to be valid, got {report:#?}"
    );
}

/// Assert that the semantic verdict is exactly `reasons`, space-joined.
///
/// # Panics
/// Panics if the semantic display string differs.
pub fn assert_reasons(report: &ValidationReport, reasons: &[String]) {
    assert_eq!(report.semantic, reasons.join(" "), "full report: {report:#?}");
}

/// Format diagnostics for display in assertion messages.
pub fn format_diags(diags: &[Diag]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reason text for an unknown collection.
pub fn missing_collection(name: &str) -> String {
    format!("Collection '{name}' does not exist.")
}

/// Reason text for an unknown field.
pub fn missing_field(name: &str) -> String {
    format!("Field '{name}' does not exist in the declared collections.")
}
