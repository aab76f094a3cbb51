//! Command-line front end: read a batch, analyze it, print the reports.

use crate::analyzer::{Analyzer, QueryAnalysis};
use crate::batch::BatchRequest;
use crate::config::AnalyzerConfig;
use crate::diag::{self, QuerySource};
use crate::report::ValidationReport;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, WrapErr};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docquery", version, about = "Validate document-database method-chain queries")]
pub struct Args {
    /// Input file; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Treat each non-empty line as a query instead of a JSON batch request
    #[arg(long)]
    pub lines: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Collection known before the first query (repeatable; replaces the default seed)
    #[arg(long = "seed-collection", value_name = "NAME")]
    pub seed_collections: Vec<String>,

    /// Known field name (repeatable; replaces the default fields)
    #[arg(long = "field", value_name = "NAME")]
    pub fields: Vec<String>,

    /// Run every stage on the calling thread
    #[arg(long)]
    pub sequential: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JSON array of reports
    Json,
    /// One readable block per query, with rendered diagnostics
    Text,
}

impl Args {
    /// Builds the analyzer configuration the flags describe.
    pub fn config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default().with_parallel(!self.sequential);
        if !self.seed_collections.is_empty() {
            config = config.with_seed_collections(self.seed_collections.iter().map(String::as_str));
        }
        if !self.fields.is_empty() {
            config = config.with_known_fields(self.fields.iter().map(String::as_str));
        }
        config
    }

    /// Default log filter for the verbosity level; `RUST_LOG` overrides it.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Runs the CLI and returns the process exit code.
///
/// 0 when every query is valid, 1 when any is not. Request-level errors
/// are returned as `Err`.
pub fn run(args: &Args) -> miette::Result<i32> {
    let input = read_input(args)?;
    let stdout = io::stdout();
    run_with(args, &input, &mut stdout.lock())
}

/// Analyzes `input` as [`run`] does, writing the output to `out`.
pub fn run_with(args: &Args, input: &str, out: &mut impl Write) -> miette::Result<i32> {
    let request = if args.lines {
        BatchRequest::from_lines(input)
    } else {
        BatchRequest::from_json(input)?
    };
    tracing::info!(queries = request.len(), "request loaded");

    let mut analyzer = Analyzer::new(args.config());
    let analyses = analyzer.analyze_batch_detailed(&request.queries);

    match args.format {
        Format::Json => write_json(out, &analyses)?,
        Format::Text => write_text(out, &request, &analyses)?,
    }

    let all_valid = analyses.iter().all(|a| a.report.valid);
    Ok(if all_valid { 0 } else { 1 })
}

fn read_input(args: &Args) -> miette::Result<String> {
    match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_json(out: &mut impl Write, analyses: &[QueryAnalysis]) -> miette::Result<()> {
    let reports: Vec<&ValidationReport> = analyses.iter().map(|a| &a.report).collect();
    serde_json::to_writer_pretty(&mut *out, &reports).into_diagnostic()?;
    writeln!(out).into_diagnostic()
}

fn write_text(
    out: &mut impl Write,
    request: &BatchRequest,
    analyses: &[QueryAnalysis],
) -> miette::Result<()> {
    for (index, (query, analysis)) in request.queries.iter().zip(analyses).enumerate() {
        let source = QuerySource::numbered(query.as_str(), index);
        let report = &analysis.report;
        let verdict = if report.valid { "valid" } else { "invalid" };

        writeln!(out, "{}: {verdict}", source.label()).into_diagnostic()?;
        writeln!(out, "  query:     {query}").into_diagnostic()?;
        let counts = report
            .lexical
            .iter()
            .map(|(category, count)| format!("{category}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "  lexical:   {counts}").into_diagnostic()?;
        writeln!(out, "  syntactic: {}", report.syntactic).into_diagnostic()?;
        writeln!(out, "  semantic:  {}", report.semantic).into_diagnostic()?;

        for rendered in diag::to_reports(&analysis.diagnostics, &source) {
            writeln!(out, "{rendered:?}").into_diagnostic()?;
        }
        writeln!(out).into_diagnostic()?;
    }
    Ok(())
}
