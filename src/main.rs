use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use docquery_analyzer::cli::Args;

fn main() {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match docquery_analyzer::cli::run(&args) {
        Ok(code) => process::exit(code),
        Err(report) => {
            eprintln!("{report:?}");
            process::exit(2);
        }
    }
}
