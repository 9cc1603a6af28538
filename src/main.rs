//! `clause-checkr` — break a legal document into clauses and analyze each one.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Build the LLM handle ([`llm`]) if enabled and the analyzers ([`analyzer`]).
//! 4. Load the document(s) ([`loader`]).
//! 5. Run the pipeline ([`pipeline`]) or compare two documents ([`compare`]).
//! 6. Print the result as JSON or as a summary line per document.

mod analyzer;
mod checklist;
mod cli;
mod compare;
mod config;
mod error;
mod llm;
mod loader;
mod models;
mod pipeline;
mod segmenter;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cli::{Cli, OutputFormat};
use config::{load_config, Config};
use llm::openai::OpenAiClient;
use llm::Llm;
use loader::load_document;
use models::{DocumentResult, RiskLevel};
use pipeline::ClausePipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let llm = build_llm(&config);
    let pipeline = ClausePipeline::from_config(&config, llm)?;

    let max_bytes = config.analysis.max_document_bytes;
    let doc1 = load_document(&cli.document, max_bytes)?;
    let doc2 = cli
        .compare
        .as_deref()
        .map(|path| load_document(path, max_bytes))
        .transpose()?;

    let spinner = (!cli.quiet).then(|| spinner("Analyzing clauses..."));

    match doc2 {
        Some(doc2) => {
            let result = compare::compare(&pipeline, &doc1, &doc2)
                .await
                .with_context(|| format!("Comparison of {} and {} failed", doc1.name, doc2.name))?;
            finish(spinner);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Summary => {
                    print_summary(&result.doc1_name, &result.doc1);
                    print_summary(&result.doc2_name, &result.doc2);
                    println!(
                        "Unique clauses: {} {}  {} {}",
                        result.doc1_name,
                        result.unique_doc1.len().to_string().cyan(),
                        result.doc2_name,
                        result.unique_doc2.len().to_string().cyan(),
                    );
                }
            }
        }
        None => {
            let (result, _) = pipeline
                .run(&doc1)
                .await
                .with_context(|| format!("Analysis of {} failed", doc1.name))?;
            finish(spinner);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Summary => print_summary(&doc1.name, &result),
            }
        }
    }

    Ok(())
}

/// Log to stderr; stdout is reserved for results. `RUST_LOG` directives win.
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.llm {
        config.llm.enabled = true;
    }
    if let Some(endpoint) = &cli.model_endpoint {
        config.model.endpoint = Some(endpoint.clone());
    }
    if let Some(workers) = cli.workers {
        config.analysis.workers = workers;
    }
}

/// An unusable LLM is not fatal: analyzers run on heuristics instead.
fn build_llm(config: &Config) -> Option<Llm> {
    if !config.llm.enabled {
        return None;
    }

    match OpenAiClient::from_config(&config.llm) {
        Ok(client) => {
            info!(model = %config.llm.model, "llm enabled");
            Some(Llm::from_config(Arc::new(client), &config.llm))
        }
        Err(e) => {
            warn!(error = %e, "llm unavailable, using heuristics only");
            None
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn finish(spinner: Option<ProgressBar>) {
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
}

fn print_summary(name: &str, result: &DocumentResult) {
    let summary = &result.summary;
    let missing = if summary.missing_clauses.is_empty() {
        "none".green().to_string()
    } else {
        summary.missing_clauses.join(", ").yellow().to_string()
    };

    println!(
        "{}  Clauses: {}  Obligations: {}  Risk: {}  Missing: {}",
        name.bold(),
        summary.total_clauses,
        summary.total_obligations,
        risk_breakdown(result),
        missing,
    );
}

/// Clause count per risk level, highest first: `High 1 / Medium 0 / Safe 2`.
fn risk_breakdown(result: &DocumentResult) -> String {
    [RiskLevel::High, RiskLevel::Medium, RiskLevel::Safe]
        .into_iter()
        .map(|level| {
            let count = result.details.iter().filter(|d| d.risk == level).count();
            format!("{level} {count}")
        })
        .collect::<Vec<_>>()
        .join(" / ")
}
