use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "clause-checkr",
    about = "Segment legal documents into clauses, score risk, extract obligations and flag missing clauses",
    version
)]
pub struct Cli {
    /// Plain-text document to analyze
    pub document: PathBuf,

    /// Second document; analyzes both and reports clauses unique to each
    #[arg(long, value_name = "DOCUMENT")]
    pub compare: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Config file [default: ./.clause-checkr/config.toml, fallback ~/.config/clause-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable LLM-backed summaries and fallbacks (API key read from the configured env var)
    #[arg(long)]
    pub llm: bool,

    /// Clause classification inference endpoint
    #[arg(long, value_name = "URL")]
    pub model_endpoint: Option<String>,

    /// Maximum number of clauses analyzed concurrently
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// No progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["clause-checkr", "msa.txt"]).unwrap();
        assert_eq!(cli.document, PathBuf::from("msa.txt"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.compare.is_none());
        assert!(!cli.llm);
    }

    #[test]
    fn test_compare_and_overrides() {
        let cli = Cli::try_parse_from([
            "clause-checkr",
            "a.txt",
            "--compare",
            "b.txt",
            "--format",
            "summary",
            "--llm",
            "--workers",
            "2",
            "--model-endpoint",
            "http://127.0.0.1:8080/predict",
        ])
        .unwrap();
        assert_eq!(cli.compare, Some(PathBuf::from("b.txt")));
        assert_eq!(cli.format, OutputFormat::Summary);
        assert!(cli.llm);
        assert_eq!(cli.workers, Some(2));
        assert_eq!(
            cli.model_endpoint.as_deref(),
            Some("http://127.0.0.1:8080/predict")
        );
    }

    #[test]
    fn test_document_is_required() {
        assert!(Cli::try_parse_from(["clause-checkr"]).is_err());
    }
}
