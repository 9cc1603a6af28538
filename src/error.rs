use thiserror::Error;

/// Document-level failures. Analyzer degradation never shows up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("document {name} has no clause text to analyze")]
    EmptyDocument { name: String },

    #[error("clause analysis task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
