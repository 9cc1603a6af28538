use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use anyhow::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::analyzer::classifier::ClauseClassifier;
use crate::analyzer::model::{ClauseModel, HttpModel};
use crate::analyzer::obligation::ObligationExtractor;
use crate::analyzer::risk::RiskScorer;
use crate::analyzer::summarizer::Summarizer;
use crate::analyzer::ClauseAnalyzers;
use crate::checklist::detect_missing;
use crate::config::Config;
use crate::error::PipelineError;
use crate::llm::Llm;
use crate::models::{Clause, ClauseAnalysis, Document, DocumentResult, DocumentSummary, Obligation};
use crate::segmenter::Segmenter;

/// Spawned clause task that is aborted when dropped unfinished.
///
/// A failed task ends the collect early; dropping the stream then cancels
/// every clause still in flight.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Segments a document and runs every analyzer over every clause.
pub struct ClausePipeline {
    segmenter: Segmenter,
    analyzers: Arc<ClauseAnalyzers>,
    workers: usize,
}

impl ClausePipeline {
    pub fn new(analyzers: ClauseAnalyzers, workers: usize) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new()?,
            analyzers: Arc::new(analyzers),
            workers: workers.max(1),
        })
    }

    /// Wire the analyzers from config.
    ///
    /// `llm` is the shared text-generation handle, if one could be built; each
    /// analyzer only receives it when its switch in `[llm]` is on.
    pub fn from_config(config: &Config, llm: Option<Llm>) -> Result<Self> {
        let switch = |enabled: bool| if enabled { llm.clone() } else { None };

        let classifier = match &config.model.endpoint {
            Some(endpoint) => {
                let timeout = Duration::from_secs(config.model.timeout_secs);
                match HttpModel::new(endpoint.as_str(), timeout) {
                    Ok(model) => {
                        let model: Arc<dyn ClauseModel> = Arc::new(model);
                        ClauseClassifier::with_model(model, timeout)
                    }
                    Err(e) => {
                        warn!(error = %e, "clause model unavailable, using keyword heuristics");
                        ClauseClassifier::heuristic()
                    }
                }
            }
            None => ClauseClassifier::heuristic(),
        };

        debug!(heuristic = classifier.is_heuristic(), "clause classifier ready");

        let analyzers = ClauseAnalyzers {
            classifier,
            risk: RiskScorer::new(&config.risk, switch(config.llm.risk_fallback)),
            obligations: ObligationExtractor::new(switch(config.llm.obligation_fallback))?,
            summarizer: Summarizer::new(switch(config.llm.summaries)),
        };

        Self::new(analyzers, config.analysis.workers)
    }

    /// Analyze `document`, returning the consolidated result and the raw clause
    /// texts in document order.
    ///
    /// Clauses are analyzed concurrently, at most `workers` at a time; the
    /// output keeps clause order regardless of completion order.
    pub async fn run(
        &self,
        document: &Document,
    ) -> Result<(DocumentResult, Vec<String>), PipelineError> {
        let clauses = self.segmenter.segment(&document.text);
        if clauses.is_empty() {
            return Err(PipelineError::EmptyDocument {
                name: document.name.clone(),
            });
        }

        info!(document = %document.name, clauses = clauses.len(), "analyzing document");

        let details: Vec<ClauseAnalysis> = stream::iter(clauses.iter().cloned().enumerate())
            .map(|(position, text)| {
                let analyzers = Arc::clone(&self.analyzers);
                AbortOnDrop(tokio::spawn(async move {
                    debug!(position, "analyzing clause");
                    analyzers.analyze(Clause { position, text }).await
                }))
            })
            .buffered(self.workers)
            .try_collect()
            .await?;

        let missing = detect_missing(&clauses);
        let obligations: Vec<Obligation> = details
            .iter()
            .flat_map(|d| d.obligations.iter().cloned())
            .collect();

        let result = consolidate(details, missing, &obligations);
        info!(
            document = %document.name,
            obligations = result.summary.total_obligations,
            missing = result.summary.missing_clauses.len(),
            "document analyzed"
        );

        Ok((result, clauses))
    }
}

/// Assemble the per-document result. Counting only.
pub fn consolidate(
    details: Vec<ClauseAnalysis>,
    missing: Vec<String>,
    obligations: &[Obligation],
) -> DocumentResult {
    DocumentResult {
        summary: DocumentSummary {
            total_clauses: details.len(),
            total_obligations: obligations.len(),
            missing_clauses: missing,
        },
        details,
    }
}
