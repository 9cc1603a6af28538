//! Per-clause analyzers. Each one pairs a primary strategy (model or LLM) with
//! a deterministic fallback and never returns an error.
//!
//! - [`classifier`] — category label; model with one-way keyword downgrade.
//! - [`risk`] — keyword tiers, optional LLM opinion.
//! - [`obligation`] — duty-verb patterns, optional LLM fallback.
//! - [`summarizer`] — LLM one-liner, first-sentence fallback.
//! - [`model`] — classification model collaborator.

use tracing::debug;

use crate::models::{Clause, ClauseAnalysis};

pub mod classifier;
pub mod model;
pub mod obligation;
pub mod risk;
pub mod summarizer;

use classifier::ClauseClassifier;
use obligation::ObligationExtractor;
use risk::RiskScorer;
use summarizer::Summarizer;

/// The four analyzers run over every clause. Shared read-only across tasks.
pub struct ClauseAnalyzers {
    pub classifier: ClauseClassifier,
    pub risk: RiskScorer,
    pub obligations: ObligationExtractor,
    pub summarizer: Summarizer,
}

impl ClauseAnalyzers {
    /// Run every analyzer on one clause. Each depends only on the clause text.
    pub async fn analyze(&self, clause: Clause) -> ClauseAnalysis {
        let (category, summary, risk, obligations) = tokio::join!(
            self.classifier.classify(&clause.text),
            self.summarizer.summarize(&clause.text),
            self.risk.score(&clause.text),
            self.obligations.extract(&clause.text),
        );

        debug!(
            position = clause.position,
            category = %category,
            risk = %risk,
            obligations = obligations.len(),
            "clause analyzed"
        );

        ClauseAnalysis {
            position: clause.position,
            clause: clause.text,
            category,
            risk,
            obligations,
            summary,
        }
    }
}
