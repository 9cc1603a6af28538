use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::model::{ClauseModel, ModelError};
use crate::models::CategoryLabel;

/// Keyword table scanned top to bottom; the first hit wins, so order resolves
/// overlaps such as "liability" in a termination clause.
const HEURISTIC_RULES: &[(CategoryLabel, &[&str])] = &[
    (CategoryLabel::Termination, &["termination", "terminate"]),
    (CategoryLabel::Confidentiality, &["confidential", "nondisclosure"]),
    (CategoryLabel::Indemnity, &["indemnify", "liability"]),
    (CategoryLabel::GoverningLaw, &["governing law", "jurisdiction"]),
    (CategoryLabel::ForceMajeure, &["force majeure"]),
    (CategoryLabel::PaymentTerms, &["payment"]),
    (CategoryLabel::DisputeResolution, &["dispute", "arbitration"]),
];

/// Keyword classification: first matching rule in priority order, else `Unknown`.
pub fn classify_heuristic(clause: &str) -> CategoryLabel {
    let lower = clause.to_lowercase();
    HEURISTIC_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(label, _)| *label)
        .unwrap_or(CategoryLabel::Unknown)
}

enum Strategy {
    Model {
        model: Arc<dyn ClauseModel>,
        timeout: Duration,
    },
    Heuristic,
}

/// Assigns a [`CategoryLabel`] to each clause.
///
/// A model-backed classifier drops to heuristics for the rest of its life on
/// the first inference failure. The switch is a single compare-and-set, so
/// concurrent first failures flip it exactly once.
pub struct ClauseClassifier {
    strategy: Strategy,
    degraded: AtomicBool,
}

impl ClauseClassifier {
    pub fn heuristic() -> Self {
        Self {
            strategy: Strategy::Heuristic,
            degraded: AtomicBool::new(false),
        }
    }

    pub fn with_model(model: Arc<dyn ClauseModel>, timeout: Duration) -> Self {
        Self {
            strategy: Strategy::Model { model, timeout },
            degraded: AtomicBool::new(false),
        }
    }

    /// True when no model is, or will ever again be, consulted.
    pub fn is_heuristic(&self) -> bool {
        matches!(self.strategy, Strategy::Heuristic) || self.degraded.load(Ordering::Acquire)
    }

    pub async fn classify(&self, clause: &str) -> CategoryLabel {
        if let Strategy::Model { model, timeout } = &self.strategy {
            if !self.degraded.load(Ordering::Acquire) {
                let outcome = match tokio::time::timeout(*timeout, model.predict(clause)).await {
                    Ok(result) => result,
                    Err(_) => Err(ModelError::Timeout(*timeout)),
                };
                match outcome {
                    Ok(index) => {
                        debug!(index, "model classified clause");
                        return CategoryLabel::from_model_index(index);
                    }
                    Err(e) => self.degrade(&e),
                }
            }
        }

        classify_heuristic(clause)
    }

    fn degrade(&self, error: &ModelError) {
        if self
            .degraded
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            warn!(error = %error, "clause model failed, switching to keyword heuristics");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::mock::ScriptedModel;
    use super::*;

    #[test]
    fn test_heuristic_categories() {
        assert_eq!(
            classify_heuristic("This Agreement shall terminate upon breach."),
            CategoryLabel::Termination
        );
        assert_eq!(
            classify_heuristic("Confidential information must not be disclosed."),
            CategoryLabel::Confidentiality
        );
        assert_eq!(
            classify_heuristic("The Supplier shall INDEMNIFY the Buyer."),
            CategoryLabel::Indemnity
        );
        assert_eq!(
            classify_heuristic("Courts of Delaware have exclusive jurisdiction."),
            CategoryLabel::GoverningLaw
        );
        assert_eq!(
            classify_heuristic("Neither party is liable for Force Majeure events."),
            CategoryLabel::ForceMajeure
        );
        assert_eq!(
            classify_heuristic("Payment is due within 30 days."),
            CategoryLabel::PaymentTerms
        );
        assert_eq!(
            classify_heuristic("Any dispute goes to arbitration."),
            CategoryLabel::DisputeResolution
        );
        assert_eq!(
            classify_heuristic("The parties met on a sunny day."),
            CategoryLabel::Unknown
        );
    }

    #[test]
    fn test_heuristic_priority_order() {
        // termination outranks liability
        assert_eq!(
            classify_heuristic("Liability survives termination."),
            CategoryLabel::Termination
        );
        // confidentiality outranks payment
        assert_eq!(
            classify_heuristic("Payment amounts are confidential."),
            CategoryLabel::Confidentiality
        );
        // indemnity outranks dispute resolution
        assert_eq!(
            classify_heuristic("Disputes over liability are settled by arbitration."),
            CategoryLabel::Indemnity
        );
    }

    #[tokio::test]
    async fn test_model_strategy_maps_index() {
        let model = Arc::new(ScriptedModel::predicting(4));
        let classifier = ClauseClassifier::with_model(model.clone(), Duration::from_secs(1));

        assert_eq!(
            classifier.classify("anything at all").await,
            CategoryLabel::ForceMajeure
        );
        assert_eq!(model.call_count(), 1);
        assert!(!classifier.is_heuristic());
    }

    #[tokio::test]
    async fn test_model_out_of_range_index_is_unknown() {
        let classifier =
            ClauseClassifier::with_model(Arc::new(ScriptedModel::predicting(99)), Duration::from_secs(1));
        assert_eq!(
            classifier.classify("Payment is due.").await,
            CategoryLabel::Unknown
        );
    }

    #[tokio::test]
    async fn test_failure_downgrades_once_and_for_all() {
        let model = Arc::new(ScriptedModel::failing());
        let classifier = ClauseClassifier::with_model(model.clone(), Duration::from_secs(1));

        assert_eq!(
            classifier.classify("Payment is due within 30 days.").await,
            CategoryLabel::PaymentTerms
        );
        assert!(classifier.is_heuristic());

        classifier.classify("Any dispute goes to arbitration.").await;
        classifier.classify("Termination on notice.").await;
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_failures() {
        let model = Arc::new(ScriptedModel::failing());
        let classifier = Arc::new(ClauseClassifier::with_model(
            model.clone(),
            Duration::from_secs(1),
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                tokio::spawn(async move { classifier.classify("Termination for convenience.").await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), CategoryLabel::Termination);
        }
        assert!(classifier.is_heuristic());
        assert!(model.call_count() >= 1 && model.call_count() <= 16);

        classifier.classify("Termination.").await;
        let after = model.call_count();
        classifier.classify("Termination.").await;
        assert_eq!(model.call_count(), after);
    }

    #[tokio::test]
    async fn test_heuristic_only_classifier() {
        let classifier = ClauseClassifier::heuristic();
        assert!(classifier.is_heuristic());
        assert_eq!(
            classifier.classify("Nondisclosure obligations apply.").await,
            CategoryLabel::Confidentiality
        );
    }
}
