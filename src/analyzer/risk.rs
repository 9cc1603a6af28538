use tracing::debug;

use crate::config::RiskConfig;
use crate::llm::{CompletionRequest, Llm};
use crate::models::RiskLevel;

/// Keyword-tiered risk scoring with an optional LLM opinion for clauses no
/// keyword covers.
pub struct RiskScorer {
    high: Vec<String>,
    medium: Vec<String>,
    llm: Option<Llm>,
}

impl RiskScorer {
    pub fn new(keywords: &RiskConfig, llm: Option<Llm>) -> Self {
        Self {
            high: lowercase_all(&keywords.high),
            medium: lowercase_all(&keywords.medium),
            llm,
        }
    }

    /// Tiers in strict order: any high keyword ⇒ High, else any medium keyword
    /// ⇒ Medium, else a recognized LLM answer, else Safe.
    pub async fn score(&self, clause: &str) -> RiskLevel {
        if let Some(level) = self.score_keywords(clause) {
            return level;
        }

        if let Some(llm) = &self.llm {
            if let Some(answer) = llm.ask(CompletionRequest::new(risk_prompt(clause))).await {
                match RiskLevel::from_response(&answer) {
                    Some(level) => return level,
                    None => debug!(%answer, "unrecognized risk level from llm"),
                }
            }
        }

        RiskLevel::Safe
    }

    fn score_keywords(&self, clause: &str) -> Option<RiskLevel> {
        let lower = clause.to_lowercase();
        if self.high.iter().any(|kw| lower.contains(kw.as_str())) {
            return Some(RiskLevel::High);
        }
        if self.medium.iter().any(|kw| lower.contains(kw.as_str())) {
            return Some(RiskLevel::Medium);
        }
        None
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn risk_prompt(clause: &str) -> String {
    format!(
        "Rate the following legal clause as one of: Safe, Medium Risk, or High Risk.\n\n\
         Clause: {clause}\n\n\
         Respond with only one of the following:\n\
         - Safe\n- Medium Risk\n- High Risk"
    )
}
