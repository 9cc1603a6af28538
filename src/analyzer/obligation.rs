use anyhow::Result;
use regex::{Regex, RegexBuilder};

use crate::llm::{CompletionRequest, Llm};
use crate::models::Obligation;

/// Duty verbs in match order. Each pattern runs from the verb to the next period.
const DUTY_PATTERNS: &[&str] = &[
    r"\bshall\b[^.]*\.",
    r"\bmust\b[^.]*\.",
    r"\bagrees to\b[^.]*\.",
    r"\bis required to\b[^.]*\.",
    r"\bis obligated to\b[^.]*\.",
    r"\bwill\b[^.]*\.",
];

pub struct ObligationExtractor {
    patterns: Vec<Regex>,
    llm: Option<Llm>,
}

impl ObligationExtractor {
    pub fn new(llm: Option<Llm>) -> Result<Self> {
        let patterns = DUTY_PATTERNS
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns, llm })
    }

    /// Pattern matches grouped by pattern order, then by position in the clause.
    ///
    /// Deterministic; the same clause always yields the same obligations.
    pub fn extract_patterns(&self, clause: &str) -> Vec<Obligation> {
        self.patterns
            .iter()
            .flat_map(|re| re.find_iter(clause))
            .map(|m| Obligation(m.as_str().to_string()))
            .collect()
    }

    /// Pattern matches, or, when there are none and a fallback is configured,
    /// a single LLM-written obligation.
    pub async fn extract(&self, clause: &str) -> Vec<Obligation> {
        let mut obligations = self.extract_patterns(clause);

        if obligations.is_empty() {
            if let Some(llm) = &self.llm {
                let prompt = format!(
                    "Extract all obligations (duties, responsibilities) from the following clause:\n\n{clause}"
                );
                if let Some(answer) = llm.ask(CompletionRequest::new(prompt)).await {
                    obligations.push(Obligation(answer));
                }
            }
        }

        obligations
    }
}
