use crate::llm::{CompletionRequest, Llm};

/// Returned for blank clauses.
pub const EMPTY_SUMMARY: &str = "No content provided.";

/// First-sentence summary: the trimmed text up to the first period, with the
/// period put back.
pub fn heuristic_summary(clause: &str) -> String {
    let first = clause.trim().split('.').next().unwrap_or_default();
    if first.is_empty() || first.ends_with('.') {
        first.to_string()
    } else {
        format!("{first}.")
    }
}

pub struct Summarizer {
    llm: Option<Llm>,
}

impl Summarizer {
    pub fn new(llm: Option<Llm>) -> Self {
        Self { llm }
    }

    pub async fn summarize(&self, clause: &str) -> String {
        if clause.trim().is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        if let Some(llm) = &self.llm {
            let request = CompletionRequest::new(format!(
                "Summarize the following clause in one sentence:\n\n{clause}"
            ))
            .with_system("You are a legal expert.")
            .with_max_tokens(100);

            if let Some(summary) = llm.ask(request).await {
                return summary;
            }
        }

        heuristic_summary(clause)
    }
}
