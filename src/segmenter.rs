use anyhow::Result;
use regex::Regex;

/// Splits document text into clauses at numbered-list headers (`\n1. `, `\n2. `, …).
pub struct Segmenter {
    boundary: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            boundary: Regex::new(r"\n\d+\.\s")?,
        })
    }

    /// Return the trimmed, non-empty fragments between clause boundaries.
    ///
    /// Text without any boundary comes back as a single clause; blank text
    /// yields an empty vector.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.boundary
            .split(text)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
            .collect()
    }
}
