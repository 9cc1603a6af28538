use serde::{Deserialize, Serialize};

/// A document handed to the pipeline: its display name plus the extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One segmented unit of a document, with its zero-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub position: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryLabel {
    Termination,
    Confidentiality,
    Indemnity,
    GoverningLaw,
    ForceMajeure,
    PaymentTerms,
    DisputeResolution,
    IntellectualProperty,
    Unknown,
}

impl CategoryLabel {
    /// Output index → label table shared with the classification model.
    pub const MODEL_LABELS: [CategoryLabel; 8] = [
        CategoryLabel::Termination,
        CategoryLabel::Confidentiality,
        CategoryLabel::Indemnity,
        CategoryLabel::GoverningLaw,
        CategoryLabel::ForceMajeure,
        CategoryLabel::PaymentTerms,
        CategoryLabel::DisputeResolution,
        CategoryLabel::IntellectualProperty,
    ];

    /// Map a model output index to a label; indices outside the table are `Unknown`.
    pub fn from_model_index(index: usize) -> Self {
        Self::MODEL_LABELS
            .get(index)
            .copied()
            .unwrap_or(CategoryLabel::Unknown)
    }
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryLabel::Termination => write!(f, "termination"),
            CategoryLabel::Confidentiality => write!(f, "confidentiality"),
            CategoryLabel::Indemnity => write!(f, "indemnity"),
            CategoryLabel::GoverningLaw => write!(f, "governing-law"),
            CategoryLabel::ForceMajeure => write!(f, "force-majeure"),
            CategoryLabel::PaymentTerms => write!(f, "payment-terms"),
            CategoryLabel::DisputeResolution => write!(f, "dispute-resolution"),
            CategoryLabel::IntellectualProperty => write!(f, "intellectual-property"),
            CategoryLabel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ordered risk scale: `Safe < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Medium,
    High,
}

impl RiskLevel {
    /// Recognize a level in free-form model output such as `"⚠️ Medium Risk"`.
    ///
    /// Leading bullets, emoji and punctuation are ignored; anything other than
    /// `safe`, `medium`, `medium risk`, `high` or `high risk` is rejected.
    pub fn from_response(response: &str) -> Option<Self> {
        let cleaned = response
            .trim()
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim_end_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        match cleaned.as_str() {
            "safe" => Some(RiskLevel::Safe),
            "medium" | "medium risk" => Some(RiskLevel::Medium),
            "high" | "high risk" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "Safe"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// A single duty statement pulled out of a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Obligation(pub String);

impl Obligation {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    pub position: usize,
    pub clause: String,
    #[serde(rename = "type")]
    pub category: CategoryLabel,
    pub risk: RiskLevel,
    pub obligations: Vec<Obligation>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub total_clauses: usize,
    pub total_obligations: usize,
    pub missing_clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub summary: DocumentSummary,
    pub details: Vec<ClauseAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub doc1_name: String,
    pub doc2_name: String,
    pub doc1: DocumentResult,
    pub doc2: DocumentResult,
    pub unique_doc1: Vec<String>,
    pub unique_doc2: Vec<String>,
}
