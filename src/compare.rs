use std::collections::BTreeSet;

use tracing::info;

use crate::error::PipelineError;
use crate::models::{ComparisonResult, Document};
use crate::pipeline::ClausePipeline;

/// Analyze both documents concurrently and diff their clause texts.
///
/// The diff is lexical: reworded clauses with the same meaning show up as
/// unique on both sides.
pub async fn compare(
    pipeline: &ClausePipeline,
    doc1: &Document,
    doc2: &Document,
) -> Result<ComparisonResult, PipelineError> {
    let ((result1, clauses1), (result2, clauses2)) =
        tokio::try_join!(pipeline.run(doc1), pipeline.run(doc2))?;

    let (unique_doc1, unique_doc2) = clause_difference(&clauses1, &clauses2);
    info!(
        doc1 = %doc1.name,
        doc2 = %doc2.name,
        unique_doc1 = unique_doc1.len(),
        unique_doc2 = unique_doc2.len(),
        "documents compared"
    );

    Ok(ComparisonResult {
        doc1_name: doc1.name.clone(),
        doc2_name: doc2.name.clone(),
        doc1: result1,
        doc2: result2,
        unique_doc1,
        unique_doc2,
    })
}

/// Trimmed clause texts present on one side only, as sorted, deduplicated lists.
pub fn clause_difference(clauses1: &[String], clauses2: &[String]) -> (Vec<String>, Vec<String>) {
    let set1: BTreeSet<&str> = clauses1.iter().map(|c| c.trim()).collect();
    let set2: BTreeSet<&str> = clauses2.iter().map(|c| c.trim()).collect();

    let only = |a: &BTreeSet<&str>, b: &BTreeSet<&str>| -> Vec<String> {
        a.difference(b).map(|c| c.to_string()).collect()
    };

    (only(&set1, &set2), only(&set2, &set1))
}
