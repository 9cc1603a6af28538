/// Clause categories a complete agreement is expected to cover, with the
/// surface forms that count as mentioning each one. The name itself is always
/// the first form.
const REQUIRED_CLAUSES: &[(&str, &[&str])] = &[
    ("confidentiality", &["confidentiality", "confidential"]),
    ("termination", &["termination", "terminate"]),
    ("governing law", &["governing law"]),
    ("indemnity", &["indemnity"]),
    ("force majeure", &["force majeure"]),
    ("dispute resolution", &["dispute resolution"]),
    ("payment terms", &["payment terms"]),
    ("intellectual property", &["intellectual property"]),
];

/// Required categories not mentioned in any clause text, sorted.
///
/// Matches against the raw clause text, not the classifier's label.
pub fn detect_missing<S: AsRef<str>>(clauses: &[S]) -> Vec<String> {
    let lowered: Vec<String> = clauses.iter().map(|c| c.as_ref().to_lowercase()).collect();

    let mut missing: Vec<String> = REQUIRED_CLAUSES
        .iter()
        .filter(|(_, forms)| {
            !lowered
                .iter()
                .any(|clause| forms.iter().any(|form| clause.contains(form)))
        })
        .map(|(name, _)| name.to_string())
        .collect();

    missing.sort();
    missing
}
