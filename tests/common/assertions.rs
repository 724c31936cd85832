//! Custom assertions for analysis and rendering tests.

use punc::{PunctuationMapping, RunResult};
use std::path::Path;

/// Asserts the count of each listed key.
///
/// # Panics
/// Panics naming the first key whose count differs.
pub fn assert_counts(mapping: &PunctuationMapping, expected: &[(&str, u64)]) {
    for (key, count) in expected {
        assert_eq!(
            mapping.get_str(key),
            Some(*count),
            "count for '{}' should be {}",
            key,
            count
        );
    }
}

/// Asserts every key not listed is zero.
pub fn assert_only_counts(mapping: &PunctuationMapping, expected: &[(&str, u64)]) {
    assert_counts(mapping, expected);
    for (symbol, n) in mapping.nonzero() {
        let key = symbol.to_string();
        assert!(
            expected.iter().any(|(k, _)| *k == key),
            "unexpected count {} for '{}'",
            n,
            key
        );
    }
}

/// Asserts the redacted text holds no ASCII letters or digits.
pub fn assert_fully_redacted(result: &RunResult) {
    assert!(
        !result.spaced.chars().any(|c| c.is_ascii_alphanumeric()),
        "spaced text still contains alphanumerics: {:?}",
        result.spaced
    );
}

/// Asserts a PDF exists, is non-empty and loads with the expected page count.
///
/// # Panics
/// Panics if the document is missing or cannot be parsed.
pub fn assert_valid_pdf(pdf_path: &Path, pages: usize) {
    assert!(
        pdf_path.exists(),
        "PDF should exist at '{}'",
        pdf_path.display()
    );

    let metadata = std::fs::metadata(pdf_path).expect("Failed to get PDF metadata");
    assert!(
        metadata.len() > 0,
        "PDF should not be empty at '{}'",
        pdf_path.display()
    );

    let doc = ::lopdf::Document::load(pdf_path)
        .unwrap_or_else(|e| panic!("Failed to load PDF '{}': {}", pdf_path.display(), e));
    assert_eq!(doc.get_pages().len(), pages, "page count of '{}'", pdf_path.display());
}
