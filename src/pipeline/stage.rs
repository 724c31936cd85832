//! Stage trait and the per-run accumulator threaded through it.

use crate::domain::{PunctuationMapping, Recorded, Symbol};
use crate::error::PuncError;
use crate::options::SentenceMetricMode;
use tracing::warn;

/// A single-pass text transform.
///
/// A stage sees one chunk at a time and never looks across chunk
/// boundaries. Anything it derives from the chunk goes to the
/// [`Accumulator`]; stages themselves hold no run state, so one pipeline can
/// serve many runs at once.
pub trait TransformStage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the chunk handed to the next stage.
    fn transform(&self, chunk: String, acc: &mut Accumulator) -> String;
}

/// Matched punctuation, concatenated in the order it was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunctuationStore {
    text: String,
    entries: usize,
}

impl PunctuationStore {
    pub fn push(&mut self, matched: &str) {
        self.text.push_str(matched);
        self.entries += 1;
    }

    pub fn push_char(&mut self, matched: char) {
        self.text.push(matched);
        self.entries += 1;
    }

    /// Number of matches appended so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Side-channel state of one run.
#[derive(Debug, Clone)]
pub struct Accumulator {
    mapping: PunctuationMapping,
    store: PunctuationStore,
    metric_mode: SentenceMetricMode,
    last_ratio: Option<f64>,
    total_words: u64,
    total_sentences: u64,
    redacted: String,
    chunks: usize,
}

impl Accumulator {
    pub fn new(mapping: PunctuationMapping, metric_mode: SentenceMetricMode) -> Self {
        Self {
            mapping,
            store: PunctuationStore::default(),
            metric_mode,
            last_ratio: None,
            total_words: 0,
            total_sentences: 0,
            redacted: String::new(),
            chunks: 0,
        }
    }

    pub fn mapping(&self) -> &PunctuationMapping {
        &self.mapping
    }

    pub fn store(&self) -> &PunctuationStore {
        &self.store
    }

    /// Chunks that entered the pipeline.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub(crate) fn begin_chunk(&mut self) {
        self.chunks += 1;
    }

    /// Adds `n` to `symbol` and appends `matched` to the store.
    ///
    /// Malformed entries are reset and logged; keys missing from the mapping
    /// are skipped with a warning. Returns whether anything was recorded.
    pub fn record_match(&mut self, symbol: Symbol, n: u64, matched: &[&str]) -> bool {
        match self.mapping.record(&symbol, n) {
            Recorded::Counted => {}
            Recorded::Healed { previous } => {
                let err = PuncError::MalformedMappingEntry {
                    key: symbol.to_string(),
                    value: previous,
                };
                warn!(error = %err, count = n, "resetting malformed count");
            }
            Recorded::Unrecognized => {
                warn!(key = %symbol, "key not found in punctuation map");
                return false;
            }
        }

        for m in matched {
            self.store.push(m);
        }
        true
    }

    /// Single-character variant of [`Accumulator::record_match`].
    pub fn record_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let matched: &str = c.encode_utf8(&mut buf);
        self.record_match(Symbol::Mark(c), 1, &[matched])
    }

    /// Reports one chunk's word and sentence counts.
    pub fn report_sentences(&mut self, words: u64, sentences: u64) {
        self.total_words += words;
        self.total_sentences += sentences;
        self.last_ratio = Some(words as f64 / sentences as f64);
    }

    /// Appends a redacted chunk.
    pub fn report_redacted(&mut self, chunk: &str) {
        self.redacted.push_str(chunk);
    }

    /// Words per sentence as configured.
    ///
    /// Zero when nothing was read or no ratio was reported; `+inf` when words
    /// were seen without any sentence terminator.
    pub fn words_per_sentence(&self) -> f64 {
        if self.chunks == 0 {
            return 0.0;
        }
        match (self.metric_mode, self.last_ratio) {
            (_, None) => 0.0,
            (SentenceMetricMode::LastChunk, Some(ratio)) => ratio,
            (SentenceMetricMode::WholeStream, Some(_)) => {
                self.total_words as f64 / self.total_sentences as f64
            }
        }
    }

    pub(crate) fn into_parts(self) -> (String, PunctuationMapping, f64, String) {
        let ratio = self.words_per_sentence();
        (self.store.into_string(), self.mapping, ratio, self.redacted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fresh_mapping, MappingOverride, Repeat, Tally};

    fn accumulator(mode: SentenceMetricMode) -> Accumulator {
        Accumulator::new(fresh_mapping(), mode)
    }

    #[test]
    fn test_no_chunks_means_zero_ratio() {
        let mut acc = accumulator(SentenceMetricMode::LastChunk);
        acc.report_sentences(3, 0);
        assert_eq!(acc.words_per_sentence(), 0.0);
    }

    #[test]
    fn test_last_chunk_overwrites() {
        let mut acc = accumulator(SentenceMetricMode::LastChunk);
        acc.begin_chunk();
        acc.report_sentences(10, 2);
        acc.begin_chunk();
        acc.report_sentences(3, 1);
        assert_eq!(acc.words_per_sentence(), 3.0);
    }

    #[test]
    fn test_whole_stream_sums() {
        let mut acc = accumulator(SentenceMetricMode::WholeStream);
        acc.begin_chunk();
        acc.report_sentences(10, 2);
        acc.begin_chunk();
        acc.report_sentences(2, 0);
        assert_eq!(acc.words_per_sentence(), 6.0);
    }

    #[test]
    fn test_zero_sentences_is_infinite() {
        let mut acc = accumulator(SentenceMetricMode::LastChunk);
        acc.begin_chunk();
        acc.report_sentences(4, 0);
        assert!(acc.words_per_sentence().is_infinite());
        assert!(acc.words_per_sentence() > 0.0);
    }

    #[test]
    fn test_record_char_appends_to_store() {
        let mut acc = accumulator(SentenceMetricMode::LastChunk);
        assert!(acc.record_char('💙'));
        assert!(!acc.record_char('a'));
        assert_eq!(acc.store().as_str(), "💙");
        assert_eq!(acc.store().entries(), 1);
    }

    #[test]
    fn test_malformed_entry_heals_and_still_stores() {
        let mut mapping = fresh_mapping();
        mapping.apply_overrides(&MappingOverride::new().with("!", Tally::Malformed("NaN".into())));
        let mut acc = Accumulator::new(mapping, SentenceMetricMode::LastChunk);

        assert!(acc.record_char('!'));
        assert!(acc.record_char('!'));
        assert_eq!(acc.mapping().get_str("!"), Some(2));
        assert_eq!(acc.store().as_str(), "!!");
    }

    #[test]
    fn test_malformed_aggregate_resets_to_match_count() {
        let mut mapping = fresh_mapping();
        mapping.apply_overrides(
            &MappingOverride::new().with("!!!", Tally::Malformed("\"lots\"".into())),
        );
        let mut acc = Accumulator::new(mapping, SentenceMetricMode::LastChunk);

        assert!(acc.record_match(Symbol::Repeated(Repeat::Exclamation), 2, &["!!!", "!!!!"]));

        assert_eq!(acc.mapping().get_str("!!!"), Some(2));
        assert_eq!(acc.store().as_str(), "!!!!!!!");
        assert_eq!(acc.store().entries(), 2);
    }
}
