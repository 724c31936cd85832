//! Streaming analysis pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`TransformStage`]s. Running it pulls
//! one chunk at a time from a [`TextChunks`] source, passes it through every
//! stage, and only then reads the next chunk. All run state lives in an
//! [`Accumulator`] owned by that run, so a pipeline can be shared freely
//! between threads.

pub mod source;
pub mod stage;
pub mod stages;

pub use source::TextChunks;
pub use stage::{Accumulator, PunctuationStore, TransformStage};
pub use stages::{
    collapse_whitespace, redact_alphanumeric, strip_line_endings, PunctuationCounter,
    SentenceMetric, Substitute,
};

use crate::domain::PunctuationMapping;
use crate::error::PuncResult;
use crate::options::{self, Options, RunConfiguration};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, debug_span, trace};

/// Outcome of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Every match, aggregates first within each chunk
    pub body: String,
    pub count: PunctuationMapping,
    /// `0` for empty input, `+inf` when no sentence terminator was seen
    pub words_per_sentence: f64,
    /// The text with alphanumeric runs replaced by spaces
    pub spaced: String,
}

/// Ordered composition of transform stages.
pub struct Pipeline {
    stages: Vec<Box<dyn TransformStage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn TransformStage>>) -> Self {
        Self { stages }
    }

    /// The five-stage analysis pipeline: strip line endings, collapse
    /// whitespace, count punctuation, measure sentences, redact.
    pub fn analysis() -> Self {
        Self::new(vec![
            Box::new(Substitute::line_endings()),
            Box::new(Substitute::whitespace()),
            Box::new(PunctuationCounter),
            Box::new(SentenceMetric),
            Box::new(Substitute::alphanumeric()),
        ])
    }

    /// Redaction alone; line structure is kept.
    pub fn redaction() -> Self {
        Self::new(vec![Box::new(Substitute::alphanumeric())])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs over pre-split chunks.
    ///
    /// The first `Err` aborts the run; no partial result is returned.
    pub fn run_chunks<I>(&self, chunks: I, config: RunConfiguration) -> PuncResult<RunResult>
    where
        I: IntoIterator<Item = PuncResult<String>>,
    {
        let mut acc = Accumulator::new(config.mapping, config.sentence_metric);

        for chunk in chunks {
            let mut chunk = chunk?;
            acc.begin_chunk();
            trace!(chunk = acc.chunks(), bytes = chunk.len(), "processing chunk");

            for stage in &self.stages {
                chunk = stage.transform(chunk, &mut acc);
            }
        }

        let chunks = acc.chunks();
        let (body, count, words_per_sentence, spaced) = acc.into_parts();
        debug!(chunks, matches = body.chars().count(), "pipeline finished");

        Ok(RunResult {
            body,
            count,
            words_per_sentence,
            spaced,
        })
    }

    /// Runs over any reader, decoded with the configured encoding.
    pub fn run_reader<R: Read>(&self, reader: R, config: RunConfiguration) -> PuncResult<RunResult> {
        let chunks = TextChunks::new(reader, config.encoding, config.chunk_size);
        self.run_chunks(chunks, config)
    }

    /// Runs over the file at `path`.
    pub fn run_path(&self, path: &Path, config: RunConfiguration) -> PuncResult<RunResult> {
        let span = debug_span!("run", path = %path.display(), encoding = config.encoding.name());
        let _enter = span.enter();
        let started = Instant::now();

        let chunks = TextChunks::open(path, config.encoding, config.chunk_size)?;
        let result = self.run_chunks(chunks, config)?;

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "run complete");
        Ok(result)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::analysis()
    }
}

/// Analyzes the punctuation of the file at `path`.
///
/// # Errors
/// - [`InvalidArgument`](crate::PuncError::InvalidArgument) for a bad path or
///   options, before the file is opened
/// - [`SourceUnavailable`](crate::PuncError::SourceUnavailable) when the file
///   cannot be opened or read
pub fn analyze(path: impl AsRef<Path>, options: impl Into<Options>) -> PuncResult<RunResult> {
    let path = path.as_ref();
    let config = options::resolve(path, options)?;
    Pipeline::analysis().run_path(path, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(text: &str) -> RunResult {
        Pipeline::analysis()
            .run_reader(Cursor::new(text.as_bytes().to_vec()), RunConfiguration::default())
            .unwrap()
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            Pipeline::analysis().stage_names(),
            vec![
                "strip-line-endings",
                "collapse-whitespace",
                "count-punctuation",
                "sentence-metric",
                "redact-alphanumeric",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let result = run("");
        assert_eq!(result.body, "");
        assert_eq!(result.spaced, "");
        assert_eq!(result.words_per_sentence, 0.0);
        assert!(result.count.is_zeroed());
    }

    #[test]
    fn test_simple_sentence() {
        let result = run("Hello there, friend.\nBye!");
        assert_eq!(result.body, ",.!");
        assert_eq!(result.count.get_str(","), Some(1));
        // "Hello there, friend.Bye!" has three words and two terminators
        assert_eq!(result.words_per_sentence, 1.5);
        assert_eq!(result.spaced, "   ,  . !");
    }

    #[test]
    fn test_newline_only_input_is_infinite() {
        let result = run("\n");
        assert!(result.words_per_sentence.is_infinite());
        assert_eq!(result.spaced, "");
    }

    #[test]
    fn test_errors_abort_the_run() {
        let chunks = vec![
            Ok("fine.".to_string()),
            Err(crate::PuncError::source_unavailable(
                "x",
                std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            )),
        ];
        let err = Pipeline::analysis()
            .run_chunks(chunks, RunConfiguration::default())
            .unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_redaction_pipeline_keeps_newlines() {
        let result = Pipeline::redaction()
            .run_chunks(vec![Ok("ab, c\nd!".to_string())], RunConfiguration::default())
            .unwrap();
        assert_eq!(result.spaced, " ,  \n !");
        assert_eq!(result.body, "");
    }
}
