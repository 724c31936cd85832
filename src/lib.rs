//! Streaming punctuation analysis.
//!
//! This library reads a text file in chunks, counts a configurable catalogue
//! of punctuation marks and symbols (including repeated runs such as `"..."`
//! and `"!!!"`), estimates words per sentence, and produces a redacted
//! skeleton of the text where every alphanumeric run becomes a space. The
//! skeleton can be rendered into a PDF.
//!
//! # Architecture
//!
//! - [`domain`]: recognized symbols, catalogues, counter tables
//! - [`options`]: option shapes and their resolution into a run configuration
//! - [`pipeline`]: chunked source, transform stages, orchestration
//! - [`render`]: PDF rendering of the redacted text
//! - [`error`]: error taxonomy
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = punc::analyze("alice.txt", ())?;
//!
//! println!("words per sentence: {}", result.words_per_sentence);
//! println!("commas: {:?}", result.count.get_str(","));
//! println!("{}", result.spaced);
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! ## Custom mapping and encoding
//!
//! ```no_run
//! use punc::{AnalyzeOptions, MappingOverride};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = AnalyzeOptions::new()
//!     .with_encoding("latin1")
//!     .with_mapping(MappingOverride::new().with("!", 10u64));
//!
//! let result = punc::analyze("speech.txt", options)?;
//! assert!(result.count.get_str("!").unwrap() >= 10);
//! # Ok(())
//! # }
//! ```
//!
//! ## Rendering
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rendered = punc::render_redacted("dream_speech", ())?;
//! assert!(rendered.path_to_file.ends_with("dream_speech-visual.pdf"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Stages on their own
//!
//! ```
//! use punc::pipeline::redact_alphanumeric;
//!
//! assert_eq!(redact_alphanumeric("Hi, you!"), " ,  !");
//! ```

pub mod domain;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod render;

pub use domain::{
    fresh_mapping, Catalogue, MappingOverride, PunctuationMapping, Repeat, Symbol, Tally,
};
pub use error::{PuncError, PuncResult};
pub use options::{
    resolve, AnalyzeOptions, Options, RunConfiguration, SentenceMetricMode, DEFAULT_CHUNK_SIZE,
};
pub use pipeline::{analyze, Pipeline, RunResult, TransformStage};
pub use render::{
    render_redacted, render_redacted_with, RedactionRenderer, RenderResult, RenderedDocument,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let _pipeline = Pipeline::analysis();
    }

    #[test]
    fn test_default_mapping() {
        let mapping = fresh_mapping();
        assert_eq!(mapping.get_str("!"), Some(0));
        assert_eq!(mapping.get_str("?"), Some(0));
        assert_eq!(mapping.get_str("."), Some(0));
    }
}
