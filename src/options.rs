//! Options resolution.
//!
//! Turns a `(path, options)` call into a complete [`RunConfiguration`] or
//! fails with [`PuncError::InvalidArgument`] before any file is touched.

use crate::domain::{Catalogue, MappingOverride, PunctuationMapping, Tally};
use crate::error::{PuncError, PuncResult};
use encoding_rs::Encoding;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Bytes read from the source per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// How the words-per-sentence figure is accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentenceMetricMode {
    /// Each chunk's ratio replaces the previous one
    #[default]
    LastChunk,
    /// Words and sentences are summed over the stream, divided once
    WholeStream,
}

/// Structured options. Every field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeOptions {
    pub encoding: Option<String>,
    pub mapping: Option<MappingOverride>,
    pub catalogue: Option<Catalogue>,
    pub chunk_size: Option<usize>,
    pub sentence_metric: Option<SentenceMetricMode>,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_mapping(mut self, mapping: MappingOverride) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = Some(catalogue);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn with_sentence_metric(mut self, mode: SentenceMetricMode) -> Self {
        self.sentence_metric = Some(mode);
        self
    }
}

/// The accepted option shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Options {
    #[default]
    Default,
    /// A bare encoding name
    Encoding(String),
    Structured(AnalyzeOptions),
}

impl Options {
    /// Reads options from a JSON document.
    ///
    /// `null` means defaults, a string is an encoding name, an object is
    /// structured options. Any other value is rejected.
    pub fn from_json(value: &Value) -> PuncResult<Self> {
        match value {
            Value::Null => Ok(Self::Default),
            Value::String(encoding) => Ok(Self::Encoding(encoding.clone())),
            Value::Object(fields) => {
                let mut options = AnalyzeOptions::new();

                match fields.get("encoding") {
                    None | Some(Value::Null) => {}
                    Some(Value::String(encoding)) => options.encoding = Some(encoding.clone()),
                    Some(other) => {
                        return Err(PuncError::invalid_argument(
                            "encoding",
                            format!("expected a string, got {}", json_kind(other)),
                        ))
                    }
                }

                match fields.get("mapping") {
                    None | Some(Value::Null) => {}
                    Some(Value::Object(entries)) => {
                        let mut overrides = MappingOverride::new();
                        for (key, value) in entries {
                            overrides.set(key.clone(), json_tally(value));
                        }
                        options.mapping = Some(overrides);
                    }
                    Some(other) => {
                        return Err(PuncError::invalid_argument(
                            "mapping",
                            format!("expected an object, got {}", json_kind(other)),
                        ))
                    }
                }

                match fields.get("catalogue") {
                    None | Some(Value::Null) => {}
                    Some(Value::String(name)) => options.catalogue = Some(named_catalogue(name)?),
                    Some(Value::Array(items)) => {
                        let spellings = items
                            .iter()
                            .map(|item| {
                                item.as_str().ok_or_else(|| {
                                    PuncError::invalid_argument(
                                        "catalogue",
                                        format!("expected strings, got {}", json_kind(item)),
                                    )
                                })
                            })
                            .collect::<PuncResult<Vec<_>>>()?;
                        options.catalogue = Some(Catalogue::from_symbols(spellings)?);
                    }
                    Some(other) => {
                        return Err(PuncError::invalid_argument(
                            "catalogue",
                            format!("expected a name or a list, got {}", json_kind(other)),
                        ))
                    }
                }

                match fields.get("chunkSize") {
                    None | Some(Value::Null) => {}
                    Some(value) => {
                        let size = value.as_u64().ok_or_else(|| {
                            PuncError::invalid_argument(
                                "chunkSize",
                                format!("expected a positive integer, got {}", value),
                            )
                        })?;
                        options.chunk_size = Some(size as usize);
                    }
                }

                match fields.get("sentenceMetric") {
                    None | Some(Value::Null) => {}
                    Some(Value::String(mode)) => {
                        options.sentence_metric = Some(match mode.as_str() {
                            "lastChunk" => SentenceMetricMode::LastChunk,
                            "wholeStream" => SentenceMetricMode::WholeStream,
                            other => {
                                return Err(PuncError::invalid_argument(
                                    "sentenceMetric",
                                    format!("unknown mode '{}'", other),
                                ))
                            }
                        })
                    }
                    Some(other) => {
                        return Err(PuncError::invalid_argument(
                            "sentenceMetric",
                            format!("expected a string, got {}", json_kind(other)),
                        ))
                    }
                }

                Ok(Self::Structured(options))
            }
            other => Err(PuncError::invalid_argument(
                "options",
                format!(
                    "expected options to be either an object or a string, got {}",
                    json_kind(other)
                ),
            )),
        }
    }

    /// Parses a JSON text and reads options from it.
    pub fn from_json_str(text: &str) -> PuncResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| PuncError::invalid_argument("options", e.to_string()))?;
        Self::from_json(&value)
    }
}

impl From<()> for Options {
    fn from(_: ()) -> Self {
        Self::Default
    }
}

impl From<&str> for Options {
    fn from(encoding: &str) -> Self {
        Self::Encoding(encoding.to_string())
    }
}

impl From<String> for Options {
    fn from(encoding: String) -> Self {
        Self::Encoding(encoding)
    }
}

impl From<AnalyzeOptions> for Options {
    fn from(options: AnalyzeOptions) -> Self {
        Self::Structured(options)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    pub encoding: &'static Encoding,
    pub mapping: PunctuationMapping,
    pub chunk_size: usize,
    pub sentence_metric: SentenceMetricMode,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
            mapping: Catalogue::default().fresh_mapping(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            sentence_metric: SentenceMetricMode::default(),
        }
    }
}

/// Validates `path` and resolves `options` into a [`RunConfiguration`].
pub fn resolve(path: &Path, options: impl Into<Options>) -> PuncResult<RunConfiguration> {
    validate_path(path)?;

    match options.into() {
        Options::Default => Ok(RunConfiguration::default()),
        Options::Encoding(label) => Ok(RunConfiguration {
            encoding: resolve_encoding(&label)?,
            ..RunConfiguration::default()
        }),
        Options::Structured(options) => {
            let encoding = match options.encoding.as_deref() {
                Some(label) => resolve_encoding(label)?,
                None => encoding_rs::UTF_8,
            };

            let chunk_size = options.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
            if chunk_size == 0 {
                return Err(PuncError::invalid_argument(
                    "chunk_size",
                    "chunk size must be at least one byte",
                ));
            }

            let mut mapping = options.catalogue.unwrap_or_default().fresh_mapping();
            if let Some(overrides) = &options.mapping {
                let dropped = mapping.apply_overrides(overrides);
                debug!(
                    applied = overrides.len() - dropped,
                    dropped, "merged mapping overrides"
                );
            }

            Ok(RunConfiguration {
                encoding,
                mapping,
                chunk_size,
                sentence_metric: options.sentence_metric.unwrap_or_default(),
            })
        }
    }
}

/// Rejects empty, whitespace-only and non UTF-8 paths.
pub fn validate_path(path: &Path) -> PuncResult<&str> {
    let text = path.to_str().ok_or_else(|| {
        PuncError::invalid_argument("path", "Path contains invalid UTF-8")
    })?;

    if text.is_empty() {
        return Err(PuncError::invalid_argument(
            "path",
            "expected non-empty string",
        ));
    }

    if text.trim().is_empty() {
        return Err(PuncError::invalid_argument(
            "path",
            "file path cannot be empty or whitespace only",
        ));
    }

    Ok(text)
}

/// Resolves an encoding label. An empty label means UTF-8.
pub fn resolve_encoding(label: &str) -> PuncResult<&'static Encoding> {
    let label = label.trim();
    if label.is_empty() {
        return Ok(encoding_rs::UTF_8);
    }

    match label.to_ascii_lowercase().as_str() {
        "utf16le" | "ucs2" => return Ok(encoding_rs::UTF_16LE),
        "binary" => return Ok(encoding_rs::WINDOWS_1252),
        _ => {}
    }

    Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        PuncError::invalid_argument("encoding", format!("unknown encoding '{}'", label))
    })
}

fn named_catalogue(name: &str) -> PuncResult<Catalogue> {
    match name {
        "basic" => Ok(Catalogue::basic()),
        "extended" => Ok(Catalogue::extended()),
        other => Err(PuncError::invalid_argument(
            "catalogue",
            format!("unknown catalogue '{}'", other),
        )),
    }
}

fn json_tally(value: &Value) -> Tally {
    match value.as_u64() {
        Some(n) => Tally::Count(n),
        None => Tally::Malformed(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
