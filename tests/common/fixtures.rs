//! Test fixtures: text files in temporary directories.
//!
//! Follows the builder pattern so each test states only the content it
//! cares about.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A short passage with every basic mark and a few aggregates.
pub const SAMPLE_PASSAGE: &str = "\"Curiouser and curiouser!\" cried Alice (she was so much surprised, \
that for the moment she quite forgot how to speak good English); \"now I'm opening out like \
the largest telescope that ever was! Good-bye, feet!\"\n\nWait... what??? Really!!!\n";

/// A text file living as long as its temporary directory.
pub struct TextFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Builder for text fixtures.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let file = TextFileBuilder::new()
///     .with_line("Hello, world!")
///     .with_line("Bye.")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFileBuilder {
    name: String,
    bytes: Vec<u8>,
}

impl TextFileBuilder {
    pub fn new() -> Self {
        Self {
            name: "input.txt".to_string(),
            bytes: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Appends text without a line break.
    pub fn with_text(mut self, text: &str) -> Self {
        self.bytes.extend_from_slice(text.as_bytes());
        self
    }

    /// Appends text and a line feed.
    pub fn with_line(mut self, line: &str) -> Self {
        self.bytes.extend_from_slice(line.as_bytes());
        self.bytes.push(b'\n');
        self
    }

    /// Appends raw bytes, for non UTF-8 encodings.
    pub fn with_bytes(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Result<TextFile> {
        let dir = TempDir::new()?;
        let path = dir.path().join(&self.name);
        fs::write(&path, &self.bytes)?;
        Ok(TextFile { dir, path })
    }
}

/// Writes `text` to a fresh temporary file.
pub fn text_file(text: &str) -> Result<TextFile> {
    TextFileBuilder::new().with_text(text).build()
}
