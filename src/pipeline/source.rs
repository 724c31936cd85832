//! Chunked, encoding-aware text source.
//!
//! Bytes are read in fixed-size chunks and decoded with a streaming decoder,
//! so a multi-byte sequence split across two reads still decodes to one
//! character. Chunk boundaries are otherwise arbitrary: they do not align
//! with words or sentences.

use crate::error::{PuncError, PuncResult};
use encoding_rs::{CoderResult, Decoder, Encoding};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Iterator over decoded text chunks of a reader.
///
/// Yields `Err(SourceUnavailable)` once and then stops if a read fails.
/// Reads that decode to nothing (for instance the first half of a multi-byte
/// character) produce no chunk.
pub struct TextChunks<R> {
    reader: R,
    decoder: Decoder,
    buffer: Vec<u8>,
    origin: PathBuf,
    finished: bool,
}

impl TextChunks<File> {
    /// Opens `path` for chunked reading.
    pub fn open(path: &Path, encoding: &'static Encoding, chunk_size: usize) -> PuncResult<Self> {
        let file = File::open(path).map_err(|e| PuncError::source_unavailable(path, e))?;
        Ok(Self::new(file, encoding, chunk_size).with_origin(path))
    }
}

impl<R: Read> TextChunks<R> {
    pub fn new(reader: R, encoding: &'static Encoding, chunk_size: usize) -> Self {
        Self {
            reader,
            decoder: encoding.new_decoder_with_bom_removal(),
            buffer: vec![0; chunk_size.max(1)],
            origin: PathBuf::from("<stream>"),
            finished: false,
        }
    }

    /// Sets the path reported in errors.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Reads until the buffer is full or the reader is exhausted.
    fn fill_buffer(&mut self) -> io::Result<usize> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn decode(&mut self, len: usize, last: bool) -> String {
        let mut input = &self.buffer[..len];
        let mut text = String::new();
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len() * 3 + 16);
            text.reserve(needed);

            let (result, read, _) = self.decoder.decode_to_string(input, &mut text, last);
            input = &input[read..];
            match result {
                CoderResult::InputEmpty => return text,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

impl<R: Read> Iterator for TextChunks<R> {
    type Item = PuncResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let len = match self.fill_buffer() {
                Ok(len) => len,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(PuncError::source_unavailable(self.origin.clone(), e)));
                }
            };

            let last = len < self.buffer.len();
            if last {
                self.finished = true;
            }

            let text = self.decode(len, last);
            if !text.is_empty() {
                return Some(Ok(text));
            }
        }
        None
    }
}
