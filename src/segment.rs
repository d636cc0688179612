//! Character-window text segmentation.
//!
//! Splits text into overlapping windows no longer than a configured number
//! of characters so that each window fits the classifier's input limit.
//! Boundaries are counted in Unicode scalar values and never split a UTF-8
//! code point; they make no attempt to respect words or sentences.
//!
//! ```text
//! max_size = 5, overlap = 2, stride = 3
//! text:    A B C D E F G H I J
//! chunk 0: A B C D E
//! chunk 1:       D E F G H
//! chunk 2:             G H I J
//! ```

use crate::{DocsortError, Result};

/// A window of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Position in segmentation order, starting at 0.
    pub index: usize,
    /// Offset of the first character, counted in characters.
    pub offset: usize,
    pub text: &'a str,
}

impl Chunk<'_> {
    /// Whether the chunk has nothing worth classifying.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Validated segmentation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    max_size: usize,
    overlap: usize,
}

impl Segmenter {
    /// Fails with [`DocsortError::Configuration`] unless
    /// `0 <= overlap < max_size`, which guarantees forward progress.
    pub fn new(max_size: usize, overlap: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(DocsortError::Configuration(
                "max_chunk_size must be greater than zero".to_string(),
            ));
        }
        if overlap >= max_size {
            return Err(DocsortError::Configuration(format!(
                "chunk_overlap ({overlap}) must be less than max_chunk_size ({max_size})"
            )));
        }
        Ok(Self { max_size, overlap })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Characters between the starts of consecutive windows.
    pub fn stride(&self) -> usize {
        self.max_size - self.overlap
    }

    /// Lazily segment `text`. Text no longer than `max_size` characters
    /// (including the empty string) yields exactly one chunk equal to it.
    pub fn segment<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            rest: text,
            offset: 0,
            index: 0,
            max_size: self.max_size,
            stride: self.stride(),
            done: false,
        }
    }

    /// Number of chunks [`segment`](Self::segment) yields for a text of
    /// `len` characters.
    pub fn chunk_count(&self, len: usize) -> usize {
        if len <= self.max_size {
            1
        } else {
            (len - self.overlap).div_ceil(self.stride())
        }
    }
}

/// Segment `text` into windows of at most `max_size` characters overlapping
/// by `overlap` characters.
pub fn segment(text: &str, max_size: usize, overlap: usize) -> Result<Chunks<'_>> {
    Ok(Segmenter::new(max_size, overlap)?.segment(text))
}

/// Iterator over the chunks of one text. Cloning restarts from the clone
/// point, so a fresh `Chunks` can be replayed from the beginning.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    offset: usize,
    index: usize,
    max_size: usize,
    stride: usize,
    done: bool,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        if self.done {
            return None;
        }

        let end = byte_offset(self.rest, self.max_size);
        let chunk = Chunk {
            index: self.index,
            offset: self.offset,
            text: &self.rest[..end],
        };

        if end == self.rest.len() {
            self.done = true;
        } else {
            let advance = byte_offset(self.rest, self.stride);
            self.rest = &self.rest[advance..];
            self.offset += self.stride;
            self.index += 1;
        }

        Some(chunk)
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}

/// Byte index of the `n`th character of `s`, or `s.len()` if `s` is shorter.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}
