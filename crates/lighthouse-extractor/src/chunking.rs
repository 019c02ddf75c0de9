//! Fixed-width, overlapping text windows for large transcripts

use crate::config::{ExtractorConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::error::ExtractorError;
use lighthouse_domain::Chunk;

/// Splits text into overlapping character windows
///
/// There is no sentence or token awareness: a window may cut a sentence in
/// half. The overlap gives the extractor enough shared context on both sides
/// of every cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `chunk_size` is zero or `overlap`
    /// is not smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if chunk_size == 0 {
            return Err(ExtractorError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(ExtractorError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create a chunker from extractor settings
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::new(config.chunk_size, config.overlap)
    }

    /// Distance between the starts of consecutive windows
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Chunk the given text
    ///
    /// Text no longer than one window comes back as a single chunk. Otherwise
    /// a window advances by [`stride`](Self::stride) from offset 0 until its
    /// start reaches the end of the text.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        // Byte offset of every character, plus the end of the string, so
        // windows are cut on character boundaries
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        if char_count <= self.chunk_size {
            return vec![Chunk::new(text, 0, 0)];
        }

        let stride = self.stride();
        let mut chunks = Vec::with_capacity(char_count / stride + 1);
        let mut start = 0;

        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            chunks.push(Chunk::new(
                &text[boundaries[start]..boundaries[end]],
                chunks.len(),
                start,
            ));
            start += stride;
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Split `text` into overlapping windows of `chunk_size` characters
///
/// # Examples
///
/// ```
/// use lighthouse_extractor::split;
///
/// let text = "x".repeat(30_000);
/// let chunks = split(&text, 12_000, 500).unwrap();
/// let starts: Vec<usize> = chunks.iter().map(|c| c.start_offset).collect();
/// assert_eq!(starts, vec![0, 11_500, 23_000]);
/// ```
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>, ExtractorError> {
    Ok(TextChunker::new(chunk_size, overlap)?.chunk(text))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sizes() -> impl Strategy<Value = (usize, usize)> {
        (1usize..64).prop_flat_map(|size| (Just(size), 0..size))
    }

    proptest! {
        /// Property: every character position is covered by at least one chunk
        #[test]
        fn test_chunks_cover_text(text in "[a-zé ]{0,400}", (size, overlap) in sizes()) {
            let chunks = split(&text, size, overlap).unwrap();
            let char_count = text.chars().count();
            let mut covered = vec![false; char_count];

            for chunk in &chunks {
                for pos in chunk.start_offset..chunk.end_offset() {
                    covered[pos] = true;
                }
            }
            prop_assert!(covered.iter().all(|c| *c));
        }

        /// Property: chunk text matches the source at the recorded offset
        #[test]
        fn test_chunks_match_source(text in "[a-zé ]{0,400}", (size, overlap) in sizes()) {
            let chars: Vec<char> = text.chars().collect();
            for chunk in split(&text, size, overlap).unwrap() {
                let expected: String = chars[chunk.start_offset..chunk.end_offset()].iter().collect();
                prop_assert_eq!(chunk.text, expected);
            }
        }

        /// Property: non-overlapping regions concatenate back to the original text
        #[test]
        fn test_chunks_reconstruct_text(text in "[a-zé ]{0,400}", (size, overlap) in sizes()) {
            let chunks = split(&text, size, overlap).unwrap();
            let mut rebuilt = String::new();
            let mut covered_to: usize = 0;

            for chunk in &chunks {
                let skip = covered_to.saturating_sub(chunk.start_offset);
                rebuilt.extend(chunk.text.chars().skip(skip));
                covered_to = covered_to.max(chunk.end_offset());
            }
            prop_assert_eq!(rebuilt, text);
        }

        /// Property: consecutive chunks share exactly the overlap region
        #[test]
        fn test_consecutive_chunks_overlap(text in "[a-zé ]{0,400}", (size, overlap) in sizes()) {
            let chunks = split(&text, size, overlap).unwrap();

            for pair in chunks.windows(2) {
                let (current, next) = (&pair[0], &pair[1]);
                prop_assert_eq!(next.start_offset, current.start_offset + size - overlap);

                let shared = current.char_len() - (size - overlap);
                let tail: String = current.text.chars().skip(size - overlap).collect();
                let head: String = next.text.chars().take(shared).collect();
                prop_assert_eq!(&tail, &head);

                // A full-width window followed by a long enough one shares
                // exactly `overlap` characters
                if current.char_len() == size && next.char_len() >= overlap {
                    prop_assert_eq!(tail.chars().count(), overlap);
                }
            }
        }

        /// Property: text that fits in one window is returned whole
        #[test]
        fn test_short_text_single_chunk(text in "[a-z ]{0,50}") {
            let chunks = split(&text, 50, 10).unwrap();
            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(&chunks[0].text, &text);
        }
    }
}
