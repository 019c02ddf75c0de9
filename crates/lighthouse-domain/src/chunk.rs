//! Chunk module - a bounded window of the source text

/// A window of the source document handed to one extraction call
///
/// Offsets and lengths are counted in characters (Unicode scalar values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Text of the window
    pub text: String,

    /// Position of this chunk in the sequence (0-based)
    pub sequence_index: usize,

    /// Character offset of the window's first character in the source
    pub start_offset: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, sequence_index: usize, start_offset: usize) -> Self {
        Self {
            text: text.into(),
            sequence_index,
            start_offset,
        }
    }

    /// Number of characters in the chunk
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character offset one past the chunk's last character
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.char_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_count_characters() {
        let chunk = Chunk::new("héllo", 2, 10);
        assert_eq!(chunk.char_len(), 5);
        assert_eq!(chunk.end_offset(), 15);
        assert_eq!(chunk.sequence_index, 2);
    }
}
