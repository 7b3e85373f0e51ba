//! Fixed-size text chunking
//!
//! Splits extracted document text into contiguous, non-overlapping segments
//! of at most `max_chars` characters so each generation request stays within
//! the provider's input limit. Boundaries ignore words and sentences.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroUsize;
//! use quizgen::chunker::chunk_text;
//!
//! let size = NonZeroUsize::new(4).unwrap();
//! let chunks: Vec<&str> = chunk_text("abcdefghij", size).collect();
//! assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
//! ```

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Lazy iterator over fixed-size chunks of a borrowed string
///
/// Cloning the iterator restarts iteration from the clone's position, so a
/// fresh `chunk_text` call (or a clone taken before iterating) can be
/// replayed any number of times.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: &'a str,
    max_chars: NonZeroUsize,
}

/// Split `text` into chunks of at most `max_chars` characters
///
/// Slices on `char` boundaries, never inside a UTF-8 code point. Empty text
/// yields no chunks.
pub fn chunk_text(text: &str, max_chars: NonZeroUsize) -> Chunks<'_> {
    Chunks {
        remaining: text,
        max_chars,
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let split_at = self
            .remaining
            .char_indices()
            .nth(self.max_chars.get())
            .map(|(idx, _)| idx)
            .unwrap_or(self.remaining.len());

        let (chunk, rest) = self.remaining.split_at(split_at);
        self.remaining = rest;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chars = self.remaining.chars().count();
        let n = chars.div_ceil(self.max_chars.get());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

impl FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let mut chunks = chunk_text("", size(10));
        assert_eq!(chunks.len(), 0);
        assert!(chunks.next().is_none());
    }

    #[test]
    fn test_text_shorter_than_chunk() {
        let chunks: Vec<&str> = chunk_text("hello", size(10)).collect();
        assert_eq!(chunks, vec!["hello"]);
    }

    #[test]
    fn test_exact_multiple() {
        let chunks: Vec<&str> = chunk_text("abcdef", size(3)).collect();
        assert_eq!(chunks, vec!["abc", "def"]);
    }

    #[test]
    fn test_chunks_reconstruct_text_and_respect_limit() {
        let samples = [
            "",
            "a",
            "The quick brown fox jumps over the lazy dog.",
            "line one\nline two\n\nline four",
            "naïve café – ünïcödé ✓ 日本語のテキスト",
        ];

        for text in samples {
            for n in 1..=12 {
                let chunks: Vec<&str> = chunk_text(text, size(n)).collect();
                assert_eq!(chunks.concat(), text, "size {}", n);
                assert!(chunks.iter().all(|c| c.chars().count() <= n));
                assert!(chunks.iter().all(|c| !c.is_empty()));
            }
        }
    }

    #[test]
    fn test_multibyte_characters_not_split() {
        let chunks: Vec<&str> = chunk_text("日本語テキスト", size(2)).collect();
        assert_eq!(chunks, vec!["日本", "語テ", "キス", "ト"]);
    }

    #[test]
    fn test_size_hint_is_exact() {
        let chunks = chunk_text("abcdefghij", size(3));
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.count(), 4);
    }

    #[test]
    fn test_clone_restarts() {
        let chunks = chunk_text("abcdefgh", size(3));
        let first: Vec<&str> = chunks.clone().collect();
        let second: Vec<&str> = chunks.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_chunk_size() {
        let text = "x".repeat(2500);
        let lens: Vec<usize> = chunk_text(&text, size(DEFAULT_CHUNK_SIZE))
            .map(str::len)
            .collect();
        assert_eq!(lens, vec![1000, 1000, 500]);
    }
}
