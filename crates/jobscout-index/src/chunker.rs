//! Sliding-window text chunker.
//!
//! Splits text into overlapping fixed-size fragments counted in characters,
//! not bytes. Window `i` covers `[i*(size-overlap), i*(size-overlap)+size)`;
//! the final window may be shorter. Whitespace-only windows are dropped
//! before index assignment, so chunk indices stay dense. No sentence or
//! paragraph awareness.

use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::types::Chunk;

/// Lazy, restartable iterator over raw character windows of a text.
pub struct Windows {
    chars: Vec<char>,
    start: usize,
    size: usize,
    step: usize,
}

impl Iterator for Windows {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.start >= self.chars.len() {
            return None;
        }
        let end = (self.start + self.size).min(self.chars.len());
        let window: String = self.chars[self.start..end].iter().collect();
        self.start += self.step;
        Some(window)
    }
}

/// Raw windows of `text`, including empty/whitespace ones. `chunk` filters
/// and indexes on top of this.
pub fn windows(text: &str, size: usize, overlap: usize) -> Result<Windows> {
    if size == 0 {
        return Err(JobscoutError::Config("chunk size must be non-zero".into()));
    }
    if overlap >= size {
        return Err(JobscoutError::Config(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({size})"
        )));
    }
    Ok(Windows {
        chars: text.chars().collect(),
        start: 0,
        size,
        step: size - overlap,
    })
}

/// Chunk `text` into overlapping fragments attributed to `source_id`.
///
/// Consecutive chunks overlap by exactly `overlap` characters (except
/// possibly the last), and the union of emitted windows covers every
/// non-whitespace character of the input at least once.
pub fn chunk(text: &str, source_id: &str, size: usize, overlap: usize) -> Result<Vec<Chunk>> {
    let kept: Vec<String> = windows(text, size, overlap)?
        .filter(|w| !w.trim().is_empty())
        .collect();

    let total_chunks = kept.len();
    Ok(kept
        .into_iter()
        .enumerate()
        .map(|(chunk_index, text)| Chunk {
            text,
            source_id: source_id.to_string(),
            chunk_index,
            total_chunks,
        })
        .collect())
}
