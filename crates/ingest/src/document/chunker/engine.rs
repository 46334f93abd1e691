//! The chunking loop: span budgeting, break-point search, and the
//! strict-progress advance.

use super::normalize::{flatten, normalize};
use super::types::{ChunkConfig, TextChunk};

/// Split `text` into overlapping chunks, preferring paragraph, sentence,
/// and word boundaries near each cut.
///
/// The input is normalized first (see [`normalize`]); all offsets in the
/// returned chunks refer to that normalized string.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<TextChunk> {
    let normalized = normalize(text);
    chunk_normalized(&normalized, config, BreakMode::Structured)
}

/// Simpler variant that flattens the text completely and breaks only at
/// word boundaries.
pub fn chunk_text_simple(text: &str, config: &ChunkConfig) -> Vec<TextChunk> {
    let flattened = flatten(text);
    chunk_normalized(&flattened, config, BreakMode::WordOnly)
}

#[derive(Clone, Copy)]
enum BreakMode {
    /// Paragraph break, then sentence terminator, then word boundary,
    /// each constrained to the configured window before the target cut.
    Structured,
    /// Last space before the target cut, anywhere after the span start.
    WordOnly,
}

fn chunk_normalized(text: &str, config: &ChunkConfig, mode: BreakMode) -> Vec<TextChunk> {
    let chunk_size = config.chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < text.len() {
        let mut end = floor_char_boundary(text, (start + chunk_size).min(text.len()));
        if end <= start {
            // A single char wider than the whole budget; take it whole.
            end = ceil_char_boundary(text, start + 1);
        }

        // Only seek a break point when this is not the final chunk.
        if end < text.len() {
            if let Some(cut) = find_break(text, start, end, config.break_window, mode) {
                end = cut;
            }
        }

        let trimmed = text[start..end].trim();
        if !trimmed.is_empty() {
            chunks.push(TextChunk {
                text: trimmed.to_string(),
                index: chunks.len(),
                start,
                end,
            });
        }

        // Advance with overlap. When the overlap swallows the whole span
        // (or the span trimmed to nothing), fall through to the span end:
        // every iteration must move strictly forward.
        let mut next = floor_char_boundary(text, end.saturating_sub(config.overlap));
        if next <= start {
            next = end;
        }
        start = next;
    }

    chunks
}

/// Find a cut position strictly after `start` for a span targeted to end
/// at `end`. Returns `None` when no acceptable break exists, in which case
/// the caller keeps the unadjusted `end`.
///
/// Every returned position follows an ASCII character, so it is always a
/// valid char boundary.
fn find_break(
    text: &str,
    start: usize,
    end: usize,
    window: usize,
    mode: BreakMode,
) -> Option<usize> {
    let head = &text[..end];

    match mode {
        BreakMode::Structured => {
            let floor = end.saturating_sub(window);

            // Paragraph break first: cut just after the blank line so the
            // completed chunk closes its paragraph.
            if let Some(pos) = head.rfind("\n\n") {
                let cut = pos + 2;
                if cut > start && cut >= floor {
                    return Some(cut);
                }
            }

            // Sentence terminator: cut just after the punctuation so it
            // stays with its sentence.
            if let Some(pos) = rfind_any(head, &[". ", "! ", "? "]) {
                let cut = pos + 1;
                if cut > start && cut >= floor {
                    return Some(cut);
                }
            }

            // Word boundary fallback.
            if let Some(pos) = head.rfind(' ') {
                if pos > start && pos >= floor {
                    return Some(pos);
                }
            }

            None
        }
        BreakMode::WordOnly => {
            let pos = head.rfind(' ')?;
            (pos > start).then_some(pos)
        }
    }
}

/// Byte position of the last occurrence of any of `patterns` in `text`.
fn rfind_any(text: &str, patterns: &[&str]) -> Option<usize> {
    patterns.iter().filter_map(|p| text.rfind(p)).max()
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
