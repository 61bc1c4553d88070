//! Bounded chunking of processed documents.
//!
//! Splits a preprocessing result into pieces that respect section
//! boundaries and carry heading provenance. Also provides the
//! paragraph-bounded splitter the chunked-fallback summarizer builds on.
//!
//! Concatenating chunk texts in `chunk_index` order reproduces the chunked
//! text modulo boundary whitespace trimming: chunks are sliced from the
//! cleaned text by section span, and section spans partition it.

use docpipe_core::{Chunk, ChunkMetadata, PreprocessingResult, DEFAULT_MAX_CHUNK_SIZE};

/// Floor for caller-supplied chunk budgets.
const MIN_CHUNK_SIZE: usize = 100;

struct PendingChunk {
    text: String,
    start: usize,
    end: usize,
    headings: Vec<String>,
}

/// [`chunk_text`] with the default per-chunk budget.
pub fn chunk_text_default(result: &PreprocessingResult) -> Vec<Chunk> {
    chunk_text(result, DEFAULT_MAX_CHUNK_SIZE)
}

/// Split a preprocessing result into chunks of at most `max_chunk_size`
/// characters.
///
/// Text at or under the budget comes back as a single chunk. Otherwise
/// sections accumulate into chunks, flushing when the next section would
/// not fit; a single section larger than the budget is hard-split into
/// fixed-size slices.
pub fn chunk_text(result: &PreprocessingResult, max_chunk_size: usize) -> Vec<Chunk> {
    let max = max_chunk_size.max(MIN_CHUNK_SIZE);
    let text = &result.cleaned_text;
    let total_chars = text.chars().count();

    if total_chars <= max {
        let headings = result
            .structure
            .headings
            .iter()
            .map(|h| h.text.clone())
            .collect();
        return finalize(vec![PendingChunk {
            text: text.clone(),
            start: 0,
            end: total_chars,
            headings,
        }]);
    }

    let sections = &result.structure.sections;
    if sections.is_empty() {
        // Caller-assembled result with no detected sections: degrade to
        // fixed-size slices over the whole text.
        return finalize(hard_split(text, 0, total_chars, max, &[]));
    }

    let mut pending: Vec<PendingChunk> = Vec::new();
    let mut buf = String::new();
    let mut buf_len = 0usize;
    let mut buf_start = 0usize;
    let mut buf_end = 0usize;
    let mut buf_headings: Vec<String> = Vec::new();

    for section in sections {
        let span_len = section.end_offset.saturating_sub(section.start_offset);
        let span = slice_chars(text, section.start_offset, section.end_offset);

        if span_len > max {
            if buf_len > 0 {
                pending.push(PendingChunk {
                    text: std::mem::take(&mut buf),
                    start: buf_start,
                    end: buf_end,
                    headings: std::mem::take(&mut buf_headings),
                });
                buf_len = 0;
            }
            let own_headings: Vec<String> = section.title.iter().cloned().collect();
            pending.extend(hard_split(
                &span,
                section.start_offset,
                section.end_offset,
                max,
                &own_headings,
            ));
            continue;
        }

        if buf_len > 0 && buf_len + span_len > max {
            pending.push(PendingChunk {
                text: std::mem::take(&mut buf),
                start: buf_start,
                end: buf_end,
                headings: std::mem::take(&mut buf_headings),
            });
            buf_len = 0;
        }

        if buf_len == 0 {
            buf_start = section.start_offset;
        }
        buf.push_str(&span);
        buf_len += span_len;
        buf_end = section.end_offset;
        if let Some(title) = &section.title {
            buf_headings.push(title.clone());
        }
    }

    if buf_len > 0 {
        pending.push(PendingChunk {
            text: buf,
            start: buf_start,
            end: buf_end,
            headings: buf_headings,
        });
    }

    finalize(pending)
}

/// Backfill `total_chunks` once the count is known and trim boundary
/// whitespace.
fn finalize(pending: Vec<PendingChunk>) -> Vec<Chunk> {
    let total_chunks = pending.len();
    pending
        .into_iter()
        .enumerate()
        .map(|(chunk_index, p)| Chunk {
            text: p.text.trim().to_string(),
            metadata: ChunkMetadata {
                chunk_index,
                total_chunks,
                start_offset: p.start,
                end_offset: p.end,
                headings: p.headings,
            },
        })
        .collect()
}

fn hard_split(
    span: &str,
    start_offset: usize,
    end_offset: usize,
    max: usize,
    headings: &[String],
) -> Vec<PendingChunk> {
    let mut out = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0usize;
    let mut piece_start = start_offset;

    for ch in span.chars() {
        piece.push(ch);
        piece_len += 1;
        if piece_len == max {
            out.push(PendingChunk {
                text: std::mem::take(&mut piece),
                start: piece_start,
                end: piece_start + piece_len,
                headings: headings.to_vec(),
            });
            piece_start += piece_len;
            piece_len = 0;
        }
    }
    if piece_len > 0 {
        out.push(PendingChunk {
            text: piece,
            start: piece_start,
            end: end_offset.max(piece_start),
            headings: headings.to_vec(),
        });
    }
    out
}

fn slice_chars(s: &str, start_char: usize, end_char: usize) -> String {
    if end_char <= start_char {
        return String::new();
    }
    s.chars()
        .skip(start_char)
        .take(end_char - start_char)
        .collect()
}

/// Split text into paragraph-bounded pieces of at most `size` characters.
///
/// Paragraphs (blank-line separated) accumulate until the next one would
/// not fit; a single paragraph larger than `size` is hard-split. Used by
/// the chunked-fallback summarizer.
pub fn split_paragraph_chunks(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let mut out: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut buf_len = 0usize;

    for para in text.split("\n\n") {
        if para.trim().is_empty() {
            continue;
        }
        let para_len = para.chars().count();

        if para_len > size {
            if buf_len > 0 {
                out.push(std::mem::take(&mut buf));
                buf_len = 0;
            }
            let mut piece = String::new();
            let mut piece_len = 0usize;
            for ch in para.chars() {
                piece.push(ch);
                piece_len += 1;
                if piece_len == size {
                    out.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
            }
            if piece_len > 0 {
                out.push(piece);
            }
            continue;
        }

        let sep = if buf_len == 0 { 0 } else { 2 };
        if buf_len > 0 && buf_len + sep + para_len > size {
            out.push(std::mem::take(&mut buf));
            buf_len = 0;
        }
        if buf_len > 0 {
            buf.push_str("\n\n");
            buf_len += 2;
        }
        buf.push_str(para);
        buf_len += para_len;
    }

    if buf_len > 0 {
        out.push(buf);
    }
    out
}
