//! Contracts for paginating processed documents.

use docpipe_engine::{chunk_text, preprocess_text, preprocess_text_default, PreprocessCfg};

#[test]
fn short_documents_come_back_as_one_chunk() {
    let result = preprocess_text_default("# Intro\n\nA short document.");
    let chunks = chunk_text(&result, 60_000);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].metadata.chunk_index, 0);
    assert_eq!(chunks[0].metadata.total_chunks, 1);
}

#[test]
fn chunks_preserve_section_boundaries_and_heading_provenance() {
    // Bodies differ per section so the deduplicator keeps all of them.
    let text = (0..6)
        .map(|i| format!("# Part {i}\n{}", format!("content {i} ").repeat(30)))
        .collect::<Vec<_>>()
        .join("\n");
    let result = preprocess_text(&text, &PreprocessCfg { max_length: 60_000 });
    let chunks = chunk_text(&result, 600);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(!chunk.metadata.headings.is_empty());
        for heading in &chunk.metadata.headings {
            assert!(chunk.text.contains(heading.as_str()));
        }
    }
}

#[test]
fn concatenation_reconstructs_the_document_modulo_whitespace() {
    let text = (0..6)
        .map(|i| format!("# Part {i}\n{}", format!("content {i} ").repeat(30)))
        .collect::<Vec<_>>()
        .join("\n");
    let result = preprocess_text(&text, &PreprocessCfg { max_length: 60_000 });
    let chunks = chunk_text(&result, 600);

    let rebuilt: String = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let squash = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(squash(&rebuilt), squash(&result.cleaned_text));

    let total = chunks.len();
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.metadata.chunk_index, i);
        assert_eq!(chunk.metadata.total_chunks, total);
    }
}

#[test]
fn offsets_are_ordered_and_within_the_text() {
    let text = (0..5)
        .map(|i| format!("## Head {i}\n{}", format!("words here {i} ").repeat(40)))
        .collect::<Vec<_>>()
        .join("\n");
    let result = preprocess_text(&text, &PreprocessCfg { max_length: 60_000 });
    let total_chars = result.cleaned_text.chars().count();
    let chunks = chunk_text(&result, 700);

    let mut prev_end = 0usize;
    for chunk in &chunks {
        assert!(chunk.metadata.start_offset >= prev_end);
        assert!(chunk.metadata.end_offset <= total_chars);
        assert!(chunk.metadata.start_offset < chunk.metadata.end_offset);
        prev_end = chunk.metadata.end_offset;
    }
}

#[test]
fn chunks_round_trip_through_json() {
    let result = preprocess_text_default("# One\n\nalpha\n\n# Two\n\nbeta");
    let chunks = chunk_text(&result, 60_000);
    let json = serde_json::to_string(&chunks).expect("serialize");
    let back: Vec<docpipe_engine::Chunk> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, chunks);
}
