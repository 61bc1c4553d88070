//! Deterministic preprocessing of loosely structured text for LLM
//! consumption.
//!
//! The pipeline runs leaves-first: whitespace normalization, duplicate
//! removal, artifact cleanup, then (only when the cleaned text exceeds the
//! budget) structure-aware summarization, and finally structure detection,
//! statistics and advisory warnings over the final text.
//!
//! The engine is a pure function from input text (+ budget knobs) to a
//! result value: no IO, no shared state, no failure modes. Degenerate input
//! degrades to warnings, never errors.

pub mod chunk;
pub mod clean;
pub mod dedupe;
pub mod normalize;
pub mod stats;
pub mod structure;
pub mod summarize;

pub use chunk::{chunk_text, chunk_text_default, split_paragraph_chunks};
pub use docpipe_core::{
    Chunk, ChunkMetadata, CodeBlock, ComplexityTier, DocumentMetadata, DocumentStructure,
    Heading, ListBlock, ListKind, PreprocessingResult, Section, Statistics, SummarizationInfo,
    SummaryMethod, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_LENGTH,
};

/// Word count above which a document is flagged as chunking-worthy.
const VERY_LONG_WORDS: usize = 10_000;
/// Word count above which a headingless document draws a warning.
const HEADINGLESS_WARN_WORDS: usize = 500;
/// Heading level beyond which nesting is flagged.
const DEEP_NESTING_LEVEL: u8 = 4;
/// Reduction percentage above which cleanup is flagged.
const HEAVY_REDUCTION_PERCENT: u32 = 20;

/// Floor for caller-supplied summarization budgets.
const MIN_MAX_LENGTH: usize = 200;

/// Pipeline knobs. `max_length` is the summarization budget in characters.
#[derive(Debug, Clone)]
pub struct PreprocessCfg {
    pub max_length: usize,
}

impl Default for PreprocessCfg {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Run the full pipeline with default knobs.
pub fn preprocess_text_default(text: &str) -> PreprocessingResult {
    preprocess_text(text, &PreprocessCfg::default())
}

/// Run the full pipeline: normalize → dedupe → clean → (summarize if over
/// budget) → detect structure → statistics → warnings.
pub fn preprocess_text(text: &str, cfg: &PreprocessCfg) -> PreprocessingResult {
    let max_length = cfg.max_length.max(MIN_MAX_LENGTH);
    let original_length = text.chars().count();

    let normalized = normalize::normalize_whitespace(text);
    let (deduped, mut warnings) = dedupe::dedupe_lines(&normalized);
    let cleaned = clean::clean_text(&deduped);

    let (final_text, summarization) = if cleaned.chars().count() > max_length {
        let pre_structure = structure::detect_structure(&cleaned);
        let outcome = summarize::enforce_budget(&cleaned, &pre_structure, max_length);
        warnings.extend(outcome.warnings);
        (outcome.text, Some(outcome.info))
    } else {
        (cleaned, None)
    };

    let structure = structure::detect_structure(&final_text);
    let statistics = stats::compute(original_length, &final_text);
    warnings.extend(advisory_warnings(&structure, &statistics));

    PreprocessingResult {
        cleaned_text: final_text,
        original_text: text.to_string(),
        structure,
        statistics,
        warnings,
        summarization,
    }
}

/// Advisory warnings over the final text, in a fixed order, each
/// independent of the others.
fn advisory_warnings(structure: &DocumentStructure, statistics: &Statistics) -> Vec<String> {
    let mut out = Vec::new();
    if statistics.word_count > VERY_LONG_WORDS {
        out.push(
            "Document is very long and may need chunking for optimal LLM processing".to_string(),
        );
    }
    if structure.headings.is_empty() && statistics.word_count > HEADINGLESS_WARN_WORDS {
        out.push("Document lacks headings - structure detection may be limited".to_string());
    }
    if structure
        .headings
        .iter()
        .any(|h| h.level > DEEP_NESTING_LEVEL)
    {
        out.push("Document has deep heading nesting - consider flattening structure".to_string());
    }
    if statistics.reduction_percentage > HEAVY_REDUCTION_PERCENT {
        out.push(format!(
            "Removed {}% of original content during cleanup",
            statistics.reduction_percentage
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_an_empty_result_without_warnings_about_size() {
        let result = preprocess_text_default("");
        assert_eq!(result.cleaned_text, "");
        assert_eq!(result.statistics.reduction_percentage, 0);
        assert!(result.summarization.is_none());
    }

    #[test]
    fn below_budget_cleaned_text_is_cleaning_output_alone() {
        let text = "# Title\n\nSome   spaced    content!!\n";
        let result = preprocess_text_default(text);
        let expected = clean::clean_text(&dedupe::dedupe_lines(
            &normalize::normalize_whitespace(text),
        ).0);
        assert_eq!(result.cleaned_text, expected);
        assert!(result.summarization.is_none());
    }

    #[test]
    fn headingless_documents_over_five_hundred_words_draw_a_warning() {
        let text = (0..501).map(|_| "word").collect::<Vec<_>>().join(" ");
        let result = preprocess_text_default(&text);
        assert!(result
            .warnings
            .iter()
            .any(|w| w == "Document lacks headings - structure detection may be limited"));
    }

    #[test]
    fn five_hundred_words_exactly_do_not_draw_the_warning() {
        let text = (0..500).map(|_| "word").collect::<Vec<_>>().join(" ");
        let result = preprocess_text_default(&text);
        assert!(!result
            .warnings
            .iter()
            .any(|w| w.contains("lacks headings")));
    }

    #[test]
    fn deep_nesting_draws_a_warning() {
        let result = preprocess_text_default("##### Deep\ncontent");
        assert!(result
            .warnings
            .iter()
            .any(|w| w == "Document has deep heading nesting - consider flattening structure"));
    }

    #[test]
    fn heavy_reduction_is_reported_with_the_percentage() {
        // Mostly blank lines and duplicate long paragraphs: cleanup removes
        // well over 20%.
        let long = format!("{} tail", "y".repeat(80));
        let text = format!("{long}\n\n\n\n\n\n{long}\n\n\n\n\n\n{long}\n\n\n\n\n\n{long}");
        let result = preprocess_text_default(&text);
        assert!(result.statistics.reduction_percentage > 20);
        let expected = format!(
            "Removed {}% of original content during cleanup",
            result.statistics.reduction_percentage
        );
        assert!(result.warnings.contains(&expected));
    }

    #[test]
    fn stage_warnings_precede_advisories() {
        let long = format!("{} tail", "z".repeat(80));
        let text = format!("{long}\n{long}\n{long}\n{long}\n{long}");
        let result = preprocess_text_default(&text);
        let dedup_pos = result
            .warnings
            .iter()
            .position(|w| w.contains("duplicate paragraphs"))
            .expect("expected dedup warning");
        if let Some(cleanup_pos) = result
            .warnings
            .iter()
            .position(|w| w.contains("during cleanup"))
        {
            assert!(dedup_pos < cleanup_pos);
        }
    }

    #[test]
    fn summarization_only_triggers_over_the_budget() {
        let text = "word ".repeat(300);
        let cfg = PreprocessCfg { max_length: 10_000 };
        let result = preprocess_text(&text, &cfg);
        assert!(result.summarization.is_none());

        let cfg = PreprocessCfg { max_length: 1_000 };
        let result = preprocess_text(&text, &cfg);
        let info = result.summarization.expect("expected summarization");
        assert!(info.was_summarized);
        assert!(result.cleaned_text.chars().count() <= 1_000);
    }

    #[test]
    fn budget_floor_clamps_tiny_configs() {
        let text = "word ".repeat(300);
        let cfg = PreprocessCfg { max_length: 1 };
        let result = preprocess_text(&text, &cfg);
        assert!(result.cleaned_text.chars().count() <= MIN_MAX_LENGTH);
    }
}
