//! Document statistics.

use docpipe_core::Statistics;

/// Compute counts for the final text against the raw input length.
///
/// `original_length` is the character count of the raw input;
/// `cleaned_length` reflects the final text (post-summarization when a
/// budget was enforced). Division by zero degrades to 0.
pub fn compute(original_length: usize, final_text: &str) -> Statistics {
    let cleaned_length = final_text.chars().count();

    let reduction_percentage = if original_length == 0 {
        0
    } else {
        let removed = original_length.saturating_sub(cleaned_length);
        ((removed as f64 / original_length as f64) * 100.0).round() as u32
    };

    let word_count = final_text.split_whitespace().count();
    let sentence_count = final_text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraph_count = final_text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();

    Statistics {
        original_length,
        cleaned_length,
        reduction_percentage,
        word_count,
        sentence_count,
        paragraph_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_sentences_paragraphs() {
        let s = compute(26, "One two. Three four!\n\nFive?");
        assert_eq!(s.word_count, 5);
        assert_eq!(s.sentence_count, 3);
        assert_eq!(s.paragraph_count, 2);
    }

    #[test]
    fn reduction_is_rounded_percentage() {
        let s = compute(200, &"x".repeat(150));
        assert_eq!(s.reduction_percentage, 25);
    }

    #[test]
    fn empty_original_yields_zero_reduction() {
        let s = compute(0, "");
        assert_eq!(s.reduction_percentage, 0);
        assert_eq!(s.word_count, 0);
        assert_eq!(s.sentence_count, 0);
        assert_eq!(s.paragraph_count, 0);
    }

    #[test]
    fn growth_never_underflows() {
        // Cleaning can lengthen tiny inputs (URL markers); reduction floors
        // at zero rather than wrapping.
        let s = compute(5, "longer than before");
        assert_eq!(s.reduction_percentage, 0);
    }
}
