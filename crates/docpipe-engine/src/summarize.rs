//! Budget enforcement.
//!
//! Invoked only when the cleaned text exceeds the configured budget.
//! Structured documents go through extraction (section leads, code blocks
//! and lists under sub-budgets); unstructured ones fall back to
//! paragraph-chunked truncation. Both paths record what was preserved.

use crate::chunk::split_paragraph_chunks;
use docpipe_core::{DocumentStructure, ListKind, SummarizationInfo, SummaryMethod};

/// Share of the budget given to section leads.
const MAIN_CONTENT_SHARE: (usize, usize) = (7, 10);
/// Sections sampled by extraction.
const MAX_SECTIONS: usize = 10;
/// Per-section lead cap, in characters.
const SECTION_LEAD_CHARS: usize = 300;
/// Code blocks sampled by extraction.
const MAX_CODE_BLOCKS: usize = 5;
/// Lists sampled by extraction, and items kept per list.
const MAX_LISTS: usize = 3;
const MAX_LIST_ITEMS: usize = 10;
/// Fallback chunks concatenated before the digest.
const MAX_FALLBACK_CHUNKS: usize = 3;
/// Budget headroom required before the key-topics digest is added.
const KEY_TOPICS_MIN_HEADROOM: usize = 500;
/// Level ≤ 2 headings listed in the digest.
const KEY_TOPICS_MAX: usize = 5;
/// Characters reserved for the truncation marker.
const TRUNCATION_RESERVE: usize = 100;

const TRUNCATION_MARKER: &str = "[...truncated]";

pub struct BudgetOutcome {
    pub text: String,
    pub info: SummarizationInfo,
    pub warnings: Vec<String>,
}

/// Reduce `cleaned` to at most `max_length` characters.
///
/// Documents with any detected headings, lists or code blocks go through
/// extraction first; if that still lands over budget, or the document has
/// no structure at all, the paragraph-chunked fallback runs instead.
pub fn enforce_budget(
    cleaned: &str,
    structure: &DocumentStructure,
    max_length: usize,
) -> BudgetOutcome {
    let original_length = cleaned.chars().count();
    let has_structure = !structure.headings.is_empty()
        || !structure.lists.is_empty()
        || !structure.code_blocks.is_empty();

    if has_structure {
        let (text, preserved, mut warnings) = extract_key_content(structure, max_length);
        let summarized_length = text.chars().count();
        if summarized_length <= max_length {
            warnings.push(size_warning(original_length, max_length, "extraction"));
            return BudgetOutcome {
                text,
                info: SummarizationInfo {
                    was_summarized: true,
                    original_length,
                    summarized_length,
                    method: SummaryMethod::Extracted,
                    preserved_sections: preserved,
                },
                warnings,
            };
        }
    }

    chunked_fallback(cleaned, structure, max_length, original_length)
}

fn size_warning(original_length: usize, max_length: usize, method: &str) -> String {
    format!(
        "Document is {original_length} characters, over the {max_length} character budget; reduced with the {method} method"
    )
}

/// Structure-preserving extraction: section leads under 70% of the budget,
/// then code blocks under 20% of what remains, then lists under 10% of
/// what remains after code.
fn extract_key_content(
    structure: &DocumentStructure,
    budget: usize,
) -> (String, Vec<String>, Vec<String>) {
    let mut parts: Vec<String> = Vec::new();
    let mut preserved: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let main_budget = budget * MAIN_CONTENT_SHARE.0 / MAIN_CONTENT_SHARE.1;
    let mut main_used = 0usize;
    for section in structure.sections.iter().take(MAX_SECTIONS) {
        let mut piece = String::new();
        if let Some(title) = &section.title {
            piece.push_str("# ");
            piece.push_str(title);
            piece.push('\n');
        }
        if let Some(lead) = first_paragraph(&section.content) {
            let (lead, _clipped) = truncate_chars(lead, SECTION_LEAD_CHARS);
            piece.push_str(&lead);
        }
        let piece = piece.trim().to_string();
        if piece.is_empty() {
            continue;
        }
        let cost = piece.chars().count() + if parts.is_empty() { 0 } else { 2 };
        if main_used + cost > main_budget {
            break;
        }
        main_used += cost;
        preserved.push(
            section
                .title
                .clone()
                .unwrap_or_else(|| "Untitled section".to_string()),
        );
        parts.push(piece);
    }

    // Code blocks go in verbatim while the code budget is not yet spent, so
    // a single large block may overshoot; the final hard-truncate catches
    // that.
    let code_budget = budget.saturating_sub(main_used) * 2 / 10;
    let mut code_used = 0usize;
    for block in structure.code_blocks.iter().take(MAX_CODE_BLOCKS) {
        if code_used >= code_budget {
            break;
        }
        let lang = block.language.as_deref().unwrap_or("");
        let piece = format!("```{lang}\n{}\n```", block.content);
        code_used += piece.chars().count() + 2;
        preserved.push(format!(
            "Code block ({})",
            if lang.is_empty() { "code" } else { lang }
        ));
        parts.push(piece);
    }

    let list_budget = budget.saturating_sub(main_used + code_used) / 10;
    let mut list_used = 0usize;
    for list in structure.lists.iter().take(MAX_LISTS) {
        if list_used >= list_budget {
            break;
        }
        let lines: Vec<String> = list
            .items
            .iter()
            .take(MAX_LIST_ITEMS)
            .enumerate()
            .map(|(i, item)| match list.kind {
                ListKind::Unordered => format!("- {item}"),
                ListKind::Ordered => format!("{}. {item}", i + 1),
            })
            .collect();
        if lines.is_empty() {
            continue;
        }
        let piece = lines.join("\n");
        list_used += piece.chars().count() + 2;
        preserved.push(format!("List ({} items)", list.items.len().min(MAX_LIST_ITEMS)));
        parts.push(piece);
    }

    let mut text = parts.join("\n\n");
    if text.chars().count() > budget {
        let (kept, _clipped) = truncate_chars(&text, budget.saturating_sub(TRUNCATION_RESERVE));
        text = format!("{kept}{TRUNCATION_MARKER}");
        warnings.push("Extracted content exceeded the budget and was truncated".to_string());
    }

    (text, preserved, warnings)
}

/// Paragraph-chunked fallback: the first chunks that fit, plus a key-topics
/// digest when headroom and headings allow. Content past the cap is
/// dropped.
fn chunked_fallback(
    cleaned: &str,
    structure: &DocumentStructure,
    max_length: usize,
    original_length: usize,
) -> BudgetOutcome {
    // 80% chunks leave headroom for the trailing key-topics block.
    let chunk_size = (max_length * 8 / 10).max(1);
    let chunks = split_paragraph_chunks(cleaned, chunk_size);

    let mut parts: Vec<String> = Vec::new();
    let mut preserved: Vec<String> = Vec::new();
    let mut used = 0usize;
    for (i, chunk) in chunks.iter().take(MAX_FALLBACK_CHUNKS).enumerate() {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            continue;
        }
        let cost = trimmed.chars().count() + if parts.is_empty() { 0 } else { 2 };
        if used + cost > max_length {
            break;
        }
        used += cost;
        preserved.push(format!("Part {}", i + 1));
        parts.push(trimmed.to_string());
    }

    let mut text = parts.join("\n\n");

    let topics: Vec<&str> = structure
        .headings
        .iter()
        .filter(|h| h.level <= 2)
        .take(KEY_TOPICS_MAX)
        .map(|h| h.text.as_str())
        .collect();
    let headroom = max_length.saturating_sub(text.chars().count());
    if headroom > KEY_TOPICS_MIN_HEADROOM && !topics.is_empty() {
        let mut digest = String::from("## Key Topics:");
        for topic in topics {
            digest.push_str("\n- ");
            digest.push_str(topic);
        }
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&digest);
        preserved.push("Key headings".to_string());
    }

    let summarized_length = text.chars().count();
    let warnings = vec![size_warning(original_length, max_length, "chunked")];
    BudgetOutcome {
        text,
        info: SummarizationInfo {
            was_summarized: true,
            original_length,
            summarized_length,
            method: SummaryMethod::Chunked,
            preserved_sections: preserved,
        },
        warnings,
    }
}

fn first_paragraph(content: &str) -> Option<&str> {
    content
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
}

fn truncate_chars(s: &str, max_chars: usize) -> (String, bool) {
    if max_chars == 0 {
        return (String::new(), !s.is_empty());
    }
    let mut out = String::new();
    for (n, ch) in s.chars().enumerate() {
        if n >= max_chars {
            return (out, true);
        }
        out.push(ch);
    }
    (out, false)
}
