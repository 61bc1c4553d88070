//! Duplicate removal.
//!
//! Repeated headings are dropped from their second occurrence; repeated
//! long lines are dropped from their third. Runs before cleaning, line by
//! line, with no fence awareness: a heading-looking line inside a code
//! block is keyed like any other heading. Accepted heuristic.

use crate::structure::parse_heading;
use std::collections::{BTreeMap, BTreeSet};

/// Minimum trimmed length for a line to participate in long-line dedup.
const LONG_LINE_MIN_CHARS: usize = 50;

/// Case-folded key prefix length for long-line dedup. Lines that diverge
/// only after this prefix are treated as duplicates. Accepted heuristic.
const LONG_LINE_KEY_CHARS: usize = 100;

/// Occurrences of an identical long-line key tolerated before removal.
const LONG_LINE_KEEP: usize = 2;

/// Drop duplicate headings and over-repeated long lines.
///
/// Returns the surviving text and the stage warnings (omitted when nothing
/// was removed).
pub fn dedupe_lines(text: &str) -> (String, Vec<String>) {
    let mut seen_headings: BTreeSet<String> = BTreeSet::new();
    let mut long_line_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut removed_headings = 0usize;
    let mut removed_paragraphs = 0usize;

    let mut kept: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if let Some((_, heading_text)) = parse_heading(line) {
            let key = heading_text.to_lowercase();
            if !seen_headings.insert(key) {
                removed_headings += 1;
                continue;
            }
        } else {
            let trimmed = line.trim();
            if trimmed.chars().count() > LONG_LINE_MIN_CHARS {
                let key = trimmed
                    .chars()
                    .take(LONG_LINE_KEY_CHARS)
                    .collect::<String>()
                    .to_lowercase();
                let count = long_line_counts.entry(key).or_insert(0);
                *count += 1;
                if *count > LONG_LINE_KEEP {
                    removed_paragraphs += 1;
                    continue;
                }
            }
        }
        kept.push(line);
    }

    let mut warnings = Vec::new();
    if removed_headings > 0 {
        warnings.push(format!("Removed {removed_headings} duplicate headings"));
    }
    if removed_paragraphs > 0 {
        warnings.push(format!("Removed {removed_paragraphs} duplicate paragraphs"));
    }
    (kept.join("\n"), warnings)
}
