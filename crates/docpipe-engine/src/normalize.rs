//! Whitespace canonicalization.
//!
//! First stage of the pipeline: line endings, blank-line runs, interior
//! spacing. Idempotent and infallible.

/// Canonicalize whitespace:
///
/// - `\r\n` and lone `\r` become `\n`
/// - runs of 4+ newlines collapse to exactly 2
/// - interior runs of spaces/tabs collapse to one space
/// - trailing whitespace is stripped per line
/// - leading indentation longer than 4 characters becomes exactly 4 spaces
///   (shorter indentation is kept verbatim, so list/code indentation
///   survives)
pub fn normalize_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for line in unified.split('\n') {
        lines.push(normalize_line(line));
    }

    collapse_newline_runs(&lines.join("\n"))
}

fn normalize_line(line: &str) -> String {
    let body = line.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let lead_chars = line.chars().count() - body.chars().count();
    let lead: String = if lead_chars > 4 {
        "    ".to_string()
    } else {
        line.chars().take(lead_chars).collect()
    };

    // Collapse interior space/tab runs; a pending flag means trailing
    // whitespace is never emitted.
    let mut out = lead;
    let mut pending_space = false;
    for ch in body.chars() {
        if ch == ' ' || ch == '\t' {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    // A line that was only whitespace collapses to its (capped) indentation;
    // strip that too so blank lines are truly empty.
    if body.is_empty() {
        return String::new();
    }
    out
}

fn collapse_newline_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            continue;
        }
        if run > 0 {
            out.push_str(&"\n".repeat(if run >= 4 { 2 } else { run }));
            run = 0;
        }
        out.push(ch);
    }
    if run > 0 {
        out.push_str(&"\n".repeat(if run >= 4 { 2 } else { run }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unifies_line_endings() {
        assert_eq!(
            normalize_whitespace("line1\r\nline2\rline3\n"),
            "line1\nline2\nline3\n"
        );
    }

    #[test]
    fn collapses_four_or_more_newlines_to_two() {
        assert_eq!(normalize_whitespace("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_whitespace("a\n\n\n\n\n\n\nb"), "a\n\nb");
        // A run of exactly 3 is preserved.
        assert_eq!(normalize_whitespace("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn collapses_interior_space_runs_and_strips_trailing() {
        assert_eq!(normalize_whitespace("a   b\t\tc   \n"), "a b c\n");
    }

    #[test]
    fn caps_deep_indentation_at_four_spaces() {
        assert_eq!(normalize_whitespace("        code"), "    code");
        assert_eq!(normalize_whitespace("  item"), "  item");
        assert_eq!(normalize_whitespace("\tindented"), "\tindented");
    }

    #[test]
    fn whitespace_only_lines_become_empty() {
        assert_eq!(normalize_whitespace("a\n   \nb"), "a\n\nb");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(s in "[ \t\r\na-z#\\-\\*\\.]{0,400}") {
            let once = normalize_whitespace(&s);
            let twice = normalize_whitespace(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn never_panics_on_arbitrary_input(s in any::<String>()) {
            let _ = normalize_whitespace(&s);
        }
    }
}
