//! Document artifact removal.
//!
//! Strips the debris that survives raw-text extraction: punctuation runs,
//! TOC markers, page-footer lines, and non-content URLs. Small explicit
//! scanners, no regex engine; every step is deterministic.

/// Substrings that mark a URL as content-bearing; anything else is noise.
const URL_KEEP_MARKERS: [&str; 3] = ["example", "api", "docs"];

/// Replacement for a removed URL token.
const URL_REMOVED: &str = "[URL removed]";

/// Apply the cleanup passes in order: punctuation-run collapsing, TOC/page
/// artifact removal, URL policy, punctuation spacing, blank-line collapse,
/// trim.
pub fn clean_text(text: &str) -> String {
    let text = collapse_punctuation_runs(text);
    let text = remove_toc_artifacts(&text);
    let text = apply_url_policy(&text);
    let text = normalize_punctuation_spacing(&text);
    let text = collapse_blank_runs(&text);
    text.trim().to_string()
}

/// 3+ `.` → `...`; 2+ `!` → `!`; 2+ `?` → `?`.
fn collapse_punctuation_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '.' || ch == '!' || ch == '?' {
            let mut run = 1usize;
            while chars.peek() == Some(&ch) {
                chars.next();
                run += 1;
            }
            match ch {
                '.' if run >= 3 => out.push_str("..."),
                '.' => out.push_str(&".".repeat(run)),
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Remove `[TOC]` markers anywhere, and standalone `Table of Contents` /
/// `Page N of M` lines. All matching is ASCII-case-insensitive.
fn remove_toc_artifacts(text: &str) -> String {
    let text = remove_ascii_ci(text, "[toc]");
    let mut kept: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let bare = line.trim().trim_start_matches('#').trim();
        if bare.eq_ignore_ascii_case("table of contents") {
            continue;
        }
        if is_page_marker(bare) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

/// `page <digits> of <digits>`, whole line.
fn is_page_marker(line: &str) -> bool {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };
    if !first.eq_ignore_ascii_case("page") {
        return false;
    }
    let Some(n) = words.next() else { return false };
    if n.is_empty() || !n.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let Some(of) = words.next() else { return false };
    if !of.eq_ignore_ascii_case("of") {
        return false;
    }
    let Some(m) = words.next() else { return false };
    if m.is_empty() || !m.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    words.next().is_none()
}

/// Remove every ASCII-case-insensitive occurrence of `needle`.
///
/// The needle must be ASCII; ASCII lowercasing preserves byte offsets, so
/// positions found in the folded copy index the original directly.
fn remove_ascii_ci(haystack: &str, needle: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0usize;
    while let Some(rel) = lower[i..].find(needle) {
        let start = i + rel;
        out.push_str(&haystack[i..start]);
        i = start + needle.len();
    }
    out.push_str(&haystack[i..]);
    out
}

/// Keep URL-like tokens that look like content (contain `example`, `api`
/// or `docs`); replace the rest with a literal marker.
fn apply_url_policy(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let mut rebuilt: Vec<String> = Vec::new();
        let lead: String = line
            .chars()
            .take_while(|&c| c == ' ' || c == '\t')
            .collect();
        for token in line.split_whitespace() {
            if is_url_like(token) && !is_content_url(token) {
                rebuilt.push(URL_REMOVED.to_string());
            } else {
                rebuilt.push(token.to_string());
            }
        }
        lines.push(format!("{lead}{}", rebuilt.join(" ")));
    }
    lines.join("\n")
}

fn is_url_like(token: &str) -> bool {
    let lc = token.to_ascii_lowercase();
    if lc.starts_with("http://") || lc.starts_with("https://") {
        return url::Url::parse(token).is_ok();
    }
    if lc.starts_with("www.") {
        return url::Url::parse(&format!("http://{token}")).is_ok();
    }
    false
}

fn is_content_url(token: &str) -> bool {
    let lc = token.to_ascii_lowercase();
    URL_KEEP_MARKERS.iter().any(|m| lc.contains(m))
}

/// Drop spaces/tabs before `,.!?;:` and collapse residual space runs left
/// behind by the removal passes.
fn normalize_punctuation_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, ',' | '.' | '!' | '?' | ';' | ':') {
            while out.ends_with(' ') || out.ends_with('\t') {
                out.pop();
            }
        }
        out.push(ch);
    }

    // Residual doubled spaces (e.g. where a marker was cut out mid-line).
    let mut collapsed = String::with_capacity(out.len());
    let mut prev_space = false;
    for ch in out.chars() {
        if ch == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        collapsed.push(ch);
    }
    collapsed
}

/// 3+ newlines → 2.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            continue;
        }
        if run > 0 {
            out.push_str(&"\n".repeat(run.min(2)));
            run = 0;
        }
        out.push(ch);
    }
    if run > 0 {
        out.push_str(&"\n".repeat(run.min(2)));
    }
    out
}
