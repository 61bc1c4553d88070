//! Single-pass structure detection over cleaned text.
//!
//! One forward fold over lines with explicit state: the open section, the
//! active list, and the fenced-code flag. Heading and list detection are
//! suppressed inside fences. Offsets are character offsets into the scanned
//! text.

use docpipe_core::{
    CodeBlock, ComplexityTier, DocumentMetadata, DocumentStructure, Heading, ListBlock, ListKind,
    Section,
};

/// Match a heading line: 1–6 leading `#` characters followed by whitespace
/// and non-empty text. Returns (level, trimmed text).
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(|c: char| c == ' ' || c == '\t') {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

/// Match a list item line. Unordered markers are `-`, `*`, `+`; ordered
/// markers are `N.`; both require trailing whitespace before the item text.
fn parse_list_item(line: &str) -> Option<(ListKind, &str)> {
    let body = line.trim_start();
    let mut chars = body.chars();
    match chars.next() {
        Some('-') | Some('*') | Some('+') => {
            let rest = &body[1..];
            if rest.starts_with(|c: char| c == ' ' || c == '\t') {
                let item = rest.trim();
                if !item.is_empty() {
                    return Some((ListKind::Unordered, item));
                }
            }
            None
        }
        Some(c) if c.is_ascii_digit() => {
            let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
            let rest = &body[digits..];
            if let Some(after_dot) = rest.strip_prefix('.') {
                if after_dot.starts_with(|c: char| c == ' ' || c == '\t') {
                    let item = after_dot.trim();
                    if !item.is_empty() {
                        return Some((ListKind::Ordered, item));
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// A fence delimiter line: three backticks, optionally followed by a
/// language tag on the opener.
fn parse_fence(line: &str) -> Option<Option<String>> {
    let t = line.trim();
    let rest = t.strip_prefix("```")?;
    let tag = rest.trim();
    if tag.is_empty() {
        Some(None)
    } else {
        Some(Some(tag.to_string()))
    }
}

struct OpenSection {
    title: Option<String>,
    start: usize,
    content: Vec<String>,
}

struct OpenList {
    kind: ListKind,
    items: Vec<String>,
    offset: usize,
}

struct OpenCode {
    language: Option<String>,
    lines: Vec<String>,
    offset: usize,
}

/// Scan `text` once and derive headings, sections, lists, code blocks and
/// document metadata.
pub fn detect_structure(text: &str) -> DocumentStructure {
    let total_chars = text.chars().count();

    let mut headings: Vec<Heading> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut lists: Vec<ListBlock> = Vec::new();
    let mut code_blocks: Vec<CodeBlock> = Vec::new();

    let mut section = OpenSection {
        title: None,
        start: 0,
        content: Vec::new(),
    };
    let mut list: Option<OpenList> = None;
    let mut code: Option<OpenCode> = None;

    let mut offset = 0usize;
    for line in text.split('\n') {
        let line_chars = line.chars().count();

        if let Some(mut open) = code.take() {
            // Inside a fence: only the closing delimiter is structural.
            if parse_fence(line).is_some() {
                code_blocks.push(CodeBlock {
                    language: open.language,
                    content: open.lines.join("\n"),
                    offset: open.offset,
                });
            } else {
                open.lines.push(line.to_string());
                code = Some(open);
            }
            section.content.push(line.to_string());
            offset += line_chars + 1;
            continue;
        }

        if let Some(language) = parse_fence(line) {
            close_list(&mut list, &mut lists);
            code = Some(OpenCode {
                language,
                lines: Vec::new(),
                offset,
            });
            section.content.push(line.to_string());
            offset += line_chars + 1;
            continue;
        }

        if let Some((level, heading_text)) = parse_heading(line) {
            close_list(&mut list, &mut lists);
            close_section(section, offset, &mut sections);
            headings.push(Heading {
                text: heading_text.to_string(),
                level,
                offset,
            });
            section = OpenSection {
                title: Some(heading_text.to_string()),
                start: offset,
                content: Vec::new(),
            };
            offset += line_chars + 1;
            continue;
        }

        match parse_list_item(line) {
            Some((kind, item)) => match list.as_mut() {
                Some(open) if open.kind == kind => open.items.push(item.to_string()),
                _ => {
                    close_list(&mut list, &mut lists);
                    list = Some(OpenList {
                        kind,
                        items: vec![item.to_string()],
                        offset,
                    });
                }
            },
            None => close_list(&mut list, &mut lists),
        }

        section.content.push(line.to_string());
        offset += line_chars + 1;
    }

    close_list(&mut list, &mut lists);
    // An unterminated fence is not recorded as a code block; its lines stay
    // in the section content like any other text.
    close_section(section, total_chars, &mut sections);

    let metadata = derive_metadata(text, &headings, &sections);
    DocumentStructure {
        headings,
        sections,
        lists,
        code_blocks,
        metadata,
    }
}

fn close_list(list: &mut Option<OpenList>, lists: &mut Vec<ListBlock>) {
    if let Some(open) = list.take() {
        lists.push(ListBlock {
            kind: open.kind,
            items: open.items,
            offset: open.offset,
        });
    }
}

fn close_section(section: OpenSection, end: usize, sections: &mut Vec<Section>) {
    let content = section.content.join("\n");
    // The untitled lead section exists only when content precedes the first
    // heading.
    if section.title.is_none() && content.trim().is_empty() {
        return;
    }
    let end = end.max(section.start);
    sections.push(Section {
        title: section.title,
        content,
        start_offset: section.start,
        end_offset: end,
    });
}

fn derive_metadata(text: &str, headings: &[Heading], sections: &[Section]) -> DocumentMetadata {
    let word_count = text.split_whitespace().count();
    let estimated_reading_time_minutes = word_count.div_ceil(200);

    let complexity_tier = if headings.len() > 20 || sections.len() > 10 || word_count > 5000 {
        ComplexityTier::High
    } else if headings.len() > 10 || sections.len() > 5 || word_count > 2000 {
        ComplexityTier::Medium
    } else {
        ComplexityTier::Low
    };

    let primary_topics = headings
        .iter()
        .filter(|h| h.level <= 2)
        .take(5)
        .map(|h| h.text.clone())
        .collect();

    DocumentMetadata {
        estimated_reading_time_minutes,
        complexity_tier,
        primary_topics,
    }
}
