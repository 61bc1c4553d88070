use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unsupported format: {0}")]
    Unsupported(String),
    #[error("extract failed: {0}")]
    Extract(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Default summarization budget, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 60_000;

/// Default per-chunk budget, in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 60_000;

/// A structurally significant title line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
    /// Nesting level, 1–6.
    pub level: u8,
    /// Character offset of the heading line in the scanned text.
    pub offset: usize,
}

/// The span of text introduced by a heading, or the untitled lead span
/// before the first heading.
///
/// Sections are non-overlapping and order-preserving: a section's span
/// starts at its heading line and ends where the next heading line starts.
/// `content` excludes the heading line itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub content: String,
    /// Character offset where the span starts (0 for the lead section).
    pub start_offset: usize,
    /// Character offset one past the span.
    pub end_offset: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// A contiguous run of ordered or unordered marker lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListBlock {
    pub kind: ListKind,
    pub items: Vec<String>,
    /// Character offset of the first item line.
    pub offset: usize,
}

/// A fenced region whose content is excluded from heading/list detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag from the opening fence, if any.
    pub language: Option<String>,
    pub content: String,
    /// Character offset of the opening fence line.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// ceil(word count / 200).
    pub estimated_reading_time_minutes: usize,
    pub complexity_tier: ComplexityTier,
    /// Texts of the first 5 headings whose level is ≤ 2.
    pub primary_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentStructure {
    pub headings: Vec<Heading>,
    pub sections: Vec<Section>,
    pub lists: Vec<ListBlock>,
    pub code_blocks: Vec<CodeBlock>,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    /// Character count of the raw input.
    pub original_length: usize,
    /// Character count of the final (cleaned, possibly summarized) text.
    pub cleaned_length: usize,
    /// Rounded percentage removed between the two; 0 for empty input.
    pub reduction_percentage: u32,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    None,
    Extracted,
    Chunked,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummarizationInfo {
    pub was_summarized: bool,
    /// Character count of the cleaned text before budgeting.
    pub original_length: usize,
    /// Character count after budgeting.
    pub summarized_length: usize,
    pub method: SummaryMethod,
    /// Labels of the structural elements that survived budgeting.
    pub preserved_sections: Vec<String>,
}

/// Output of a full preprocessing run. Serializable for handoff to
/// downstream consumers (prompt construction, pagination).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreprocessingResult {
    pub cleaned_text: String,
    pub original_text: String,
    pub structure: DocumentStructure,
    pub statistics: Statistics,
    pub warnings: Vec<String>,
    pub summarization: Option<SummarizationInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub chunk_index: usize,
    pub total_chunks: usize,
    /// Character offset into the chunked text.
    pub start_offset: usize,
    /// Character offset into the chunked text.
    pub end_offset: usize,
    /// Heading texts present in this chunk.
    pub headings: Vec<String>,
}

/// A bounded-size slice of processed text with positional and heading
/// provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Plain text plus basic counts, as supplied by an upstream extraction
/// adapter before the engine runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    pub word_count: usize,
    pub char_count: usize,
    pub line_count: usize,
}

impl ExtractedDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        let line_count = text.lines().count();
        Self {
            text,
            word_count,
            char_count,
            line_count,
        }
    }
}

/// Boundary for format-specific raw-text extraction (markdown, word
/// processor, PDF). Adapters own their failure taxonomy; the engine
/// consumes only the resulting plain text and never fails.
pub trait ExtractAdapter: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument>;
}
