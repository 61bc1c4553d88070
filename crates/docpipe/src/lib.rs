//! Public facade crate for `docpipe`.
//!
//! This crate intentionally contains no logic of its own. It re-exports the
//! format-agnostic types from `docpipe-core` and the preprocessing pipeline
//! from `docpipe-engine`.

pub use docpipe_core::*;
pub use docpipe_engine::{
    chunk_text, chunk_text_default, preprocess_text, preprocess_text_default,
    split_paragraph_chunks, PreprocessCfg,
};
