//! From-scratch NLP toolkit.
//!
//! This crate provides:
//! - Pluggable tokenizers (whitespace/punctuation and regex strategies)
//! - Vocabulary-indexed document vectorizers (raw counts and TF-IDF)
//! - A token-level n-gram language model with sampling-based generation
//! - Static word-embedding lookup and document averaging
//! - A vectorizer + classifier pipeline seam
//!
//! Every component is synchronous and owns its state: `fit` takes
//! `&mut self`, queries take `&self`.

/// Error type shared by every component.
pub mod error;

/// Text tokenization strategies.
pub mod tokenizer;

/// Count and TF-IDF vectorizers built on a shared vocabulary contract.
pub mod vectorizer;

/// N-gram language model and text generation.
///
/// Exposes the model and its configuration while keeping the per-context
/// state internal.
pub mod ngram;

/// Word-embedding lookup, averaging and similarity.
pub mod embedding;

/// Vectorizer + classifier composition.
pub mod pipeline;

/// Dense vector helpers.
pub mod math;

/// Plain-text loaders (corpus files, GloVe / word2vec embeddings).
pub mod io;

pub use error::{NlpError, Result};
