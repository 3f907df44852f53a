//! Statistical n-gram language model.
//!
//! This module provides:
//! - Fixed-order token n-gram models (`NGramModel`)
//! - Their construction parameters (`NGramConfig`)
//! - Internal per-context state (`State`)

/// Token-level n-gram model (`n >= 1`).
///
/// Handles corpus ingestion, conditional next-token probabilities,
/// weighted random text generation, and model merging.
pub mod ngram_model;

/// Model configuration and sentence sentinels.
pub mod config;

/// Internal representation of a single context.
///
/// Tracks outgoing transitions and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;

pub use config::{END_TOKEN, NGramConfig, START_TOKEN};
pub use ngram_model::NGramModel;
