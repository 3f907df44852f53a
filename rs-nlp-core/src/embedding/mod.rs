//! Static word embeddings.
//!
//! The embedding table itself is an external resource; this module only
//! reads it through `EmbeddingSource` and defines lookup-with-fallback,
//! document averaging, and cosine-similarity queries on top of it.

use std::cmp::Ordering;

use log::warn;

use crate::error::{NlpError, Result};
use crate::math;
use crate::tokenizer::Tokenizer;

/// In-memory `EmbeddingSource`.
pub mod table;

pub use table::EmbeddingTable;

/// Read-only access to a table of fixed-length word vectors.
pub trait EmbeddingSource {
	/// Length of every vector of the table.
	fn dimension(&self) -> usize;

	/// Vector of `word`, if the table knows it.
	fn lookup(&self, word: &str) -> Option<&[f32]>;

	/// Every word of the table, in no particular order.
	fn words(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// Word and document vectors backed by an `EmbeddingSource`.
///
/// # Notes
/// - Out-of-vocabulary words map to the zero vector and never fail.
/// - Document averaging skips all-zero vectors, treating them as
///   out-of-vocabulary. A word whose real embedding is the zero vector is
///   skipped too.
#[derive(Clone, Debug)]
pub struct WordEmbedder<S> {
	source: S,
}

impl<S: EmbeddingSource> WordEmbedder<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Dimension of every vector returned.
	pub fn dimension(&self) -> usize {
		self.source.dimension()
	}

	/// Returns the vector of `word`, or a zero vector if it is unknown.
	pub fn get_vector(&self, word: &str) -> Vec<f32> {
		match self.source.lookup(word) {
			Some(vector) => vector.to_vec(),
			None => vec![0.0; self.dimension()],
		}
	}

	/// Averages the vectors of the tokens of `document`.
	///
	/// Returns the zero vector if no token has a non-zero vector.
	pub fn embed_document(&self, document: &str, tokenizer: &dyn Tokenizer) -> Vec<f32> {
		let tokens = tokenizer.tokenize(document);
		let known: Vec<&[f32]> = tokens
			.iter()
			.filter_map(|token| self.source.lookup(token))
			.filter(|vector| !math::is_zero(vector))
			.collect();

		if known.is_empty() && !tokens.is_empty() {
			warn!("none of the {} tokens of the document has an embedding", tokens.len());
		}
		math::mean(known, self.dimension())
	}

	/// Cosine similarity between two words.
	///
	/// # Errors
	/// Returns `UnknownWord` if either word is missing from the table.
	pub fn similarity(&self, first: &str, second: &str) -> Result<f32> {
		let a = self.known_vector(first)?;
		let b = self.known_vector(second)?;
		Ok(math::cosine_similarity(a, b))
	}

	/// The `top_n` words closest to `word`, by decreasing cosine similarity.
	///
	/// The query word itself is excluded. Ties are ordered by word.
	///
	/// # Errors
	/// Returns `UnknownWord` if `word` is missing from the table.
	pub fn most_similar(&self, word: &str, top_n: usize) -> Result<Vec<(String, f32)>> {
		let query = self.known_vector(word)?;

		let mut scored: Vec<(&str, f32)> = self
			.source
			.words()
			.filter(|candidate| *candidate != word)
			.filter_map(|candidate| {
				self.source
					.lookup(candidate)
					.map(|vector| (candidate, math::cosine_similarity(query, vector)))
			})
			.collect();

		scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
			Ordering::Equal => a.0.cmp(b.0),
			other => other,
		});

		Ok(scored
			.into_iter()
			.take(top_n)
			.map(|(candidate, score)| (candidate.to_owned(), score))
			.collect())
	}

	fn known_vector(&self, word: &str) -> Result<&[f32]> {
		self.source.lookup(word).ok_or_else(|| NlpError::UnknownWord(word.to_owned()))
	}
}
