use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::EmbeddingSource;
use crate::error::{NlpError, Result};

/// In-memory embedding table with a fixed vector dimension.
///
/// # Invariants
/// - Every stored vector has exactly `dimension` components
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "RawEmbeddingTable")]
pub struct EmbeddingTable {
	dimension: usize,
	vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
	/// Creates an empty table for vectors of length `dimension`.
	pub fn new(dimension: usize) -> Self {
		Self { dimension, vectors: HashMap::new() }
	}

	/// Builds a table from `(word, vector)` pairs.
	///
	/// # Errors
	/// Returns `DimensionMismatch` if a vector is not `dimension` long.
	pub fn from_pairs<I, S>(dimension: usize, pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (S, Vec<f32>)>,
		S: Into<String>,
	{
		let mut table = Self::new(dimension);
		for (word, vector) in pairs {
			table.insert(word, vector)?;
		}
		Ok(table)
	}

	/// Adds or replaces the vector of `word`.
	///
	/// # Errors
	/// Returns `DimensionMismatch` if the vector is not `dimension` long.
	pub fn insert<S: Into<String>>(&mut self, word: S, vector: Vec<f32>) -> Result<()> {
		if vector.len() != self.dimension {
			return Err(NlpError::DimensionMismatch { expected: self.dimension, got: vector.len() });
		}
		self.vectors.insert(word.into(), vector);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}
}

#[derive(Deserialize)]
struct RawEmbeddingTable {
	dimension: usize,
	vectors: HashMap<String, Vec<f32>>,
}

impl TryFrom<RawEmbeddingTable> for EmbeddingTable {
	type Error = NlpError;

	fn try_from(raw: RawEmbeddingTable) -> Result<Self> {
		if let Some(vector) = raw.vectors.values().find(|vector| vector.len() != raw.dimension) {
			return Err(NlpError::DimensionMismatch { expected: raw.dimension, got: vector.len() });
		}
		Ok(Self { dimension: raw.dimension, vectors: raw.vectors })
	}
}

impl EmbeddingSource for EmbeddingTable {
	fn dimension(&self) -> usize {
		self.dimension
	}

	fn lookup(&self, word: &str) -> Option<&[f32]> {
		self.vectors.get(word).map(Vec::as_slice)
	}

	fn words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
		Box::new(self.vectors.keys().map(String::as_str))
	}
}
