use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::NlpError;

/// Dense, zero-based mapping from token to index.
///
/// Indices follow the lexicographic order of the tokens, so building a
/// vocabulary twice from the same tokens gives the same mapping.
///
/// # Invariants
/// - Indices are contiguous in `[0, len)`
/// - `tokens[index[t]] == t` for every token `t`
///
/// Only the ordered tokens are serialized; the lookup is rebuilt on decode.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Vocabulary {
	/// Token lookup.
	index: HashMap<String, usize>,
	/// Tokens in index order.
	tokens: Vec<String>,
}

impl Vocabulary {
	/// Builds a vocabulary from any collection of tokens (duplicates are ignored).
	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let sorted: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
		let tokens: Vec<String> = sorted.into_iter().collect();
		let index = tokens.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
		Self { index, tokens }
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Index of `token`, if known.
	pub fn get(&self, token: &str) -> Option<usize> {
		self.index.get(token).copied()
	}

	/// Token stored at `index`, if in range.
	pub fn token(&self, index: usize) -> Option<&str> {
		self.tokens.get(index).map(String::as_str)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.index.contains_key(token)
	}

	/// Iterates over `(token, index)` pairs in index order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.tokens.iter().enumerate().map(|(i, t)| (t.as_str(), i))
	}

	/// Counts the occurrences of every vocabulary token in `tokens`.
	///
	/// Tokens outside the vocabulary are ignored.
	pub fn count<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
		let mut counts = vec![0; self.len()];
		for token in tokens {
			if let Some(i) = self.get(token.as_ref()) {
				counts[i] += 1;
			}
		}
		counts
	}
}

impl From<Vocabulary> for Vec<String> {
	fn from(vocabulary: Vocabulary) -> Self {
		vocabulary.tokens
	}
}

impl TryFrom<Vec<String>> for Vocabulary {
	type Error = NlpError;

	fn try_from(tokens: Vec<String>) -> Result<Self, NlpError> {
		if let Some(pair) = tokens.windows(2).find(|pair| pair[0] >= pair[1]) {
			return Err(NlpError::InconsistentData(format!(
				"vocabulary tokens are not strictly sorted at {:?}",
				pair[1]
			)));
		}
		let index = tokens.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
		Ok(Self { index, tokens })
	}
}
