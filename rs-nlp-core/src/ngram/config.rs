use serde::{Deserialize, Serialize};

use crate::error::{NlpError, Result};

/// Sentinel prepended (`n - 1` times) to every fitted document.
pub const START_TOKEN: &str = "<s>";

/// Sentinel appended to every fitted document.
pub const END_TOKEN: &str = "</s>";

/// Construction parameters of an `NGramModel`.
///
/// Missing fields take their default value when deserialized, and the
/// decoded values go through `validate`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawNGramConfig")]
pub struct NGramConfig {
	/// Order of the model (2 = bigram, 3 = trigram). Must be >= 1.
	pub n: usize,

	/// Sentence-start sentinel.
	pub start_token: String,

	/// Sentence-end sentinel.
	pub end_token: String,
}

impl NGramConfig {
	/// Default sentinels with order `n`.
	pub fn new(n: usize) -> Self {
		Self { n, ..Self::default() }
	}

	/// Checks the parameters.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `n < 1`, if a sentinel is empty,
	/// or if both sentinels are equal.
	pub fn validate(&self) -> Result<()> {
		if self.n < 1 {
			return Err(NlpError::InvalidConfiguration(format!("n must be >= 1, got {}", self.n)));
		}
		if self.start_token.is_empty() || self.end_token.is_empty() {
			return Err(NlpError::InvalidConfiguration("sentinel tokens must not be empty".to_owned()));
		}
		if self.start_token == self.end_token {
			return Err(NlpError::InvalidConfiguration(format!(
				"start and end sentinels must differ, both are {:?}",
				self.start_token
			)));
		}
		Ok(())
	}
}

impl Default for NGramConfig {
	fn default() -> Self {
		Self { n: 2, start_token: START_TOKEN.to_owned(), end_token: END_TOKEN.to_owned() }
	}
}

/// Unchecked wire form of `NGramConfig`.
#[derive(Deserialize)]
#[serde(default)]
struct RawNGramConfig {
	n: usize,
	start_token: String,
	end_token: String,
}

impl Default for RawNGramConfig {
	fn default() -> Self {
		let NGramConfig { n, start_token, end_token } = NGramConfig::default();
		Self { n, start_token, end_token }
	}
}

impl TryFrom<RawNGramConfig> for NGramConfig {
	type Error = NlpError;

	fn try_from(raw: RawNGramConfig) -> Result<Self> {
		let config = Self { n: raw.n, start_token: raw.start_token, end_token: raw.end_token };
		config.validate()?;
		Ok(config)
	}
}
