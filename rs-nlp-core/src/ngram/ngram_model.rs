use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::NGramConfig;
use super::state::State;
use crate::error::{NlpError, Result};
use crate::tokenizer::Tokenizer;

/// Represents a token-level n-gram language model.
///
/// The `NGramModel` stores one state per context of `n-1` tokens and
/// predicts the next token from the counts observed during fitting.
///
/// # Responsibilities
/// - Pad documents with sentence sentinels and count every n-gram window
/// - Expose the conditional distribution of the next token
/// - Generate text by weighted random sampling
/// - Merge with another model of the same configuration
///
/// # Invariants
/// - `config.n` is always >= 1
/// - Each key of `states` holds exactly `n-1` tokens
/// - All state transitions have occurrence counts >= 1
///
/// The tokenizer is not serialized: a deserialized model gets
/// `T::default()`, use `with_tokenizer` to attach another one. Decoding
/// fails if the data breaks one of the invariants above.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(try_from = "SavedModel", bound(deserialize = "T: Default"))]
pub struct NGramModel<T> {
	#[serde(skip)]
	tokenizer: T,

	config: NGramConfig,

	/// Mapping from a context (`n-1` tokens) to its continuations.
	states: HashMap<Vec<String>, State>,

	/// Every token observed, sentinels included.
	vocabulary: BTreeSet<String>,
}

/// Learned part of an `NGramModel`, as decoded before any check.
#[derive(Deserialize)]
struct SavedModel {
	config: NGramConfig,
	states: HashMap<Vec<String>, State>,
	vocabulary: BTreeSet<String>,
}

impl<T: Default> TryFrom<SavedModel> for NGramModel<T> {
	type Error = NlpError;

	fn try_from(saved: SavedModel) -> Result<Self> {
		// `config` validated itself while decoding, so n >= 1.
		let width = saved.config.n - 1;
		if let Some(context) = saved.states.keys().find(|context| context.len() != width) {
			return Err(NlpError::InconsistentData(format!(
				"context {context:?} does not hold {width} tokens"
			)));
		}
		Ok(Self { tokenizer: T::default(), config: saved.config, states: saved.states, vocabulary: saved.vocabulary })
	}
}

impl<T: Tokenizer> NGramModel<T> {
	/// Creates an untrained model of order `n` with the default sentinels.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `n < 1`.
	pub fn new(tokenizer: T, n: usize) -> Result<Self> {
		Self::with_config(tokenizer, NGramConfig::new(n))
	}

	/// Creates an untrained model from a full configuration.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if the configuration does not validate.
	pub fn with_config(tokenizer: T, config: NGramConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { tokenizer, config, states: HashMap::new(), vocabulary: BTreeSet::new() })
	}

	/// Order `n` of the model.
	pub fn order(&self) -> usize {
		self.config.n
	}

	pub fn config(&self) -> &NGramConfig {
		&self.config
	}

	pub fn tokenizer(&self) -> &T {
		&self.tokenizer
	}

	/// Every token observed so far, sentinels included.
	pub fn vocabulary(&self) -> &BTreeSet<String> {
		&self.vocabulary
	}

	/// True once at least one document has been fitted.
	pub fn is_trained(&self) -> bool {
		!self.states.is_empty()
	}

	/// Number of distinct contexts observed.
	pub fn context_count(&self) -> usize {
		self.states.len()
	}

	/// Replaces the tokenizer, keeping the learned counts.
	pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> NGramModel<U> {
		NGramModel { tokenizer, config: self.config, states: self.states, vocabulary: self.vocabulary }
	}

	/// Forgets every count, back to the untrained state.
	pub fn reset(&mut self) {
		self.states.clear();
		self.vocabulary.clear();
	}

	/// Adds the n-grams of every document of `corpus` to the model.
	///
	/// Counts accumulate across calls.
	///
	/// # Notes
	/// - Each document is padded with `n-1` start sentinels and one end sentinel,
	///   so even an empty document contributes one n-gram.
	pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
		for document in corpus {
			let tokens = self.tokenizer.tokenize(document.as_ref());
			self.add_tokens(tokens);
		}

		debug!(
			"{}-gram model fitted on {} documents: {} contexts, {} tokens in vocabulary",
			self.config.n,
			corpus.len(),
			self.states.len(),
			self.vocabulary.len()
		);
	}

	fn add_tokens(&mut self, tokens: Vec<String>) {
		let n = self.config.n;
		let mut padded = Vec::with_capacity(tokens.len() + n);
		padded.extend(std::iter::repeat_n(self.config.start_token.clone(), n - 1));
		padded.extend(tokens);
		padded.push(self.config.end_token.clone());

		// For each n-gram of the padded document
		for window in padded.windows(n) {
			let (context, next) = window.split_at(n - 1);
			match self.states.get_mut(context) {
				Some(state) => state.add_transition(&next[0]),
				None => {
					let mut state = State::default();
					state.add_transition(&next[0]);
					self.states.insert(context.to_vec(), state);
				}
			}
		}

		self.vocabulary.extend(padded);
	}

	/// Normalizes `context` to exactly `n-1` tokens.
	///
	/// Longer contexts keep their last `n-1` tokens, shorter ones are
	/// left-padded with start sentinels.
	fn context_key<S: AsRef<str>>(&self, context: &[S]) -> Vec<String> {
		let size = self.config.n - 1;
		let kept = &context[context.len().saturating_sub(size)..];

		let mut key = Vec::with_capacity(size);
		key.extend(std::iter::repeat_n(self.config.start_token.clone(), size - kept.len()));
		key.extend(kept.iter().map(|token| token.as_ref().to_owned()));
		key
	}

	/// Predicts the probability distribution of the next token after `context`.
	///
	/// Returns an empty map if the (normalized) context was never observed;
	/// there is no smoothing or back-off.
	///
	/// # Errors
	/// Returns `NotFitted` if the model holds no counts.
	pub fn predict_next_word<S: AsRef<str>>(&self, context: &[S]) -> Result<BTreeMap<String, f64>> {
		if !self.is_trained() {
			return Err(NlpError::NotFitted("NGramModel"));
		}

		let key = self.context_key(context);
		Ok(self.states.get(&key).map(State::probabilities).unwrap_or_default())
	}

	/// Generates text from `seed_text` using the thread-local random generator.
	///
	/// See `generate_text_with_rng`.
	pub fn generate_text(&self, seed_text: &str, max_length: usize) -> Result<String> {
		self.generate_text_with_rng(seed_text, max_length, &mut rand::rng())
	}

	/// Generates text from `seed_text`, drawing from `rng`.
	///
	/// # Behavior
	/// - Tokenizes the seed, then appends up to `max_length` sampled tokens.
	/// - Each step uses the last `n-1` tokens as context (padded if shorter).
	/// - Stops early on an unseen context or when the end sentinel is drawn.
	///
	/// # Returns
	/// The seed tokens followed by the generated ones, joined by single
	/// spaces, with start sentinels removed.
	///
	/// # Errors
	/// Returns `NotFitted` if the model holds no counts.
	pub fn generate_text_with_rng<R: Rng + ?Sized>(
		&self,
		seed_text: &str,
		max_length: usize,
		rng: &mut R,
	) -> Result<String> {
		if !self.is_trained() {
			return Err(NlpError::NotFitted("NGramModel"));
		}

		let mut tokens = self.tokenizer.tokenize(seed_text);

		for _ in 0..max_length {
			let key = self.context_key(tokens.as_slice());
			let Some(state) = self.states.get(&key) else {
				trace!("generation stopped: unseen context {:?}", key);
				break;
			};

			match state.sample(rng) {
				Some(next) if next != self.config.end_token => tokens.push(next.to_owned()),
				_ => {
					trace!("generation stopped: end of sentence");
					break;
				}
			}
		}

		let text = tokens
			.iter()
			.filter(|token| **token != self.config.start_token)
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(" ");
		Ok(text)
	}

	/// Merges another n-gram model into this one.
	///
	/// # Notes
	/// - Both models must share the same configuration (order and sentinels).
	/// - Occurrence counts for matching contexts and transitions are summed.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if the configurations do not match.
	pub fn merge<U>(&mut self, other: &NGramModel<U>) -> Result<()> {
		if self.config != other.config {
			return Err(NlpError::InvalidConfiguration(format!(
				"cannot merge n-gram models with different configurations: {:?} and {:?}",
				self.config, other.config
			)));
		}

		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state);
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}
		self.vocabulary.extend(other.vocabulary.iter().cloned());

		Ok(())
	}
}
