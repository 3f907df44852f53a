use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::NlpError;

/// Continuations observed after one n-gram context.
///
/// A `State` is a node of the Markov chain: its outgoing edges are the
/// next tokens seen after the context, weighted by how many times they
/// were observed. The context itself is the key under which the state is
/// stored in the model.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during fitting
/// - Expose the conditional distribution `count / total`
/// - Sample the next token using weighted random sampling
/// - Merge with the state of the same context from another model
///
/// ## Invariants
/// - `total` is the sum of all transition counts
/// - Each transition occurrence count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "RawState")]
pub(crate) struct State {
	/// Outgoing transitions indexed by the next token.
	/// Ordered so that sampling with a seeded generator is reproducible.
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: BTreeMap<String, usize>,
	/// Number of times the context was observed.
	total: usize,
}

impl State {
	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(occurrence) => *occurrence += 1,
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Conditional probability of every observed continuation.
	///
	/// The returned values sum to 1.0 (up to rounding) when the state is
	/// not empty.
	pub fn probabilities(&self) -> BTreeMap<String, f64> {
		let total = self.total as f64;
		self.transitions
			.iter()
			.map(|(next, occurrence)| (next.clone(), *occurrence as f64 / total))
			.collect()
	}

	/// Picks the next token with probability proportional to its count.
	///
	/// This method performs:
	/// - one draw in `0..total` from `rng`
	/// - a cumulative subtraction over the ordered transitions
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (next, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next.as_str());
			}
			r -= occurrence;
		}

		// Unreachable while `total` matches the transition counts.
		self.transitions.keys().next_back().map(String::as_str)
	}

	/// Merges another state for the same context into this one.
	///
	/// Transition occurrence counts are summed.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0) += *occurrence;
		}
		self.total += other.total;
	}
}

#[derive(Deserialize)]
struct RawState {
	transitions: BTreeMap<String, usize>,
	total: usize,
}

impl TryFrom<RawState> for State {
	type Error = NlpError;

	fn try_from(raw: RawState) -> Result<Self, NlpError> {
		if let Some((next, _)) = raw.transitions.iter().find(|(_, occurrence)| **occurrence == 0) {
			return Err(NlpError::InconsistentData(format!("transition toward {next:?} has no occurrence")));
		}
		let sum = raw.transitions.values().try_fold(0usize, |acc, occurrence| acc.checked_add(*occurrence));
		if sum != Some(raw.total) {
			return Err(NlpError::InconsistentData(format!(
				"state total is {} but does not match the sum of its transitions",
				raw.total
			)));
		}
		Ok(Self { transitions: raw.transitions, total: raw.total })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn state(transitions: &[(&str, usize)]) -> State {
		let mut state = State::default();
		for (next, count) in transitions {
			for _ in 0..*count {
				state.add_transition(next);
			}
		}
		state
	}

	#[test]
	fn probabilities_sum_to_one() {
		let state = state(&[("a", 3), ("b", 1)]);
		let probabilities = state.probabilities();
		assert_eq!(state.total, 4);
		assert!((probabilities["a"] - 0.75).abs() < 1e-12);
		assert!((probabilities["b"] - 0.25).abs() < 1e-12);
		assert!((probabilities.values().sum::<f64>() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn empty_state_samples_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(State::default().sample(&mut rng), None);
	}

	#[test]
	fn sampling_follows_counts() {
		let state = state(&[("a", 3), ("b", 1)]);
		let mut rng = StdRng::seed_from_u64(42);
		let draws = 4000;
		let hits = (0..draws).filter(|_| state.sample(&mut rng) == Some("a")).count();
		let frequency = hits as f64 / draws as f64;
		assert!((frequency - 0.75).abs() < 0.05, "frequency of 'a' was {frequency}");
	}

	#[test]
	fn single_transition_is_always_sampled() {
		let state = state(&[("only", 2)]);
		let mut rng = StdRng::seed_from_u64(3);
		assert!((0..50).all(|_| state.sample(&mut rng) == Some("only")));
	}

	#[test]
	fn decoding_checks_the_total() {
		let valid = state(&[("a", 2), ("b", 1)]);
		let bytes = postcard::to_stdvec(&valid).unwrap();
		assert_eq!(postcard::from_bytes::<State>(&bytes).unwrap(), valid);

		let mut inflated = valid.clone();
		inflated.total = 10;
		let bytes = postcard::to_stdvec(&inflated).unwrap();
		assert!(postcard::from_bytes::<State>(&bytes).is_err());

		let mut zero = valid;
		zero.transitions.insert("c".to_owned(), 0);
		let bytes = postcard::to_stdvec(&zero).unwrap();
		assert!(postcard::from_bytes::<State>(&bytes).is_err());
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = state(&[("a", 1), ("b", 2)]);
		left.merge(&state(&[("b", 1), ("c", 4)]));
		assert_eq!(left, state(&[("a", 1), ("b", 3), ("c", 4)]));
	}
}
