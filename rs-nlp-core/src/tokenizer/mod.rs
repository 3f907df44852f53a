//! Text tokenization.
//!
//! This module provides the `Tokenizer` capability shared by every other
//! component of the crate, and two strategies:
//! - `SimpleTokenizer`: whitespace splitting with standalone punctuation
//! - `RegexTokenizer`: left-to-right pattern extraction
//!
//! Both strategies lower-case their input, so token equality is
//! case-insensitive by convention.

use std::sync::Arc;

/// Whitespace and punctuation splitting.
pub mod simple;

/// Regex-based token extraction.
pub mod pattern;

pub use pattern::RegexTokenizer;
pub use simple::SimpleTokenizer;

/// Turns raw text into an ordered sequence of tokens.
///
/// Implementations are pure functions of their construction-time
/// configuration: calling `tokenize` never changes later results.
pub trait Tokenizer {
	/// Splits `text` into tokens, in order of appearance.
	fn tokenize(&self, text: &str) -> Vec<String>;

	/// Short identifier of the strategy, used in logs.
	fn name(&self) -> &'static str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
	fn tokenize(&self, text: &str) -> Vec<String> {
		(**self).tokenize(text)
	}

	fn name(&self) -> &'static str {
		(**self).name()
	}
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
	fn tokenize(&self, text: &str) -> Vec<String> {
		(**self).tokenize(text)
	}

	fn name(&self) -> &'static str {
		(**self).name()
	}
}

impl<T: Tokenizer + ?Sized> Tokenizer for Arc<T> {
	fn tokenize(&self, text: &str) -> Vec<String> {
		(**self).tokenize(text)
	}

	fn name(&self) -> &'static str {
		(**self).name()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shared_tokenizers_delegate() {
		let tokenizer = SimpleTokenizer::new();
		let by_ref: &dyn Tokenizer = &tokenizer;
		let boxed: Box<dyn Tokenizer> = Box::new(RegexTokenizer::new());
		let shared = Arc::new(SimpleTokenizer::new());

		assert_eq!(by_ref.tokenize("Hi!"), vec!["hi", "!"]);
		assert_eq!(boxed.tokenize("Hi!"), vec!["hi", "!"]);
		assert_eq!(shared.tokenize("Hi!"), vec!["hi", "!"]);
		assert_eq!(boxed.name(), "regex");
		assert_eq!(shared.name(), "simple");
	}
}
