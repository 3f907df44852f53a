use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::Tokenizer;
use crate::error::Result;

/// Word runs, or any single character that is neither a word character nor whitespace.
pub const DEFAULT_PATTERN: &str = r"\w+|[^\w\s]";

// Compile-time constant pattern, cannot fail.
static DEFAULT_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(DEFAULT_PATTERN).expect("default token pattern is valid"));

/// Extracts tokens from lower-cased text with a regular expression.
///
/// Matches are collected greedily, left to right, without overlap. With
/// the default pattern this yields word tokens and single punctuation
/// tokens, and drops whitespace entirely.
///
/// The pattern is fixed at construction. A one-off pattern can be passed to
/// `tokenize_with`, which leaves the instance unchanged.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
	pattern: Regex,
}

impl RegexTokenizer {
	/// Creates a tokenizer using `DEFAULT_PATTERN`.
	pub fn new() -> Self {
		Self { pattern: DEFAULT_REGEX.clone() }
	}

	/// Creates a tokenizer using a custom pattern.
	///
	/// # Errors
	/// Returns `InvalidPattern` if the pattern does not compile.
	pub fn with_pattern(pattern: &str) -> Result<Self> {
		let pattern = Regex::new(pattern)?;
		debug!("regex tokenizer built with pattern {:?}", pattern.as_str());
		Ok(Self { pattern })
	}

	/// Returns the pattern used by this instance.
	pub fn pattern(&self) -> &str {
		self.pattern.as_str()
	}

	/// Tokenizes `text` with `pattern` for this call only.
	///
	/// # Errors
	/// Returns `InvalidPattern` if the pattern does not compile.
	pub fn tokenize_with(&self, text: &str, pattern: &str) -> Result<Vec<String>> {
		let pattern = Regex::new(pattern)?;
		Ok(Self::extract(&pattern, text))
	}

	fn extract(pattern: &Regex, text: &str) -> Vec<String> {
		let lowered = text.to_lowercase();
		pattern
			.find_iter(&lowered)
			.map(|m| m.as_str())
			.filter(|token| !token.is_empty())
			.map(str::to_owned)
			.collect()
	}
}

impl Default for RegexTokenizer {
	fn default() -> Self {
		Self::new()
	}
}

impl Tokenizer for RegexTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		Self::extract(&self.pattern, text)
	}

	fn name(&self) -> &'static str {
		"regex"
	}
}
