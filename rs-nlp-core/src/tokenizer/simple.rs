use super::Tokenizer;

/// Characters split off as standalone tokens.
const PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Splits lower-cased text on whitespace, with `. , ! ?` as their own tokens.
///
/// Runs of whitespace are collapsed, so empty tokens are never emitted.
///
/// Example: `"Hello, world!"` → `["hello", ",", "world", "!"]`
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
	/// Creates a new simple tokenizer.
	pub fn new() -> Self {
		Self
	}
}

impl Tokenizer for SimpleTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut spaced = String::with_capacity(text.len());
		for c in text.chars().flat_map(char::to_lowercase) {
			if PUNCTUATION.contains(&c) {
				spaced.push(' ');
				spaced.push(c);
				spaced.push(' ');
			} else {
				spaced.push(c);
			}
		}

		spaced.split_whitespace().map(str::to_owned).collect()
	}

	fn name(&self) -> &'static str {
		"simple"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_punctuation_and_lowercases() {
		let tokens = SimpleTokenizer::new().tokenize("Hello, world! This is a test.");
		assert_eq!(tokens, vec!["hello", ",", "world", "!", "this", "is", "a", "test", "."]);
	}

	#[test]
	fn ellipsis_becomes_separate_dots() {
		let tokens = SimpleTokenizer::new().tokenize("NLP is fascinating... isn't it?");
		assert_eq!(
			tokens,
			vec!["nlp", "is", "fascinating", ".", ".", ".", "isn't", "it", "?"]
		);
	}

	#[test]
	fn never_emits_empty_tokens() {
		let tokenizer = SimpleTokenizer::new();
		assert!(tokenizer.tokenize("").is_empty());
		assert!(tokenizer.tokenize("   \t\n ").is_empty());
		assert_eq!(tokenizer.tokenize("  a \t\tb  "), vec!["a", "b"]);
		assert!(tokenizer.tokenize("?!. ,").iter().all(|t| !t.is_empty()));
	}
}
