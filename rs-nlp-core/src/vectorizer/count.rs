use log::{debug, warn};

use super::{Vectorizer, Vocabulary};
use crate::error::{NlpError, Result};
use crate::tokenizer::Tokenizer;

/// Represents documents as vectors of token counts.
///
/// Entry `i` of a document vector is the number of times vocabulary token
/// `i` occurs in the document. No normalization is applied.
#[derive(Clone, Debug)]
pub struct CountVectorizer<T: Tokenizer> {
	tokenizer: T,
	vocabulary: Vocabulary,
}

impl<T: Tokenizer> CountVectorizer<T> {
	/// Creates an unfitted vectorizer.
	pub fn new(tokenizer: T) -> Self {
		Self { tokenizer, vocabulary: Vocabulary::default() }
	}

	pub fn tokenizer(&self) -> &T {
		&self.tokenizer
	}
}

impl<T: Tokenizer> Vectorizer for CountVectorizer<T> {
	type Weight = usize;

	fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
		let tokens = corpus.iter().flat_map(|doc| self.tokenizer.tokenize(doc.as_ref()));
		self.vocabulary = Vocabulary::from_tokens(tokens);

		if self.vocabulary.is_empty() {
			warn!("count vectorizer fitted on a corpus without tokens ({} documents)", corpus.len());
		} else {
			debug!(
				"count vectorizer fitted: {} documents, {} tokens ({} tokenizer)",
				corpus.len(),
				self.vocabulary.len(),
				self.tokenizer.name()
			);
		}
	}

	fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<Vec<usize>>> {
		if self.vocabulary.is_empty() {
			return Err(NlpError::NotFitted("CountVectorizer"));
		}

		Ok(documents
			.iter()
			.map(|doc| self.vocabulary.count(&self.tokenizer.tokenize(doc.as_ref())))
			.collect())
	}

	fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}
}
