//! Vocabulary-indexed document vectorizers.
//!
//! Both variants share the same contract: `fit` learns a sorted
//! token → index `Vocabulary` from a corpus, `transform` maps documents to
//! fixed-width vectors in vocabulary order.
//!
//! - `CountVectorizer`: raw occurrence counts
//! - `TfidfVectorizer`: smoothed TF-IDF weights, L2-normalized by default

use crate::error::Result;

/// Shared token → index mapping.
pub mod vocabulary;

/// Raw count vectors.
pub mod count;

/// TF-IDF vectors.
pub mod tfidf;

pub use count::CountVectorizer;
pub use tfidf::TfidfVectorizer;
pub use vocabulary::Vocabulary;

/// Capability shared by every vectorizer.
///
/// Out-of-vocabulary tokens never produce an entry: there is no unknown bucket.
pub trait Vectorizer {
	/// Numeric type of a vector component.
	type Weight;

	/// Learns the vocabulary (and any corpus statistic) from `corpus`.
	///
	/// Replaces whatever a previous `fit` learned. An empty corpus leaves an
	/// empty vocabulary, which `transform` reports as not fitted.
	fn fit<S: AsRef<str>>(&mut self, corpus: &[S]);

	/// Maps each document to a vector of `vocabulary().len()` weights.
	///
	/// # Errors
	/// Returns `NotFitted` if the vocabulary is empty.
	fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<Vec<Self::Weight>>>;

	/// Fits on `corpus`, then transforms the same corpus.
	fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<Vec<Vec<Self::Weight>>> {
		self.fit(corpus);
		self.transform(corpus)
	}

	/// The vocabulary learned by the last `fit`.
	fn vocabulary(&self) -> &Vocabulary;
}
