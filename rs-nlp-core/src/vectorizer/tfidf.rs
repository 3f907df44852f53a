use std::collections::HashSet;

use log::{debug, warn};

use super::{Vectorizer, Vocabulary};
use crate::error::{NlpError, Result};
use crate::math;
use crate::tokenizer::Tokenizer;

/// Represents documents as vectors of TF-IDF weights.
///
/// - `tf(t)`: raw occurrence count of `t` in the document (not divided by
///   the document length)
/// - `idf(t) = ln(N / (df(t) + 1)) + 1`, where `N` is the number of fitted
///   documents and `df(t)` the number of them containing `t`
///
/// Vectors are L2-normalized unless their norm is zero, or normalization
/// was disabled with `without_normalization`.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer<T: Tokenizer> {
	tokenizer: T,
	vocabulary: Vocabulary,
	/// IDF weight per vocabulary index.
	idf: Vec<f64>,
	normalize: bool,
}

impl<T: Tokenizer> TfidfVectorizer<T> {
	/// Creates an unfitted, normalizing vectorizer.
	pub fn new(tokenizer: T) -> Self {
		Self { tokenizer, vocabulary: Vocabulary::default(), idf: Vec::new(), normalize: true }
	}

	/// Disables L2 normalization of the output vectors.
	pub fn without_normalization(mut self) -> Self {
		self.normalize = false;
		self
	}

	pub fn tokenizer(&self) -> &T {
		&self.tokenizer
	}

	/// IDF weight of `token`, if it belongs to the fitted vocabulary.
	pub fn idf(&self, token: &str) -> Option<f64> {
		self.vocabulary.get(token).map(|i| self.idf[i])
	}

	/// Iterates over `(token, idf)` pairs in vocabulary order.
	pub fn idf_table(&self) -> impl Iterator<Item = (&str, f64)> {
		self.vocabulary.iter().map(|(token, i)| (token, self.idf[i]))
	}

	/// Smoothed inverse document frequency.
	fn smoothed_idf(documents: usize, document_frequency: usize) -> f64 {
		(documents as f64 / (document_frequency as f64 + 1.0)).ln() + 1.0
	}
}

impl<T: Tokenizer> Vectorizer for TfidfVectorizer<T> {
	type Weight = f64;

	fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
		let documents: Vec<HashSet<String>> = corpus
			.iter()
			.map(|doc| self.tokenizer.tokenize(doc.as_ref()).into_iter().collect())
			.collect();

		self.vocabulary = Vocabulary::from_tokens(documents.iter().flatten().cloned());

		let mut document_frequency = vec![0usize; self.vocabulary.len()];
		for distinct in &documents {
			for token in distinct {
				if let Some(i) = self.vocabulary.get(token) {
					document_frequency[i] += 1;
				}
			}
		}

		let n = documents.len();
		self.idf = document_frequency
			.into_iter()
			.map(|df| Self::smoothed_idf(n, df))
			.collect();

		if self.vocabulary.is_empty() {
			warn!("tf-idf vectorizer fitted on a corpus without tokens ({} documents)", n);
		} else {
			debug!(
				"tf-idf vectorizer fitted: {} documents, {} tokens ({} tokenizer)",
				n,
				self.vocabulary.len(),
				self.tokenizer.name()
			);
		}
	}

	fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<Vec<f64>>> {
		if self.vocabulary.is_empty() {
			return Err(NlpError::NotFitted("TfidfVectorizer"));
		}

		Ok(documents
			.iter()
			.map(|doc| {
				let counts = self.vocabulary.count(&self.tokenizer.tokenize(doc.as_ref()));
				let mut weights: Vec<f64> = counts
					.into_iter()
					.zip(&self.idf)
					.map(|(tf, idf)| tf as f64 * idf)
					.collect();
				if self.normalize {
					math::l2_normalize(&mut weights);
				}
				weights
			})
			.collect())
	}

	fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}
}
