//! End-to-end text classification pipeline.
//!
//! A `TextPipeline` routes raw text through a vectorizer (which carries its
//! own tokenizer) before handing fixed-width feature vectors to a
//! `Classifier`. The classifier is an external collaborator: this crate only
//! defines the seam.

use log::debug;

use crate::error::{NlpError, Result};
use crate::vectorizer::Vectorizer;

/// Consumer of feature vectors produced by a vectorizer.
///
/// `W` is the weight type of the vectors (`usize` for counts, `f64` for TF-IDF).
pub trait Classifier<W> {
	/// Predicted label type.
	type Label;

	/// Trains on one feature vector per label.
	fn fit(&mut self, features: &[Vec<W>], labels: &[Self::Label]) -> Result<()>;

	/// Predicts one label per feature vector.
	fn predict(&self, features: &[Vec<W>]) -> Result<Vec<Self::Label>>;
}

/// Tokenizer + vectorizer + classifier composition.
#[derive(Clone, Debug)]
pub struct TextPipeline<V, C> {
	vectorizer: V,
	classifier: C,
}

impl<V, C> TextPipeline<V, C>
where
	V: Vectorizer,
	C: Classifier<V::Weight>,
{
	pub fn new(vectorizer: V, classifier: C) -> Self {
		Self { vectorizer, classifier }
	}

	pub fn vectorizer(&self) -> &V {
		&self.vectorizer
	}

	pub fn classifier(&self) -> &C {
		&self.classifier
	}

	/// Fits the vectorizer on `corpus`, then the classifier on its vectors.
	///
	/// # Errors
	/// - `InvalidConfiguration` if `corpus` and `labels` differ in length.
	/// - `NotFitted` if the corpus yields an empty vocabulary.
	/// - Any error reported by the classifier.
	pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S], labels: &[C::Label]) -> Result<()> {
		if corpus.len() != labels.len() {
			return Err(NlpError::InvalidConfiguration(format!(
				"got {} documents but {} labels",
				corpus.len(),
				labels.len()
			)));
		}

		let features = self.vectorizer.fit_transform(corpus)?;
		self.classifier.fit(&features, labels)?;
		debug!("pipeline fitted on {} documents", corpus.len());
		Ok(())
	}

	/// Predicts the label of a single text.
	///
	/// # Errors
	/// Returns `NotFitted` if the vectorizer was never fitted, and
	/// `PredictionCount` if the classifier does not return one label.
	pub fn process(&self, text: &str) -> Result<C::Label> {
		self.process_batch(&[text])?
			.into_iter()
			.next()
			.ok_or(NlpError::PredictionCount { expected: 1, got: 0 })
	}

	/// Predicts one label per text, in order.
	///
	/// # Errors
	/// Returns `NotFitted` if the vectorizer was never fitted, and
	/// `PredictionCount` if the classifier returns a label count other
	/// than `texts.len()`.
	pub fn process_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<C::Label>> {
		let features = self.vectorizer.transform(texts)?;
		let labels = self.classifier.predict(&features)?;
		if labels.len() != texts.len() {
			return Err(NlpError::PredictionCount { expected: texts.len(), got: labels.len() });
		}
		Ok(labels)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokenizer::SimpleTokenizer;
	use crate::vectorizer::{CountVectorizer, TfidfVectorizer};

	trait AsF64: Copy {
		fn as_f64(self) -> f64;
	}

	impl AsF64 for usize {
		fn as_f64(self) -> f64 {
			self as f64
		}
	}

	impl AsF64 for f64 {
		fn as_f64(self) -> f64 {
			self
		}
	}

	/// Nearest centroid over dense vectors, enough to exercise the seam.
	#[derive(Default)]
	struct NearestCentroid {
		centroids: Vec<(Vec<f64>, &'static str)>,
	}

	impl<W: AsF64> Classifier<W> for NearestCentroid {
		type Label = &'static str;

		fn fit(&mut self, features: &[Vec<W>], labels: &[&'static str]) -> Result<()> {
			let mut distinct: Vec<&'static str> = labels.to_vec();
			distinct.sort();
			distinct.dedup();

			self.centroids = distinct
				.into_iter()
				.map(|label| {
					let rows: Vec<_> = features.iter().zip(labels).filter(|(_, l)| **l == label).collect();
					let mut centroid = vec![0.0; features[0].len()];
					for (row, _) in &rows {
						for (c, w) in centroid.iter_mut().zip(row.iter()) {
							*c += w.as_f64() / rows.len() as f64;
						}
					}
					(centroid, label)
				})
				.collect();
			Ok(())
		}

		fn predict(&self, features: &[Vec<W>]) -> Result<Vec<&'static str>> {
			if self.centroids.is_empty() {
				return Err(NlpError::NotFitted("NearestCentroid"));
			}
			Ok(features
				.iter()
				.map(|row| {
					let distance = |centroid: &[f64]| -> f64 {
						centroid.iter().zip(row).map(|(c, w)| (c - w.as_f64()).powi(2)).sum()
					};
					self.centroids
						.iter()
						.min_by(|a, b| distance(&a.0).total_cmp(&distance(&b.0)))
						.map(|(_, label)| *label)
						.unwrap_or_default()
				})
				.collect())
		}
	}

	const CORPUS: [&str; 4] = [
		"the market rallied on strong earnings",
		"stocks rallied as earnings beat",
		"the team won the final match",
		"a late goal won the match",
	];
	const LABELS: [&str; 4] = ["finance", "finance", "sport", "sport"];

	#[test]
	fn routes_text_through_the_vectorizer() {
		let mut pipeline = TextPipeline::new(CountVectorizer::new(SimpleTokenizer::new()), NearestCentroid::default());
		pipeline.fit(&CORPUS, &LABELS).unwrap();

		assert_eq!(pipeline.process("earnings rallied").unwrap(), "finance");
		assert_eq!(pipeline.process_batch(&["who won the match?", "strong earnings"]).unwrap(), vec!["sport", "finance"]);
		assert!(pipeline.process_batch::<&str>(&[]).unwrap().is_empty());
	}

	#[test]
	fn works_with_tfidf_features() {
		let mut pipeline = TextPipeline::new(TfidfVectorizer::new(SimpleTokenizer::new()), NearestCentroid::default());
		pipeline.fit(&CORPUS, &LABELS).unwrap();
		assert_eq!(pipeline.process("a goal in the final").unwrap(), "sport");
	}

	#[test]
	fn process_before_fit_fails() {
		let pipeline = TextPipeline::new(CountVectorizer::new(SimpleTokenizer::new()), NearestCentroid::default());
		assert!(matches!(pipeline.process("anything"), Err(NlpError::NotFitted("CountVectorizer"))));
	}

	/// Answers a fixed label list whatever the input.
	struct Canned(Vec<&'static str>);

	impl Classifier<usize> for Canned {
		type Label = &'static str;

		fn fit(&mut self, _: &[Vec<usize>], _: &[&'static str]) -> Result<()> {
			Ok(())
		}

		fn predict(&self, _: &[Vec<usize>]) -> Result<Vec<&'static str>> {
			Ok(self.0.clone())
		}
	}

	#[test]
	fn wrong_prediction_count_is_reported() {
		let mut silent = TextPipeline::new(CountVectorizer::new(SimpleTokenizer::new()), Canned(vec![]));
		silent.fit(&CORPUS, &LABELS).unwrap();
		assert!(matches!(silent.process("the match"), Err(NlpError::PredictionCount { expected: 1, got: 0 })));

		let mut chatty = TextPipeline::new(CountVectorizer::new(SimpleTokenizer::new()), Canned(vec!["first", "second"]));
		chatty.fit(&CORPUS, &LABELS).unwrap();
		assert!(matches!(chatty.process("the match"), Err(NlpError::PredictionCount { expected: 1, got: 2 })));
		assert_eq!(chatty.process_batch(&["a", "b"]).unwrap(), vec!["first", "second"]);
	}

	#[test]
	fn mismatched_labels_are_rejected() {
		let mut pipeline = TextPipeline::new(CountVectorizer::new(SimpleTokenizer::new()), NearestCentroid::default());
		assert!(matches!(pipeline.fit(&CORPUS, &LABELS[..2]), Err(NlpError::InvalidConfiguration(_))));
	}
}
