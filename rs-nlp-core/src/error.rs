/// Errors produced by the toolkit.
///
/// Unseen n-gram contexts and out-of-vocabulary documents are not errors:
/// they degrade to empty distributions and zero vectors.
#[derive(thiserror::Error, Debug)]
pub enum NlpError {
	/// A construction-time parameter is out of range.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// A query was issued before a successful `fit`.
	#[error("{0} has not been fitted yet, call fit() first")]
	NotFitted(&'static str),

	/// A token pattern failed to compile.
	#[error("invalid token pattern: {0}")]
	InvalidPattern(#[from] regex::Error),

	/// An embedding vector does not match the table dimension.
	#[error("dimension mismatch: expected {expected}, got {got}")]
	DimensionMismatch { expected: usize, got: usize },

	/// The word is not present in the embedding table.
	#[error("word not in embedding table: {0}")]
	UnknownWord(String),

	/// A classifier did not return one label per input.
	#[error("classifier returned {got} predictions for {expected} inputs")]
	PredictionCount { expected: usize, got: usize },

	/// Deserialized data breaks an invariant of the type it decodes into.
	#[error("inconsistent data: {0}")]
	InconsistentData(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A text resource could not be parsed.
	#[error("parse error at line {line}: {message}")]
	Parse { line: usize, message: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NlpError>;
