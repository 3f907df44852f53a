use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::embedding::EmbeddingTable;
use crate::error::{NlpError, Result};

/// Reads a text file and returns one document per non-blank line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Trims each line and skips the empty ones
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let mut contents = String::new();
	File::open(&filename)?.read_to_string(&mut contents)?;

	let corpus: Vec<String> = contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect();
	debug!("read {} documents from {}", corpus.len(), filename.as_ref().display());
	Ok(corpus)
}

/// Reads an embedding table in the GloVe / word2vec text format.
///
/// Each line is `word v1 v2 ... vd`. The dimension is taken from the first
/// vector. A first line made of exactly two integers `count dimension` is
/// the word2vec header when the next vector has `dimension` components (or
/// when it is the only line and `count` is 0); otherwise it is read as the
/// one-component vector of an integer word.
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Parse` on a malformed component, or a line without a vector
/// - `DimensionMismatch` if a vector length differs from the first one
pub fn read_embedding_table<P: AsRef<Path>>(filename: P) -> Result<EmbeddingTable> {
	let reader = BufReader::new(File::open(&filename)?);
	let mut table: Option<EmbeddingTable> = None;
	// First line when it may be a word2vec header: (count, dimension, word, vector)
	let mut header: Option<(usize, usize, String, Vec<f32>)> = None;

	for (number, line) in reader.lines().enumerate() {
		let line = line?;
		let mut fields = line.split_whitespace();
		let Some(word) = fields.next() else {
			continue;
		};
		let vector = parse_vector(word, fields, number + 1)?;

		if number == 0 {
			if let Some((count, dimension)) = header_fields(word, &vector) {
				header = Some((count, dimension, word.to_owned(), vector));
				continue;
			}
		}
		if let Some((_, dimension, first, first_vector)) = header.take() {
			if dimension != vector.len() {
				table.get_or_insert_with(|| EmbeddingTable::new(first_vector.len())).insert(first, first_vector)?;
			}
		}

		table.get_or_insert_with(|| EmbeddingTable::new(vector.len())).insert(word, vector)?;
	}

	if let Some((count, _, first, first_vector)) = header {
		if count != 0 {
			table.get_or_insert_with(|| EmbeddingTable::new(first_vector.len())).insert(first, first_vector)?;
		}
	}

	let table = table.unwrap_or_default();
	debug!("read {} embeddings from {}", table.len(), filename.as_ref().display());
	Ok(table)
}

fn parse_vector<'a, I>(word: &str, components: I, line: usize) -> Result<Vec<f32>>
where
	I: Iterator<Item = &'a str>,
{
	let vector = components
		.map(|value| {
			value.parse::<f32>().map_err(|e| NlpError::Parse {
				line,
				message: format!("invalid component {value:?} for {word:?}: {e}"),
			})
		})
		.collect::<Result<Vec<f32>>>()?;

	if vector.is_empty() {
		return Err(NlpError::Parse { line, message: format!("no vector for {word:?}") });
	}
	Ok(vector)
}

/// `(count, dimension)` if the line reads as a word2vec header.
fn header_fields(word: &str, vector: &[f32]) -> Option<(usize, usize)> {
	match vector {
		[dimension] if dimension.fract() == 0.0 && *dimension >= 0.0 => {
			Some((word.parse().ok()?, *dimension as usize))
		}
		_ => None,
	}
}
