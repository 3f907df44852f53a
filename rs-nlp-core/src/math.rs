//! Dense vector helpers shared by the vectorizers and the embedder.

/// Euclidean norm of `values`.
pub fn l2_norm(values: &[f64]) -> f64 {
	values.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Divides every component by the Euclidean norm.
///
/// A vector whose norm is exactly zero is left unchanged.
pub fn l2_normalize(values: &mut [f64]) {
	let norm = l2_norm(values);
	if norm > 0.0 {
		values.iter_mut().for_each(|x| *x /= norm);
	}
}

/// Cosine similarity of two vectors of the same length.
///
/// Returns `0.0` when either vector has a zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	debug_assert_eq!(a.len(), b.len(), "cosine similarity needs vectors of the same length");

	let mut dot = 0.0f64;
	let mut norm_a = 0.0f64;
	let mut norm_b = 0.0f64;
	for (x, y) in a.iter().zip(b) {
		let (x, y) = (f64::from(*x), f64::from(*y));
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}
	(dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Element-wise mean of `vectors`, each of length `dimension`.
///
/// Returns the zero vector when `vectors` is empty.
pub fn mean<'a, I>(vectors: I, dimension: usize) -> Vec<f32>
where
	I: IntoIterator<Item = &'a [f32]>,
{
	let mut sum = vec![0.0f64; dimension];
	let mut count = 0usize;
	for vector in vectors {
		for (acc, x) in sum.iter_mut().zip(vector) {
			*acc += f64::from(*x);
		}
		count += 1;
	}

	if count == 0 {
		return vec![0.0; dimension];
	}
	sum.into_iter().map(|x| (x / count as f64) as f32).collect()
}

/// True when every component is exactly zero.
pub fn is_zero(values: &[f32]) -> bool {
	values.iter().all(|x| *x == 0.0)
}
