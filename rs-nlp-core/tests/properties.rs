use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_nlp_core::embedding::{EmbeddingTable, WordEmbedder};
use rs_nlp_core::math::l2_norm;
use rs_nlp_core::ngram::{END_TOKEN, NGramModel, START_TOKEN};
use rs_nlp_core::tokenizer::{RegexTokenizer, SimpleTokenizer, Tokenizer};
use rs_nlp_core::vectorizer::{CountVectorizer, TfidfVectorizer, Vectorizer};

const CORPUS: [&str; 5] = [
	"The quick brown fox jumps over the lazy dog.",
	"A quick brown dog outpaces a quick fox!",
	"Is the dog lazy, or is the fox quick?",
	"Nothing to see here.",
	"",
];

#[test]
fn vocabulary_is_deterministic() {
	let mut first = CountVectorizer::new(RegexTokenizer::new());
	let mut second = CountVectorizer::new(RegexTokenizer::new());
	first.fit(&CORPUS);
	second.fit(&CORPUS);
	assert_eq!(first.vocabulary(), second.vocabulary());

	first.fit(&CORPUS);
	assert_eq!(first.vocabulary(), second.vocabulary());

	let indices: Vec<_> = first.vocabulary().iter().map(|(_, i)| i).collect();
	assert_eq!(indices, (0..first.vocabulary().len()).collect::<Vec<_>>());
}

#[test]
fn count_and_tfidf_share_the_vocabulary() {
	let mut count = CountVectorizer::new(SimpleTokenizer::new());
	let mut tfidf = TfidfVectorizer::new(SimpleTokenizer::new());
	let counts = count.fit_transform(&CORPUS).unwrap();
	let weights = tfidf.fit_transform(&CORPUS).unwrap();

	assert_eq!(count.vocabulary(), tfidf.vocabulary());
	for (c, w) in counts.iter().zip(&weights) {
		assert_eq!(c.len(), w.len());
		for (ci, wi) in c.iter().zip(w) {
			assert_eq!(*ci == 0, *wi == 0.0);
		}
	}
}

#[test]
fn count_vectorizer_reference_case() {
	let mut vectorizer = CountVectorizer::new(SimpleTokenizer::new());
	let matrix = vectorizer.fit_transform(&["a a b", "b c"]).unwrap();
	assert_eq!(vectorizer.vocabulary().get("a"), Some(0));
	assert_eq!(vectorizer.vocabulary().get("b"), Some(1));
	assert_eq!(vectorizer.vocabulary().get("c"), Some(2));
	assert_eq!(matrix, vec![vec![2, 1, 0], vec![0, 1, 1]]);
}

#[test]
fn idf_of_ubiquitous_token_is_between_zero_and_one() {
	for n in 2..8 {
		let corpus: Vec<String> = (0..n).map(|i| format!("common token{i}")).collect();
		let mut vectorizer = TfidfVectorizer::new(SimpleTokenizer::new());
		vectorizer.fit(&corpus);

		let idf = vectorizer.idf("common").unwrap();
		let expected = (n as f64 / (n as f64 + 1.0)).ln() + 1.0;
		assert!((idf - expected).abs() < 1e-12);
		assert!(idf > 0.0 && idf < 1.0);
	}
}

#[test]
fn tfidf_vectors_are_unit_or_zero() {
	let mut vectorizer = TfidfVectorizer::new(RegexTokenizer::new());
	vectorizer.fit(&CORPUS);

	let documents = ["the fox", "unknown words only", "", "quick quick quick"];
	for row in vectorizer.transform(&documents).unwrap() {
		let norm = l2_norm(&row);
		if row.iter().all(|w| *w == 0.0) {
			assert_eq!(norm, 0.0);
		} else {
			assert!((norm - 1.0).abs() < 1e-6);
		}
	}
}

#[test]
fn ngram_distributions_sum_to_one() {
	let mut model = NGramModel::new(RegexTokenizer::new(), 3).unwrap();
	model.fit(&CORPUS);

	let contexts: [&[&str]; 4] = [&["the", "quick"], &["a"], &[], &["is", "the"]];
	for context in contexts {
		let distribution = model.predict_next_word(context).unwrap();
		assert!(!distribution.is_empty());
		assert!((distribution.values().sum::<f64>() - 1.0).abs() < 1e-9);
	}
	assert!(model.predict_next_word(&["purple", "elephant"]).unwrap().is_empty());
}

#[test]
fn ngram_reference_counts() {
	let mut model = NGramModel::new(SimpleTokenizer::new(), 2).unwrap();
	model.fit(&["a b a b"]);

	let strip = |context: &str| -> Vec<(String, f64)> {
		let distribution = model.predict_next_word(&[context]).unwrap();
		let kept: Vec<_> = distribution.into_iter().filter(|(t, _)| t != START_TOKEN && t != END_TOKEN).collect();
		let mass: f64 = kept.iter().map(|(_, p)| p).sum();
		kept.into_iter().map(|(t, p)| (t, p / mass)).collect()
	};
	assert_eq!(strip("a"), vec![("b".to_owned(), 1.0)]);
	assert_eq!(strip("b"), vec![("a".to_owned(), 1.0)]);
}

#[test]
fn generation_always_terminates() {
	let mut model = NGramModel::new(SimpleTokenizer::new(), 2).unwrap();
	model.fit(&["a b a b a b", "b a"]);

	let mut rng = StdRng::seed_from_u64(2024);
	for max_length in 0..12 {
		for seed in ["", "a", "b", "zzz", "a b"] {
			let text = model.generate_text_with_rng(seed, max_length, &mut rng).unwrap();
			let seed_len = SimpleTokenizer::new().tokenize(seed).len();
			let produced = text.split_whitespace().count();
			assert!(produced <= seed_len + max_length, "{text:?} from {seed:?} with {max_length}");
			assert!(!text.contains(START_TOKEN) && !text.contains(END_TOKEN));
		}
	}
	assert!(model.generate_text("a", 5).is_ok());
}

#[test]
fn seeded_generation_is_reproducible() {
	let mut model = NGramModel::new(RegexTokenizer::new(), 2).unwrap();
	model.fit(&CORPUS);

	let first = model.generate_text_with_rng("the", 30, &mut StdRng::seed_from_u64(11)).unwrap();
	let second = model.generate_text_with_rng("the", 30, &mut StdRng::seed_from_u64(11)).unwrap();
	assert_eq!(first, second);
	assert!(first.starts_with("the"));
}

#[test]
fn fitted_model_survives_caller_persistence() {
	let mut model = NGramModel::new(SimpleTokenizer::new(), 2).unwrap();
	model.fit(&["the cat sat", "the dog ran"]);

	let bytes = postcard::to_stdvec(&model).unwrap();
	let restored: NGramModel<SimpleTokenizer> = postcard::from_bytes(&bytes).unwrap();

	assert_eq!(restored.config(), model.config());
	assert_eq!(restored.vocabulary(), model.vocabulary());
	assert_eq!(restored.predict_next_word(&["the"]).unwrap(), model.predict_next_word(&["the"]).unwrap());

	let regex = restored.with_tokenizer(RegexTokenizer::new());
	assert_eq!(regex.predict_next_word(&["cat"]).unwrap().len(), 1);
}

#[test]
fn embedding_fallbacks_keep_dimension() {
	let table = EmbeddingTable::from_pairs(4, [("fox", vec![0.1, 0.2, 0.3, 0.4])]).unwrap();
	let embedder = WordEmbedder::new(table);

	assert_eq!(embedder.get_vector("wolf"), vec![0.0; 4]);
	assert_eq!(embedder.embed_document("wolves and bears", &SimpleTokenizer::new()), vec![0.0; 4]);
	assert_eq!(embedder.embed_document("The fox.", &SimpleTokenizer::new()), vec![0.1, 0.2, 0.3, 0.4]);
}
