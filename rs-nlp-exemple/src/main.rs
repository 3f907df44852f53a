use std::env;

use log::{info, warn};
use rs_nlp_core::embedding::WordEmbedder;
use rs_nlp_core::io::{read_corpus, read_embedding_table};
use rs_nlp_core::ngram::NGramModel;
use rs_nlp_core::tokenizer::{RegexTokenizer, SimpleTokenizer, Tokenizer};
use rs_nlp_core::vectorizer::{CountVectorizer, TfidfVectorizer, Vectorizer};

/// Used when no corpus file is given on the command line.
const DEFAULT_CORPUS: [&str; 6] = [
    "I love NLP.",
    "I love programming.",
    "NLP is a subfield of AI.",
    "The quick brown fox jumps over the lazy dog.",
    "The lazy dog sleeps all day.",
    "The quick fox runs away.",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows what the core learns at each fit
    env_logger::init();

    // Usage: rs-nlp-exemple [corpus.txt] [embeddings.txt]
    let args: Vec<String> = env::args().skip(1).collect();
    let corpus: Vec<String> = match args.first() {
        Some(path) => read_corpus(path)?,
        None => DEFAULT_CORPUS.iter().map(|s| (*s).to_owned()).collect(),
    };
    info!("corpus has {} documents", corpus.len());

    // Both tokenizers on the same sentences
    let simple = SimpleTokenizer::new();
    let regex = RegexTokenizer::new();
    for sentence in ["Hello, world! This is a test.", "NLP is fascinating... isn't it?"] {
        println!("{sentence:?}");
        println!("  simple: {:?}", simple.tokenize(sentence));
        println!("  regex:  {:?}", regex.tokenize(sentence));
    }

    // Patterns can be overridden for a single call without touching the tokenizer
    println!("  words only: {:?}", regex.tokenize_with("Let's count 123 tokens!", r"[a-z]+")?);

    // Document-term matrix
    let sample = &corpus[..corpus.len().min(3)];
    let mut count = CountVectorizer::new(RegexTokenizer::new());
    let matrix = count.fit_transform(sample)?;
    println!("\nVocabulary: {:?}", count.vocabulary().iter().collect::<Vec<_>>());
    for row in &matrix {
        println!("  {row:?}");
    }

    // TF-IDF matrix, L2 normalized
    let mut tfidf = TfidfVectorizer::new(RegexTokenizer::new());
    let matrix = tfidf.fit_transform(sample)?;
    for (token, idf) in tfidf.idf_table() {
        println!("  idf({token}) = {idf:.3}");
    }
    for row in &matrix {
        let rounded: Vec<String> = row.iter().map(|w| format!("{w:.3}")).collect();
        println!("  [{}]", rounded.join(", "));
    }

    // Next-word prediction and generation with a bigram and a trigram model
    for n in [2, 3] {
        let mut model = NGramModel::new(SimpleTokenizer::new(), n)?;
        model.fit(&corpus);

        println!("\n{n}-gram model, {} contexts", model.context_count());
        println!("  after 'the': {:?}", model.predict_next_word(&["the"])?);
        for i in 0..3 {
            println!("  generated {}: {}", i + 1, model.generate_text("the", 15)?);
        }
    }

    // Embeddings need an external GloVe / word2vec text file
    match args.get(1) {
        Some(path) => {
            let embedder = WordEmbedder::new(read_embedding_table(path)?);
            println!("\nembedding dimension: {}", embedder.dimension());
            match embedder.similarity("king", "queen") {
                Ok(similarity) => println!("  similarity(king, queen) = {similarity:.4}"),
                Err(e) => println!("  {e}"),
            }
            if let Ok(neighbours) = embedder.most_similar("computer", 5) {
                println!("  most similar to 'computer': {neighbours:?}");
            }
            let vector = embedder.embed_document("The queen rules the country.", &regex);
            println!("  document vector (first 5): {:?}", &vector[..vector.len().min(5)]);
        }
        None => warn!("no embedding file given, skipping word embeddings"),
    }

    Ok(())
}
