extern crate chartparse;
extern crate tempfile;

mod test_utils;

use std::io::Write;

use chartparse::preprocessing::{Preprocess, TextPreprocessor, Vocab};

#[test]
fn test_preprocessor() {
    let sentences = test_utils::mock::provide_conll_sentences();
    let mut preprocessor = TextPreprocessor::new(Vocab::new());
    let word_ids = preprocessor.fit_transform(sentences);
    // the synthetic root token is shared by every sentence
    assert_eq!(word_ids[0], &[1, 2, 3, 4]);
    assert_eq!(word_ids[1], &[1, 5, 6, 7, 8]);

    let unseen = test_utils::mock::provide_nonprojective_sentence();
    let word_ids = preprocessor.transform(vec![unseen]);
    assert_eq!(word_ids[0], &[1, 0, 0, 0, 0]);

    preprocessor.fit(vec![test_utils::mock::provide_nonprojective_sentence()]);
    let seen = test_utils::mock::provide_nonprojective_sentence();
    let word_ids = preprocessor.transform(vec![seen]);
    assert_eq!(word_ids[0], &[1, 9, 10, 11, 12]);
}

#[test]
fn test_vocab() {
    let mut vocab = Vocab::new();
    assert_eq!(vocab.size(), 1);
    assert_eq!(vocab.lookup(0), Some("<UNK>"));
    assert_eq!(vocab.add("apple"), 1);
    assert_eq!(vocab.add("banana"), 2);
    assert_eq!(vocab.add("apple"), 1);
    assert_eq!(vocab.get("apple"), 1);
    assert_eq!(vocab.get("cherry"), 0);
    assert_eq!(vocab.freq(1), Some(1));
    assert_eq!(vocab.freq(2), Some(0));
    assert!(!vocab.has_embed());
}

#[test]
fn test_vocab_from_embedding_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "the 0.5 -0.25\ndog 1.0 2.0\nbarks -1.5 0.0\n").unwrap();
    file.flush().unwrap();

    let vocab = Vocab::from_file(file.path(), "<UNK>").unwrap();
    assert_eq!(vocab.size(), 4);
    assert_eq!(vocab.get("the"), 1);
    assert_eq!(vocab.get("dog"), 2);
    assert_eq!(vocab.get("barks"), 3);
    assert!(vocab.has_embed());

    let embeddings = vocab.embed().unwrap();
    assert_eq!(embeddings.len(), 4);
    assert_eq!(embeddings[1], vec![0.5, -0.25]);
    assert_eq!(embeddings[3], vec![-1.5, 0.0]);
    // the default token has no row, so its vector is drawn from [-1, 1)
    assert_eq!(embeddings[0].len(), 2);
    assert!(embeddings[0].iter().all(|&v| -1.0 <= v && v < 1.0));
}

#[test]
fn test_vocab_from_embedding_file_with_default_row() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "dog 1.0 2.0\n<UNK> 0.0 0.0\nbarks 3.0 4.0\n").unwrap();
    file.flush().unwrap();

    let vocab = Vocab::from_file(file.path(), "<UNK>").unwrap();
    assert_eq!(vocab.size(), 3);
    assert_eq!(vocab.get("dog"), 1);
    assert_eq!(vocab.get("barks"), 2);
    let embeddings = vocab.embed().unwrap();
    assert_eq!(embeddings[0], vec![0.0, 0.0]);
    assert_eq!(embeddings[1], vec![1.0, 2.0]);
    assert_eq!(embeddings[2], vec![3.0, 4.0]);
}

#[test]
fn test_vocab_rejects_ragged_embedding_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "dog 1.0 2.0\nbarks 3.0\n").unwrap();
    file.flush().unwrap();

    assert!(Vocab::from_file(file.path(), "<UNK>").is_err());
}
