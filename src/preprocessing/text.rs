use lang::{Phrasal, Tokenized};
use preprocessing::{Preprocess, Vocab};

/// Maps sentences to word id sequences through a vocabulary.
#[derive(Debug)]
pub struct TextPreprocessor {
    vocab: Vocab,
}

impl TextPreprocessor {
    pub fn new(vocab: Vocab) -> Self {
        TextPreprocessor { vocab: vocab }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }
}

impl<S: Phrasal> Preprocess<S> for TextPreprocessor {
    type Output = Vec<u32>;

    fn fit_each(&mut self, x: &S) -> Option<Self::Output> {
        let ids = x.tokens()
            .iter()
            .map(|token| self.vocab.add(token.form()))
            .collect();
        Some(ids)
    }

    fn transform_each(&self, x: S) -> Self::Output {
        x.tokens()
            .iter()
            .map(|token| self.vocab.get(token.form()))
            .collect()
    }
}
