pub use self::simple::*;

mod simple;

pub trait Tokenized {
    fn id(&self) -> usize;
    fn form(&self) -> &str;
    fn cpostag(&self) -> Option<&str>;
    fn postag(&self) -> Option<&str>;
    fn head(&self) -> Option<usize>;
    fn deprel(&self) -> Option<&str>;
}

pub trait Phrasal {
    type Token: Tokenized;

    fn from_tokens(tokens: Vec<Self::Token>) -> Self;
    fn raw(&self) -> &str;

    fn token(&self, index: usize) -> Option<&Self::Token>;
    fn tokens(&self) -> &[Self::Token];

    fn len(&self) -> usize {
        self.tokens().len()
    }

    fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}
