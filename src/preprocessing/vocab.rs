use std::borrow::Borrow;
use std::collections::HashMap;
use std::io as std_io;
use std::path::Path;

use rand::{thread_rng, Rng};

use io::embedding as embed_io;

/// A string-to-id mapping where id `0` is reserved for the default token.
#[derive(Debug)]
pub struct Vocab {
    s2i: HashMap<String, u32>,
    i2s: Vec<String>,
    freq: Vec<u32>,
    embeddings: Option<Vec<Vec<f32>>>,
}

const DEFAULT_CAPACITY: usize = 32;
static UNKNOWN_TOKEN: &'static str = "<UNK>";

impl Vocab {
    pub fn new() -> Self {
        Self::with_capacity_and_default_token(DEFAULT_CAPACITY, UNKNOWN_TOKEN.to_string())
    }

    /// Builds a vocabulary from a `word v1 v2 ...` embedding file.
    ///
    /// When the file carries no row for the default token, its vector is
    /// drawn uniformly from [-1, 1).
    pub fn from_file<P: AsRef<Path>, S: Into<String>>(
        file: P,
        default_token: S,
    ) -> Result<Self, std_io::Error> {
        let mut entries = embed_io::load_embeddings(file, b' ', false)?;
        let capacity = entries.len() + 1;
        assert!(capacity > 1);
        let mut embeddings = Vec::with_capacity(capacity);

        let default_token = default_token.into();
        let default = entries.iter().position(
            |ref entry| entry.0 == default_token,
        );
        match default {
            Some(index) => {
                let entry = entries.remove(index);
                embeddings.push(entry.1);
            }
            None => {
                let dim = entries[0].1.len();
                let mut value = Vec::with_capacity(dim);
                let mut rng = thread_rng();
                for _ in 0..dim {
                    value.push(rng.gen_range(-1.0f32, 1.0));
                }
                embeddings.push(value);
            }
        }

        let mut v = Self::with_capacity_and_default_token(capacity, default_token);
        for entry in entries.into_iter() {
            v.add(entry.0);
            embeddings.push(entry.1);
        }
        v.embeddings = Some(embeddings);
        Ok(v)
    }

    pub fn with_default_token(default_token: String) -> Self {
        Self::with_capacity_and_default_token(DEFAULT_CAPACITY, default_token)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_default_token(capacity, UNKNOWN_TOKEN.to_string())
    }

    pub fn with_capacity_and_default_token(capacity: usize, default_token: String) -> Self {
        let mut v = Vocab {
            s2i: HashMap::with_capacity(capacity),
            i2s: Vec::with_capacity(capacity),
            freq: Vec::with_capacity(capacity),
            embeddings: None,
        };
        v.add(default_token);
        v
    }

    pub fn add<S: Into<String>>(&mut self, word: S) -> u32 {
        let word = word.into();
        if let Some(&id) = self.s2i.get(&word[..]) {
            if id > 0 {
                self.freq[id as usize] += 1;
            }
            return id;
        }
        let id = self.i2s.len() as u32;
        self.i2s.push(word.clone());
        self.s2i.insert(word, id);
        self.freq.push(0);
        id
    }

    pub fn get<Q: Borrow<str> + ?Sized>(&self, word: &Q) -> u32 {
        self.s2i.get(word.borrow()).map(|v| *v).unwrap_or_else(|| 0)
    }

    pub fn freq(&self, id: u32) -> Option<u32> {
        self.freq.get(id as usize).map(|v| *v)
    }

    pub fn lookup(&self, id: u32) -> Option<&str> {
        self.i2s.get(id as usize).map(|v| v.as_str())
    }

    pub fn size(&self) -> usize {
        self.i2s.len()
    }

    pub fn has_embed(&self) -> bool {
        self.embeddings.is_some()
    }

    pub fn embed(&self) -> Option<&Vec<Vec<f32>>> {
        self.embeddings.as_ref()
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Vocab::new()
    }
}
