use std::borrow::Cow;
use std::fmt;
use std::io as std_io;
use std::ops::Deref;

use io as mod_io;
use lang::{Phrasal, Sentence, Tokenized};

pub trait ConllTokenized: Tokenized + mod_io::FromLine {
    fn root() -> Self;
}

#[derive(Debug)]
pub struct Token<'a> {
    id: usize,
    form: Cow<'a, str>,
    cpostag: Option<Cow<'a, str>>,
    postag: Option<Cow<'a, str>>,
    head: Option<usize>,
    deprel: Option<Cow<'a, str>>,
}

impl<'a> Token<'a> {
    pub fn new<S: Into<Cow<'a, str>>>(
        id: usize,
        form: S,
        cpostag: Option<S>,
        postag: Option<S>,
        head: Option<usize>,
        deprel: Option<S>,
    ) -> Self {
        Token {
            id: id,
            form: form.into(),
            cpostag: cpostag.map(|s| s.into()),
            postag: postag.map(|s| s.into()),
            head: head,
            deprel: deprel.map(|s| s.into()),
        }
    }
}

impl<'a> Tokenized for Token<'a> {
    fn id(&self) -> usize {
        self.id
    }

    fn form(&self) -> &str {
        &self.form
    }

    fn cpostag(&self) -> Option<&str> {
        self.cpostag.as_ref().map(|x| x.deref())
    }

    fn postag(&self) -> Option<&str> {
        self.postag.as_ref().map(|x| x.deref())
    }

    fn head(&self) -> Option<usize> {
        self.head
    }

    fn deprel(&self) -> Option<&str> {
        self.deprel.as_ref().map(|x| x.deref())
    }
}

impl<'a> ConllTokenized for Token<'a> {
    fn root() -> Self {
        Self::new(
            0,
            "<ROOT>",
            Some("ROOT"),
            Some("ROOT"),
            Some(0),
            Some("root"),
        )
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id: {}, form: {}", self.id, self.form)
    }
}

static CONLL_FIELD_DELIMITER: &'static str = "\t";
static CONLL_EMPTY_FIELD: &'static str = "_";

const NUM_CONLL_FIELDS: usize = 10;

const FIELD_ID: usize = 0;
const FIELD_FORM: usize = 1;
const FIELD_CPOSTAG: usize = 3;
const FIELD_POSTAG: usize = 4;
const FIELD_HEAD: usize = 6;
const FIELD_DEPREL: usize = 7;

fn invalid_data<E>(e: E) -> std_io::Error
where
    E: Into<Box<::std::error::Error + Send + Sync>>,
{
    std_io::Error::new(std_io::ErrorKind::InvalidData, e)
}

#[inline]
fn parse_optional_usize_field(field: &str) -> Result<Option<usize>, std_io::Error> {
    if field == CONLL_EMPTY_FIELD {
        Ok(None)
    } else {
        Ok(Some(field.parse::<usize>().map_err(invalid_data)?))
    }
}

#[inline]
fn parse_optional_str_field(field: &str) -> Option<&str> {
    if field == CONLL_EMPTY_FIELD {
        None
    } else {
        Some(field)
    }
}

impl<'a> mod_io::FromLine for Token<'a> {
    type Err = std_io::Error;

    fn from_line(line: &str) -> Result<Token<'a>, Self::Err> {
        let cols: Vec<&str> = line.trim_right().split(CONLL_FIELD_DELIMITER).collect();
        if cols.len() != NUM_CONLL_FIELDS {
            return Err(invalid_data(
                format!("expected 10 fields, found {}", cols.len()),
            ));
        }
        Ok(Token::new(
            cols[FIELD_ID].parse::<usize>().map_err(invalid_data)?,
            cols[FIELD_FORM].to_string(),
            parse_optional_str_field(cols[FIELD_CPOSTAG]).map(|s| s.to_string()),
            parse_optional_str_field(cols[FIELD_POSTAG]).map(|s| s.to_string()),
            parse_optional_usize_field(cols[FIELD_HEAD])?,
            parse_optional_str_field(cols[FIELD_DEPREL]).map(|s| s.to_string()),
        ))
    }
}

/// Reads sentences, prepending the root token to each.
///
/// Comment lines and rows whose first field is not a plain token index
/// (multiword ranges, empty nodes) are skipped.
pub fn read_upto<R, S, T>(reader: &mut R, num: usize, buf: &mut Vec<S>) -> std_io::Result<usize>
where
    R: std_io::BufRead,
    S: Phrasal<Token = T>,
    T: ConllTokenized,
{
    let mut count = 0;
    let mut line = String::new();
    let mut tokens = vec![<T as ConllTokenized>::root()];
    while count < num {
        match reader.read_line(&mut line) {
            Ok(0) => {
                if tokens.len() > 1 {
                    buf.push(S::from_tokens(tokens));
                    count += 1;
                }
                break;
            }
            Ok(_) => {
                let line_trimmed = line.trim();
                if line_trimmed.is_empty() {
                    if tokens.len() > 1 {
                        buf.push(S::from_tokens(tokens));
                        count += 1;
                    }
                    tokens = vec![T::root()];
                } else if line_trimmed.starts_with("#") {
                    line.clear();
                    continue;
                } else if !is_token_row(line_trimmed) {
                    line.clear();
                    continue;
                } else {
                    tokens.push(T::from_line(&line_trimmed).map_err(|e| {
                        std_io::Error::new(std_io::ErrorKind::InvalidData, e)
                    })?);
                }
            }
            Err(ref e) if e.kind() == std_io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
        line.clear();
    }
    Ok(count)
}

#[inline]
fn is_token_row(line: &str) -> bool {
    line.split(CONLL_FIELD_DELIMITER)
        .next()
        .map(|field| !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

pub type Reader<'a, R> = mod_io::Reader<R, Sentence<Token<'a>>>;

impl<'a, R: std_io::BufRead> mod_io::Read for Reader<'a, R> {
    type Item = Sentence<Token<'a>>;

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> std_io::Result<usize> {
        read_upto(self.inner_mut(), num, buf)
    }
}
