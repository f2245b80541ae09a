use std::fs::File;
use std::io as std_io;
use std::path::Path;

use csv;

#[derive(Debug, Deserialize)]
struct EmbedRecord {
    word: String,
    value: Vec<f32>,
}

/// Reads word vectors from a text file of `word v1 v2 ...` rows.
///
/// Every row must carry the same number of values; a row of a different
/// width is an `InvalidData` error.
pub fn load_embeddings<P: AsRef<Path>>(
    file: P,
    delimiter: u8,
    has_header: bool,
) -> Result<Vec<(String, Vec<f32>)>, std_io::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .delimiter(delimiter)
        .quoting(false)
        .from_reader(File::open(file)?);
    let mut entries: Vec<(String, Vec<f32>)> = vec![];
    let mut dim = 0;
    for result in reader.deserialize() {
        let record: EmbedRecord = result?;
        if entries.is_empty() {
            dim = record.value.len();
        } else if record.value.len() != dim {
            return Err(std_io::Error::new(
                std_io::ErrorKind::InvalidData,
                format!(
                    "expected {} values for `{}`, got {}",
                    dim,
                    record.word,
                    record.value.len()
                ),
            ));
        }
        entries.push((record.word, record.value));
    }
    Ok(entries)
}
