use std::error;
use std::fmt;
use std::io as std_io;

use pbr::ProgressBar;
use slog::Logger;

use dataset::Dataset;
use io::Write;
use lang::{Phrasal, Tokenized};
use preprocessing::Vocab;
use syntax::{graph, hypergraph, transition, Index};
use syntax::hypergraph::DerivationStep;
use syntax::transition::Action;

/// The oracle outputs for one sentence: the action sequence, the relation
/// label of each attached arc and the bottom-up derivation trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRecord {
    pub transition: Vec<Action>,
    pub relations: Vec<Index>,
    pub derivation: Vec<DerivationStep>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CorpusStats {
    pub processed: usize,
    pub kept: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum Error {
    Oracle(transition::Error),
    Derivation(hypergraph::Error),
    Io(std_io::Error),
}

impl From<transition::Error> for Error {
    fn from(e: transition::Error) -> Self {
        Error::Oracle(e)
    }
}

impl From<hypergraph::Error> for Error {
    fn from(e: hypergraph::Error) -> Self {
        Error::Derivation(e)
    }
}

impl From<std_io::Error> for Error {
    fn from(e: std_io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Oracle(ref e) => e.fmt(f),
            Error::Derivation(ref e) => e.fmt(f),
            Error::Io(ref e) => e.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        match *self {
            Error::Oracle(ref e) => e.description(),
            Error::Derivation(ref e) => e.description(),
            Error::Io(ref e) => e.description(),
        }
    }

    fn cause(&self) -> Option<&error::Error> {
        match *self {
            Error::Oracle(ref e) => Some(e),
            Error::Derivation(ref e) => Some(e),
            Error::Io(ref e) => Some(e),
        }
    }
}

/// Extracts the oracle record of one sentence.
///
/// Relation labels are registered in `label_v` as they are seen, with the
/// root relation at the sentence root. Returns `None` for sentences whose
/// trees are cyclic or non-projective.
pub fn extract_record<S: Phrasal>(
    sentence: &S,
    label_v: &mut Vocab,
) -> Result<Option<OracleRecord>, Error> {
    let mut heads: Vec<Index> = Vec::with_capacity(sentence.len());
    let mut rels: Vec<Index> = Vec::with_capacity(sentence.len());
    for token in sentence.tokens() {
        heads.push(token.head().unwrap_or(0) as Index);
        rels.push(label_v.add(token.deprel().unwrap_or("dep")));
    }
    if !graph::is_well_formed(&heads) {
        return Ok(None);
    }
    let derivation = transition::arc_standard_oracle(&heads)?;
    let relations = transition::relation_sequence(&derivation.arcs, &rels);
    let trace = hypergraph::gold_derivation(&heads)?;
    Ok(Some(OracleRecord {
        transition: derivation.actions,
        relations: relations,
        derivation: trace,
    }))
}

/// Extracts oracle records for a whole dataset, writing them as they are
/// produced.
///
/// A sentence that fails extraction is logged and dropped without
/// aborting the rest of the dataset.
pub fn process_corpus<S, W>(
    dataset: &Dataset<S>,
    label_v: &mut Vocab,
    writer: &mut W,
    logger: &Logger,
) -> Result<CorpusStats, Error>
where
    S: Phrasal,
    W: Write<Item = OracleRecord>,
{
    let mut stats = CorpusStats::default();
    let mut pbar = ProgressBar::new(dataset.len() as u64);
    for sentence in dataset.iter() {
        stats.processed += 1;
        match extract_record(sentence, label_v) {
            Ok(Some(record)) => {
                writer.write(&[record])?;
                stats.kept += 1;
            }
            Ok(None) => {
                stats.skipped += 1;
            }
            // write errors abort through `?` above
            Err(e) => {
                warn!(logger, "dropping sentence {}: {}", stats.processed, e);
                stats.failed += 1;
            }
        }
        pbar.inc();
    }
    pbar.finish();
    writer.flush()?;
    info!(
        logger,
        "extracted oracle records";
        "processed" => stats.processed,
        "kept" => stats.kept,
        "skipped" => stats.skipped,
        "failed" => stats.failed
    );
    Ok(stats)
}
