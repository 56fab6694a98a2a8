use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::corpus::{Corpus, Document};
use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::tokenizer::Tokenizer;
use crate::DocId;

pub const DATA_FILE_EXTENSION: &str = "csv";
/// First-column value that marks a header row.
pub const HEADER_SENTINEL: &str = "AuthorID";
pub const MIN_COLUMNS: usize = 5;
const DESCRIPTION_COLUMN: usize = 3;
const IMAGE_URL_COLUMN: usize = 4;

/// What one directory load did. Failures here were logged and skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub files_loaded: usize,
    /// Files that could not be opened, or that stopped early on a bad row.
    pub files_failed: usize,
    /// Entries without the data file extension.
    pub files_skipped: usize,
    /// Header rows and rows with too few columns.
    pub rows_rejected: usize,
    pub documents: usize,
}

/// Append `doc` to the corpus and index its description under the new id.
pub fn ingest(corpus: &mut Corpus, index: &mut InvertedIndex, tokenizer: &Tokenizer, doc: Document) -> Result<DocId> {
    let terms = tokenizer.tokenize(&doc.description);
    let doc_id = corpus.push(doc)?;
    index.update(&terms, doc_id);
    Ok(doc_id)
}

/// Load every data file directly inside `dir`, in file-name order.
///
/// An unreadable `dir`, or running out of document ids, is fatal. A file that
/// cannot be opened or parsed is logged and abandoned; the rows it yielded
/// before the failure are kept.
pub fn load_dir(dir: &Path, tokenizer: &Tokenizer, corpus: &mut Corpus, index: &mut InvertedIndex) -> Result<LoadReport> {
    let start = Instant::now();
    fs::read_dir(dir).map_err(|source| Error::DataDir { path: dir.to_path_buf(), source })?;

    let mut report = LoadReport::default();
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some(DATA_FILE_EXTENSION) {
            files.push(p.to_path_buf());
        } else {
            report.files_skipped += 1;
        }
    }

    for file in files {
        tracing::info!(filepath = %file.display(), "loading data file");
        match load_file(&file, tokenizer, corpus, index, &mut report) {
            Ok(()) => report.files_loaded += 1,
            Err(err @ Error::CorpusFull(_)) => return Err(err),
            Err(err) => {
                tracing::error!(filepath = %file.display(), error = %err, "unable to read input file");
                report.files_failed += 1;
            }
        }
    }

    report.documents = corpus.len();
    tracing::info!(
        documents = report.documents,
        terms = index.len(),
        files_loaded = report.files_loaded,
        files_failed = report.files_failed,
        duration_ms = start.elapsed().as_millis() as u64,
        "loading index complete"
    );
    Ok(report)
}

fn load_file(
    file: &Path,
    tokenizer: &Tokenizer,
    corpus: &mut Corpus,
    index: &mut InvertedIndex,
    report: &mut LoadReport,
) -> Result<()> {
    let data_file = |source| Error::DataFile { path: file.to_path_buf(), source };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(file)
        .map_err(data_file)?;

    for record in reader.records() {
        let record = record.map_err(data_file)?;
        if record.len() < MIN_COLUMNS || record.get(0) == Some(HEADER_SENTINEL) {
            tracing::debug!(filepath = %file.display(), line = record.position().map(|p| p.line()), "rejected row");
            report.rows_rejected += 1;
            continue;
        }
        let doc = Document::new(&record[DESCRIPTION_COLUMN], &record[IMAGE_URL_COLUMN]);
        ingest(corpus, index, tokenizer, doc)?;
    }
    Ok(())
}
