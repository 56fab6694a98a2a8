use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::loader::{self, LoadReport};
use crate::tokenizer::Tokenizer;
use crate::DocId;

/// Number of documents flagged by one delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedDocuments {
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Documents still stored, flagged or not.
    pub documents: usize,
    pub terms: usize,
    /// Flagged documents a purge has not swept yet.
    pub pending_tombstones: usize,
}

#[derive(Default)]
struct IndexState {
    corpus: Corpus,
    index: InvertedIndex,
    tombstones: BTreeSet<DocId>,
}

/// In-memory keyword search over a corpus loaded once at construction.
///
/// Corpus, index and tombstones sit behind a single `RwLock`: `search`,
/// `match_all`, `corpus` and `stats` share the read side, `delete` and `purge`
/// take the write side. Share it across threads as `Arc<SearchEngine>`.
///
/// Keyword lists use AND semantics and an empty list matches nothing.
pub struct SearchEngine {
    config: EngineConfig,
    tokenizer: Tokenizer,
    state: RwLock<IndexState>,
}

impl SearchEngine {
    /// Build from `config.index_data_dir`. Blocks until every file is read.
    pub fn load(config: EngineConfig) -> Result<(Self, LoadReport)> {
        config.validate()?;
        let tokenizer = Tokenizer::from_config(&config);
        let mut state = IndexState::default();
        let report = loader::load_dir(&config.index_data_dir, &tokenizer, &mut state.corpus, &mut state.index)?;
        Ok((Self { config, tokenizer, state: RwLock::new(state) }, report))
    }

    /// Build from documents already in memory, ingested in iteration order.
    pub fn from_documents<I>(config: EngineConfig, docs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        config.validate()?;
        let tokenizer = Tokenizer::from_config(&config);
        let mut state = IndexState::default();
        for doc in docs {
            loader::ingest(&mut state.corpus, &mut state.index, &tokenizer, doc)?;
        }
        Ok(Self { config, tokenizer, state: RwLock::new(state) })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Ids of live documents containing every keyword, ascending, capped at
    /// `max_search_results` (lowest ids win).
    pub fn match_all<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<DocId> {
        let state = self.state.read();
        self.capped_matches(&state, keywords)
    }

    pub fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<Document> {
        let state = self.state.read();
        let results: Vec<Document> = self
            .capped_matches(&state, keywords)
            .into_iter()
            .filter_map(|id| state.corpus.get(id))
            .filter(|doc| !doc.deleted)
            .cloned()
            .collect();
        tracing::debug!(keywords = keywords.len(), hits = results.len(), "search");
        results
    }

    /// Flag the same live AND-matches `match_all` returns (capped at
    /// `max_search_results`, lowest ids first) as deleted, then purge if
    /// `purge_on_delete` is set. The count covers this call only.
    pub fn delete<S: AsRef<str>>(&self, keywords: &[S]) -> AffectedDocuments {
        let mut state = self.state.write();
        let ids = self.capped_matches(&state, keywords);
        for &id in &ids {
            if let Some(doc) = state.corpus.get_mut(id) {
                doc.deleted = true;
            }
            state.tombstones.insert(id);
        }
        let affected = AffectedDocuments { count: ids.len() };
        tracing::info!(count = affected.count, "flagged documents as deleted");
        if self.config.purge_on_delete {
            self.sweep(&mut state);
        }
        affected
    }

    /// Remove flagged documents and their postings. Returns how many
    /// documents survive; with nothing flagged this changes nothing.
    pub fn purge(&self) -> usize {
        let mut state = self.state.write();
        self.sweep(&mut state)
    }

    /// Stored documents in load order.
    pub fn corpus(&self) -> Vec<Document> {
        self.state.read().corpus.iter().map(|(_, doc)| doc.clone()).collect()
    }

    pub fn stats(&self) -> EngineStats {
        let state = self.state.read();
        EngineStats {
            documents: state.corpus.len(),
            terms: state.index.len(),
            pending_tombstones: state.tombstones.len(),
        }
    }

    fn capped_matches<S: AsRef<str>>(&self, state: &IndexState, keywords: &[S]) -> Vec<DocId> {
        let mut ids = self.intersect(state, keywords);
        ids.truncate(self.config.max_search_results);
        ids
    }

    fn intersect<S: AsRef<str>>(&self, state: &IndexState, keywords: &[S]) -> Vec<DocId> {
        let mut lists: Vec<&[DocId]> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let Some(term) = self.tokenizer.normalize(keyword.as_ref()) else {
                return Vec::new();
            };
            match state.index.lookup(&term) {
                Some(postings) if !postings.is_empty() => lists.push(postings),
                _ => return Vec::new(),
            }
        }
        let Some((driver, rest)) = lists.split_first() else {
            return Vec::new();
        };
        driver
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|list| list.binary_search(id).is_ok()))
            .filter(|id| state.corpus.is_live(*id))
            .collect()
    }

    fn sweep(&self, state: &mut IndexState) -> usize {
        let tombstones = std::mem::take(&mut state.tombstones);
        let purged = tombstones.len();
        for id in tombstones {
            if let Some(doc) = state.corpus.remove(id) {
                let terms = self.tokenizer.tokenize(&doc.description);
                state.index.remove(&terms, id);
            }
        }
        let survivors = state.corpus.len();
        if purged > 0 {
            tracing::info!(purged, survivors, "purged deleted documents");
        }
        survivors
    }
}
