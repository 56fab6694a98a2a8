//! In-memory document search: CSV corpus loading, an inverted index over
//! normalized terms, AND keyword queries, and soft delete with purge.

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod loader;
pub mod query;
pub mod tokenizer;

/// Stable document identifier, assigned once at ingestion in load order.
pub type DocId = u32;

pub use config::{Config, EngineConfig};
pub use corpus::{Corpus, Document};
pub use error::{Error, Result};
pub use index::InvertedIndex;
pub use loader::LoadReport;
pub use query::{AffectedDocuments, EngineStats, SearchEngine};
pub use tokenizer::Tokenizer;
