use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::DocId;

/// One ingested record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Soft-delete flag; never sent to clients.
    #[serde(skip)]
    pub deleted: bool,
}

impl Document {
    pub fn new(description: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self { description: description.into(), image_url: image_url.into(), deleted: false }
    }
}

/// Documents keyed by stable id. Ids are handed out in load order and never
/// reused, so iterating by id replays load order even after removals.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    docs: BTreeMap<DocId, Document>,
    next_id: DocId,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `doc` under the next id. Fails once `DocId::MAX` ids have been
    /// handed out; ids are never reused, so removals do not free space.
    pub fn push(&mut self, doc: Document) -> Result<DocId> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(Error::CorpusFull(u64::from(id)))?;
        self.docs.insert(id, doc);
        Ok(id)
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(&id)
    }

    pub fn get_mut(&mut self, id: DocId) -> Option<&mut Document> {
        self.docs.get_mut(&id)
    }

    /// Present and not flagged.
    pub fn is_live(&self, id: DocId) -> bool {
        self.docs.get(&id).is_some_and(|d| !d.deleted)
    }

    pub fn remove(&mut self, id: DocId) -> Option<Document> {
        self.docs.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.docs.iter().map(|(id, doc)| (*id, doc))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
