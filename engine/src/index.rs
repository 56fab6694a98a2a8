use std::collections::HashMap;

use crate::DocId;

/// Term → posting list. Every posting list is ascending and duplicate-free,
/// which is what lets queries intersect lists with binary search.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `doc_id` under every term.
    ///
    /// Ingestion hands out ids in increasing order so this is normally a push;
    /// an out-of-order id is inserted in place and a repeated one is ignored.
    pub fn update<S: AsRef<str>>(&mut self, terms: &[S], doc_id: DocId) {
        for term in terms {
            let list = self.postings.entry(term.as_ref().to_owned()).or_default();
            match list.last() {
                None => list.push(doc_id),
                Some(&last) if last < doc_id => list.push(doc_id),
                Some(_) => {
                    if let Err(at) = list.binary_search(&doc_id) {
                        list.insert(at, doc_id);
                    }
                }
            }
        }
    }

    pub fn lookup(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Drop `doc_id` from the given terms' lists; terms left empty are removed.
    pub fn remove<S: AsRef<str>>(&mut self, terms: &[S], doc_id: DocId) {
        for term in terms {
            let term = term.as_ref();
            let Some(list) = self.postings.get_mut(term) else { continue };
            if let Ok(at) = list.binary_search(&doc_id) {
                list.remove(at);
            }
            if list.is_empty() {
                self.postings.remove(term);
            }
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order() {
        let mut idx = InvertedIndex::new();
        idx.update(&["ALPHA", "BETA"], 0);
        idx.update(&["ALPHA"], 1);
        idx.update(&["ALPHA", "BETA"], 4);
        assert_eq!(idx.lookup("ALPHA"), Some(&[0, 1, 4][..]));
        assert_eq!(idx.lookup("BETA"), Some(&[0, 4][..]));
        assert_eq!(idx.lookup("GAMMA"), None);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn out_of_order_and_repeated_ids_stay_sorted_and_unique() {
        let mut idx = InvertedIndex::new();
        for id in [5, 2, 9, 2, 5, 0] {
            idx.update(&["TERM"], id);
        }
        assert_eq!(idx.lookup("TERM"), Some(&[0, 2, 5, 9][..]));
    }

    #[test]
    fn remove_prunes_empty_terms() {
        let mut idx = InvertedIndex::new();
        idx.update(&["KEEP", "GONE"], 1);
        idx.update(&["KEEP"], 2);
        idx.remove(&["KEEP", "GONE", "NEVER"], 1);
        assert_eq!(idx.lookup("KEEP"), Some(&[2][..]));
        assert_eq!(idx.lookup("GONE"), None);
        assert_eq!(idx.len(), 1);
    }
}
