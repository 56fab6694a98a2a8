use engine::{Document, EngineConfig, SearchEngine};

fn sample_docs() -> Vec<Document> {
    vec![
        Document::new("Document One. Top secret!", "image-url"),
        Document::new("Document Two. Top secret!", "image-url"),
        Document::new("Document Three", "image-url"),
    ]
}

fn sample_engine(max_search_results: usize, purge_on_delete: bool) -> SearchEngine {
    let config = EngineConfig {
        max_search_results,
        min_token_length: 3,
        max_token_length: 10,
        purge_on_delete,
        ..EngineConfig::default()
    };
    SearchEngine::from_documents(config, sample_docs()).unwrap()
}

#[test]
fn search_uses_and_semantics() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    assert_eq!(e.search(&["one"]), vec![docs[0].clone()]);
    assert_eq!(e.search(&["two", "Document"]), vec![docs[1].clone()]);
    assert!(e.search(&["one", "document", "four"]).is_empty());
    assert_eq!(e.search(&["document"]), docs);
}

#[test]
fn search_without_partial_credit() {
    let e = sample_engine(10, true);
    // "ab" normalizes to nothing, which sinks the whole query
    assert!(e.search(&["document", "ab"]).is_empty());
    assert!(e.search(&["missing"]).is_empty());
    assert!(e.search(&[""]).is_empty());
}

#[test]
fn search_caps_results_keeping_earliest() {
    let docs = sample_docs();
    let e = sample_engine(2, true);
    assert_eq!(e.search(&["document"]), vec![docs[0].clone(), docs[1].clone()]);

    let e = sample_engine(3, true);
    assert_eq!(e.search(&["document"]).len(), 3);
}

#[test]
fn delete_flags_and_purges_matches() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    let affected = e.delete(&["top", "secret"]);
    assert_eq!(affected.count, 2);
    assert_eq!(e.corpus(), vec![docs[2].clone()]);
    assert_eq!(e.stats().pending_tombstones, 0);
}

#[test]
fn delete_single_document() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    assert_eq!(e.delete(&["one"]).count, 1);
    assert_eq!(e.corpus(), vec![docs[1].clone(), docs[2].clone()]);
}

#[test]
fn delete_respects_the_result_cap() {
    let docs = sample_docs();
    let e = sample_engine(2, true);
    assert_eq!(e.delete(&["document"]).count, 2);
    assert_eq!(e.corpus(), vec![docs[2].clone()]);
}

#[test]
fn delete_without_matches_changes_nothing() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    assert_eq!(e.delete(&["document", "not", "found"]).count, 0);
    assert_eq!(e.corpus(), docs);
}

#[test]
fn delete_counts_only_this_call() {
    let e = sample_engine(10, true);
    assert_eq!(e.delete(&["one"]).count, 1);
    assert_eq!(e.delete(&["secret"]).count, 1);
    assert_eq!(e.delete(&["secret"]).count, 0);
}

#[test]
fn searches_stay_correct_after_purge() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    e.delete(&["one"]);
    assert_eq!(e.search(&["two"]), vec![docs[1].clone()]);
    assert_eq!(e.search(&["three"]), vec![docs[2].clone()]);
    assert_eq!(e.search(&["document"]), vec![docs[1].clone(), docs[2].clone()]);
    assert!(e.search(&["one"]).is_empty());
}

#[test]
fn purge_with_nothing_flagged_is_a_noop() {
    let docs = sample_docs();
    let e = sample_engine(10, true);
    let before = e.stats();
    assert_eq!(e.purge(), 3);
    assert_eq!(e.corpus(), docs);
    assert_eq!(e.stats(), before);
}

#[test]
fn deferred_purge_hides_tombstones_until_swept() {
    let docs = sample_docs();
    let e = sample_engine(10, false);
    assert_eq!(e.delete(&["top", "secret"]).count, 2);

    // still stored, but never returned
    assert_eq!(e.stats().documents, 3);
    assert_eq!(e.stats().pending_tombstones, 2);
    assert_eq!(e.search(&["document"]), vec![docs[2].clone()]);
    assert!(e.search(&["secret"]).is_empty());
    assert!(e.match_all(&["top"]).is_empty());

    // flagged documents cannot be deleted twice
    assert_eq!(e.delete(&["secret"]).count, 0);

    assert_eq!(e.purge(), 1);
    assert_eq!(e.corpus(), vec![docs[2].clone()]);
    assert_eq!(e.stats().pending_tombstones, 0);
}

#[test]
fn tombstones_do_not_consume_the_result_cap() {
    let docs = sample_docs();
    let e = sample_engine(1, false);
    e.delete(&["one"]);
    assert_eq!(e.search(&["document"]), vec![docs[1].clone()]);
}

#[test]
fn search_never_returns_deleted_documents() {
    let e = sample_engine(10, false);
    e.delete(&["two"]);
    for keywords in [vec!["document"], vec!["top"], vec!["secret", "document"], vec!["two"]] {
        for doc in e.search(keywords.as_slice()) {
            assert!(!doc.deleted);
            assert_ne!(doc.description, "Document Two. Top secret!");
        }
    }
}
