use authorship_core::engine::ArticleHistory;
use authorship_core::types::{Admission, RevisionId, RevisionRecord};
use chrono::{TimeZone, Utc};

fn record(id: u64, text: &str) -> RevisionRecord {
    RevisionRecord::new(
        RevisionId(id),
        "editor-1",
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        text,
    )
}

fn admit(article: &mut ArticleHistory, id: u64, text: &str) {
    assert_eq!(
        article.process_revision(record(id, text)).unwrap(),
        Admission::Admitted
    );
}

fn values(article: &ArticleHistory, id: u64) -> Vec<String> {
    article
        .revision_tokens(RevisionId(id))
        .unwrap()
        .map(|token| token.value.clone())
        .collect()
}

fn ids(article: &ArticleHistory, id: u64) -> Vec<u32> {
    article
        .revision_tokens(RevisionId(id))
        .unwrap()
        .map(|token| token.token_id.0)
        .collect()
}

#[test]
fn tokens_come_back_in_reading_order() {
    let mut article = ArticleHistory::new("traversal");
    admit(&mut article, 1, "first block here\n\nsecond block there");

    assert_eq!(
        values(&article, 1),
        vec!["first", "block", "here", "second", "block", "there"]
    );
    assert_eq!(ids(&article, 1), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn duplicate_paragraphs_resolve_to_distinct_instances() {
    let mut article = ArticleHistory::new("traversal");
    admit(&mut article, 1, "a b\n\na b");

    // same hash twice, but the k-th occurrence walks the k-th instance
    assert_eq!(values(&article, 1), vec!["a", "b", "a", "b"]);
    assert_eq!(ids(&article, 1), vec![0, 1, 2, 3]);
}

#[test]
fn duplicate_sentences_inside_one_paragraph_resolve_in_order() {
    let mut article = ArticleHistory::new("traversal");
    admit(&mut article, 1, "echo run. echo run.");

    assert_eq!(values(&article, 1), vec!["echo", "run", ".", "echo", "run", "."]);
    assert_eq!(ids(&article, 1), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn traversal_is_restartable_and_revision_scoped() {
    let mut article = ArticleHistory::new("traversal");
    admit(&mut article, 1, "shared text\n\nonly in one");
    admit(&mut article, 2, "shared text");

    assert_eq!(values(&article, 1), values(&article, 1));
    assert_eq!(values(&article, 2), vec!["shared", "text"]);
    // earlier revisions keep their full structure
    assert_eq!(
        values(&article, 1),
        vec!["shared", "text", "only", "in", "one"]
    );
    assert!(article.revision_tokens(RevisionId(99)).is_none());
}

#[test]
fn carried_over_paragraphs_share_token_instances() {
    let mut article = ArticleHistory::new("traversal");
    admit(&mut article, 1, "kept paragraph\n\ndropped paragraph");
    admit(&mut article, 2, "kept paragraph");

    let rev1: Vec<u32> = ids(&article, 1);
    let rev2: Vec<u32> = ids(&article, 2);
    assert_eq!(&rev1[..2], &rev2[..]);
}
