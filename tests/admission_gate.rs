use authorship_core::engine::{ArticleHistory, SpamGateConfig};
use authorship_core::types::{Admission, ContentHash, RevisionId, RevisionRecord, SpamReason};
use chrono::{TimeZone, Utc};

fn record(id: u64, text: &str) -> RevisionRecord {
    RevisionRecord::new(
        RevisionId(id),
        "editor-1",
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        text,
    )
}

fn long_distinct_text() -> String {
    (0..400).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn size_drop_is_rejected_then_shortcut_on_repeat() {
    let mut article = ArticleHistory::new("gate");
    let seed = long_distinct_text();
    assert!(seed.len() > 1000);
    assert_eq!(
        article.process_revision(record(1, &seed)).unwrap(),
        Admission::Admitted
    );
    let tokens_before = article.token_count();

    // a blanking edit: large to small, no comment, not minor
    assert_eq!(
        article.process_revision(record(2, "tiny")).unwrap(),
        Admission::Rejected(SpamReason::SizeDrop)
    );
    assert_eq!(article.token_count(), tokens_before);
    assert_eq!(article.current_revision().unwrap().id, RevisionId(1));
    assert_eq!(article.spam_ids(), &[RevisionId(2)]);

    // identical content again: rejected by hash, not by re-running the gate
    assert_eq!(
        article.process_revision(record(3, "tiny")).unwrap(),
        Admission::Rejected(SpamReason::KnownContent)
    );
    assert_eq!(
        article.process_revision(record(4, "tiny")).unwrap(),
        Admission::Rejected(SpamReason::KnownContent)
    );
    assert_eq!(
        article.spam_ids(),
        &[RevisionId(2), RevisionId(3), RevisionId(4)]
    );
    assert_eq!(article.ordered_revisions(), &[RevisionId(1)]);
}

#[test]
fn content_move_is_exempt_from_the_size_drop() {
    let mut article = ArticleHistory::new("gate");
    let seed = long_distinct_text();
    article.process_revision(record(1, &seed)).unwrap();

    let mut moved = record(2, "moved elsewhere");
    moved.minor = true;
    moved.comment = Some("content moved to the summary article".into());
    assert_eq!(
        article.process_revision(moved).unwrap(),
        Admission::Admitted
    );
    assert_eq!(article.current_revision().unwrap().id, RevisionId(2));
}

#[test]
fn minor_without_comment_is_not_a_content_move() {
    let mut article = ArticleHistory::new("gate");
    let seed = long_distinct_text();
    article.process_revision(record(1, &seed)).unwrap();

    let mut blanked = record(2, "tiny");
    blanked.minor = true; // no comment
    assert_eq!(
        article.process_revision(blanked).unwrap(),
        Admission::Rejected(SpamReason::SizeDrop)
    );
}

#[test]
fn small_to_small_drop_is_exempt() {
    let mut article = ArticleHistory::new("gate");
    article
        .process_revision(record(1, "short seed text with several words"))
        .unwrap();
    // a drastic relative drop, but the previous revision is below the floor
    assert_eq!(
        article.process_revision(record(2, "hi")).unwrap(),
        Admission::Admitted
    );
}

#[test]
fn dense_repetition_is_rejected_without_creating_tokens() {
    let mut article = ArticleHistory::new("gate");
    article
        .process_revision(record(1, "alpha beta gamma"))
        .unwrap();
    let tokens_before = article.token_count();

    let spam = "buy ".repeat(50);
    assert_eq!(
        article.process_revision(record(2, &spam)).unwrap(),
        Admission::Rejected(SpamReason::TokenDensity)
    );
    assert_eq!(article.token_count(), tokens_before);
    assert_eq!(article.current_revision().unwrap().id, RevisionId(1));

    // and the rolled-back state still matches cleanly afterwards
    assert_eq!(
        article.process_revision(record(3, "alpha beta gamma")).unwrap(),
        Admission::Admitted
    );
    assert_eq!(article.token_count(), tokens_before);
}

#[test]
fn missing_content_is_skipped_entirely() {
    let mut article = ArticleHistory::new("gate");
    let mut hidden = record(1, "");
    hidden.text = None;
    assert_eq!(
        article.process_revision(hidden).unwrap(),
        Admission::Skipped
    );
    assert_eq!(article.token_count(), 0);
    assert!(article.ordered_revisions().is_empty());
    assert!(article.spam_ids().is_empty());
}

#[test]
fn gate_thresholds_are_configurable() {
    let gate = SpamGateConfig {
        density_limit: 2.0,
        ..SpamGateConfig::default()
    };
    let mut article = ArticleHistory::new("gate").with_gate(gate);
    article
        .process_revision(record(1, "alpha beta gamma"))
        .unwrap();

    // mild repetition: fine under the default limit, spam under this one
    assert_eq!(
        article.process_revision(record(2, "word word word word word")).unwrap(),
        Admission::Rejected(SpamReason::TokenDensity)
    );
}

#[test]
fn supplied_hash_drives_the_spam_shortcut() {
    let mut article = ArticleHistory::new("gate");
    let seed = long_distinct_text();
    article.process_revision(record(1, &seed)).unwrap();

    let mut first = record(2, "tiny");
    first.hash = Some(ContentHash::supplied("upstream-hash-1"));
    assert_eq!(
        article.process_revision(first).unwrap(),
        Admission::Rejected(SpamReason::SizeDrop)
    );

    // different text, same upstream hash: the shortcut fires
    let mut second = record(3, "tiny but different");
    second.hash = Some(ContentHash::supplied("upstream-hash-1"));
    assert_eq!(
        article.process_revision(second).unwrap(),
        Admission::Rejected(SpamReason::KnownContent)
    );
}
