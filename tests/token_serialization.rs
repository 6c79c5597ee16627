use authorship_core::engine::ArticleHistory;
use authorship_core::types::{Admission, RevisionId, RevisionRecord, TokenId};
use chrono::{TimeZone, Utc};
use serde_json::json;

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

#[test]
fn golden_token_serialization() {
    let mut article = ArticleHistory::new("golden");
    admit(&mut article, 1, "the cat sat");
    admit(&mut article, 2, "the cat sat on the mat");
    admit(&mut article, 3, "the cat sat");
    admit(&mut article, 4, "the cat sat on the mat");

    let token = article.token(TokenId(3)).unwrap();
    let value = serde_json::to_value(token).unwrap();

    assert_eq!(
        value,
        json!({
            "token_id": 3,
            "value": "on",
            "origin_revision": 2,
            "last_revision": 4,
            "inbound": [4],
            "outbound": [3],
        })
    );
}

#[test]
fn golden_revision_serialization_shape() {
    let mut article = ArticleHistory::new("golden");
    admit(&mut article, 1, "the cat sat");

    let revision = article.revision(RevisionId(1)).unwrap();
    let value = serde_json::to_value(revision).unwrap();

    assert_eq!(value["id"], json!(1));
    assert_eq!(value["editor"], json!("editor-1"));
    assert_eq!(value["length"], json!(11));
    assert_eq!(value["original_adds"], json!(3));
    assert_eq!(value["ordered_paragraphs"].as_array().unwrap().len(), 1);

    let hash = value["ordered_paragraphs"][0].as_str().unwrap();
    assert!(hash.starts_with("sha256:"));
    assert!(value["paragraphs"][hash].is_array());
}
