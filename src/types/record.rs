use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{ContentHash, RevisionId};

/// One revision as delivered by an upstream source (API page, dump stream).
///
/// `text` is `None` when the revision's content was deleted or suppressed
/// upstream; such revisions are skipped entirely. `hash` and `length` are
/// computed from the text when the source did not supply them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub id: RevisionId,
    pub editor: String,
    pub timestamp: DateTime<Utc>,
    pub text: Option<String>,
    pub hash: Option<ContentHash>,
    pub length: Option<usize>,
    pub minor: bool,
    pub comment: Option<String>,
}

impl RevisionRecord {
    pub fn new(
        id: RevisionId,
        editor: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            editor: editor.into(),
            timestamp,
            text: Some(text.into()),
            hash: None,
            length: None,
            minor: false,
            comment: None,
        }
    }

    /// True when the edit is flagged minor and carries a nonempty comment,
    /// the marker of a good-faith content move.
    pub fn is_content_move(&self) -> bool {
        self.minor && self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Why a revision was excluded from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpamReason {
    /// Content hash already present in spam memory.
    KnownContent,
    /// Size-drop heuristic fired.
    SizeDrop,
    /// Token density of the new text exceeded the vandalism limit.
    TokenDensity,
}

/// Outcome of one revision's admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// Revision committed into history.
    Admitted,
    /// Content unavailable; the revision contributes nothing.
    Skipped,
    /// Revision rejected and recorded in spam memory.
    Rejected(SpamReason),
}

/// Internal inconsistency detected while matching a revision.
///
/// The article state is fully rolled back before this is returned; the
/// caller decides whether to continue with subsequent revisions.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("occurrence {occurrence} of content {hash} has no stored instance")]
    OccurrenceMismatch { hash: ContentHash, occurrence: usize },

    #[error("paragraph text was discarded before sentence analysis")]
    ParagraphTextMissing,
}
