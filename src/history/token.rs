use serde::Serialize;

use crate::types::identifiers::{RevisionId, TokenId};

/// The atomic unit of authorship: one word-level occurrence in the text,
/// permanently identified once created.
///
/// `value`, `token_id` and `origin_revision` are write-once; the remaining
/// fields form the token's presence/absence timeline across revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token_id: TokenId,
    pub value: String,
    /// Revision that created the token.
    pub origin_revision: RevisionId,
    /// Most recent revision in which the token was present.
    pub last_revision: RevisionId,
    /// Revisions at which the token reappeared after having been removed.
    pub inbound: Vec<RevisionId>,
    /// Revisions at which the token was removed from the live text.
    pub outbound: Vec<RevisionId>,
}

impl Token {
    pub(crate) fn new(token_id: TokenId, value: String, origin: RevisionId) -> Self {
        Self {
            token_id,
            value,
            origin_revision: origin,
            last_revision: origin,
            inbound: Vec::new(),
            outbound: Vec::new(),
        }
    }

    /// True when the token was part of the live text as of revision `rev`,
    /// derived from the origin and the inbound/outbound toggle timeline.
    pub fn live_at(&self, rev: RevisionId) -> bool {
        if rev < self.origin_revision {
            return false;
        }
        let removed = self.outbound.iter().filter(|r| **r <= rev).count();
        let restored = self.inbound.iter().filter(|r| **r <= rev).count();
        restored >= removed
    }
}
