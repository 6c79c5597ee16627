pub mod identifiers;
pub mod record;

pub use identifiers::{ContentHash, ParagraphIdx, RevisionId, SentenceIdx, TokenId};
pub use record::{Admission, MatchingError, RevisionRecord, SpamReason};
