use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::identifiers::{ContentHash, ParagraphIdx, RevisionId};

/// One committed revision: metadata plus its paragraph structure.
///
/// Paragraph instances are held by arena index; the same instance is shared
/// with every other revision containing that exact paragraph.
#[derive(Debug, Clone, Serialize)]
pub struct Revision {
    pub id: RevisionId,
    pub editor: String,
    pub timestamp: DateTime<Utc>,
    /// Raw content length in bytes.
    pub length: usize,
    pub paragraphs: HashMap<ContentHash, Vec<ParagraphIdx>>,
    pub ordered_paragraphs: Vec<ContentHash>,
    /// Number of tokens originally authored in this revision.
    pub original_adds: usize,
}

impl Revision {
    pub(crate) fn new(
        id: RevisionId,
        editor: String,
        timestamp: DateTime<Utc>,
        length: usize,
    ) -> Self {
        Self {
            id,
            editor,
            timestamp,
            length,
            paragraphs: HashMap::new(),
            ordered_paragraphs: Vec::new(),
            original_adds: 0,
        }
    }

    /// Empty stand-in used as the predecessor of the first revision.
    pub(crate) fn sentinel() -> Self {
        Self::new(RevisionId(0), String::new(), DateTime::<Utc>::UNIX_EPOCH, 0)
    }

    pub(crate) fn attach_paragraph(&mut self, hash: ContentHash, instance: ParagraphIdx) {
        self.paragraphs.entry(hash.clone()).or_default().push(instance);
        self.ordered_paragraphs.push(hash);
    }
}
