pub mod content;
pub mod ledger;

pub use content::ContentStore;
pub use ledger::TokenLedger;

pub(crate) use content::OccurrenceCounter;

use crate::history::structure::{Paragraph, Sentence};
use crate::types::identifiers::{ParagraphIdx, SentenceIdx, TokenId};

/// Arenas holding every paragraph, sentence, and token instance ever
/// created for the article. Instances are addressed by stable indices and
/// shared (never copied) between revisions and the content stores.
#[derive(Debug, Default)]
pub(crate) struct Corpus {
    pub(crate) paragraphs: Vec<Paragraph>,
    pub(crate) sentences: Vec<Sentence>,
    pub(crate) ledger: TokenLedger,
}

impl Corpus {
    pub(crate) fn paragraph(&self, idx: ParagraphIdx) -> Option<&Paragraph> {
        self.paragraphs.get(idx.index())
    }

    pub(crate) fn sentence(&self, idx: SentenceIdx) -> Option<&Sentence> {
        self.sentences.get(idx.index())
    }

    pub(crate) fn push_paragraph(&mut self, paragraph: Paragraph) -> ParagraphIdx {
        let idx = ParagraphIdx(self.paragraphs.len() as u32);
        self.paragraphs.push(paragraph);
        idx
    }

    pub(crate) fn push_sentence(&mut self, sentence: Sentence) -> SentenceIdx {
        let idx = SentenceIdx(self.sentences.len() as u32);
        self.sentences.push(sentence);
        idx
    }

    /// Token ids of every word contained in the paragraph, across all of
    /// its sentence instances. Order is unspecified; callers only classify.
    pub(crate) fn paragraph_token_ids<'a>(
        &'a self,
        paragraph: &'a Paragraph,
    ) -> impl Iterator<Item = TokenId> + 'a {
        paragraph
            .sentences
            .values()
            .flatten()
            .filter_map(move |idx| self.sentences.get(idx.index()))
            .flat_map(|sentence| sentence.words.iter().copied())
    }
}
