use std::collections::HashSet;

use crate::store::Corpus;
use crate::types::identifiers::{ParagraphIdx, SentenceIdx, TokenId};

/// In-progress match state for one revision's admission attempt.
///
/// The session owns every transient mark the matching passes make: an
/// instance or token is "matched" exactly while its id is in one of these
/// sets. Dropping the session therefore restores the between-revisions
/// invariant that nothing in long-lived state is marked, on the commit and
/// rollback paths alike. The watermarks record the arena lengths at open;
/// rollback truncates back to them, erasing every instance the attempt
/// created.
#[derive(Debug)]
pub(crate) struct MatchSession {
    matched_paragraphs: HashSet<ParagraphIdx>,
    matched_sentences: HashSet<SentenceIdx>,
    matched_tokens: HashSet<TokenId>,

    /// Deletion events recorded by the word differ, applied at commit.
    pub(crate) removed_tokens: Vec<TokenId>,

    pub(crate) unmatched_curr_paragraphs: Vec<ParagraphIdx>,
    pub(crate) unmatched_prev_paragraphs: Vec<ParagraphIdx>,
    pub(crate) unmatched_curr_sentences: Vec<SentenceIdx>,
    pub(crate) unmatched_prev_sentences: Vec<SentenceIdx>,

    pub(crate) possible_vandalism: bool,

    pub(crate) paragraph_watermark: usize,
    pub(crate) sentence_watermark: usize,
    pub(crate) token_watermark: usize,
}

impl MatchSession {
    pub(crate) fn open(corpus: &Corpus) -> Self {
        Self {
            matched_paragraphs: HashSet::new(),
            matched_sentences: HashSet::new(),
            matched_tokens: HashSet::new(),
            removed_tokens: Vec::new(),
            unmatched_curr_paragraphs: Vec::new(),
            unmatched_prev_paragraphs: Vec::new(),
            unmatched_curr_sentences: Vec::new(),
            unmatched_prev_sentences: Vec::new(),
            possible_vandalism: false,
            paragraph_watermark: corpus.paragraphs.len(),
            sentence_watermark: corpus.sentences.len(),
            token_watermark: corpus.ledger.len(),
        }
    }

    pub(crate) fn mark_paragraph(&mut self, idx: ParagraphIdx) {
        self.matched_paragraphs.insert(idx);
    }

    pub(crate) fn mark_sentence(&mut self, idx: SentenceIdx) {
        self.matched_sentences.insert(idx);
    }

    pub(crate) fn mark_token(&mut self, id: TokenId) {
        self.matched_tokens.insert(id);
    }

    pub(crate) fn is_paragraph_matched(&self, idx: ParagraphIdx) -> bool {
        self.matched_paragraphs.contains(&idx)
    }

    pub(crate) fn is_sentence_matched(&self, idx: SentenceIdx) -> bool {
        self.matched_sentences.contains(&idx)
    }

    pub(crate) fn is_token_matched(&self, id: TokenId) -> bool {
        self.matched_tokens.contains(&id)
    }

    pub(crate) fn matched_tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.matched_tokens.iter().copied()
    }
}
