pub mod gate;

mod diff;
mod differ;
mod matching;
mod session;
mod traverse;

pub use gate::SpamGateConfig;
pub use traverse::RevisionTokens;

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::history::revision::Revision;
use crate::history::structure::{Paragraph, Sentence};
use crate::history::token::Token;
use crate::segment::{DefaultSegmenter, Segmenter};
use crate::store::{ContentStore, Corpus};
use crate::types::identifiers::{ContentHash, ParagraphIdx, RevisionId, SentenceIdx, TokenId};
use crate::types::record::{Admission, MatchingError, RevisionRecord, SpamReason};

use differ::WordPassOutcome;
use session::MatchSession;

/// The full authorship state of one article: every paragraph, sentence,
/// and token instance ever committed, the committed revision sequence, and
/// the spam memory.
///
/// Revisions must be fed in chronological order; each admission attempt is
/// atomic — it either commits completely or leaves no trace.
pub struct ArticleHistory<S = DefaultSegmenter> {
    title: String,
    segmenter: S,
    gate: SpamGateConfig,
    corpus: Corpus,
    paragraph_store: ContentStore<ParagraphIdx>,
    sentence_store: ContentStore<SentenceIdx>,
    revisions: HashMap<RevisionId, Revision>,
    order: Vec<RevisionId>,
    current: Option<RevisionId>,
    spam_ids: Vec<RevisionId>,
    spam_hashes: HashSet<ContentHash>,
}

impl ArticleHistory<DefaultSegmenter> {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_segmenter(title, DefaultSegmenter)
    }
}

impl<S: Segmenter> ArticleHistory<S> {
    pub fn with_segmenter(title: impl Into<String>, segmenter: S) -> Self {
        Self {
            title: title.into(),
            segmenter,
            gate: SpamGateConfig::default(),
            corpus: Corpus::default(),
            paragraph_store: ContentStore::new(),
            sentence_store: ContentStore::new(),
            revisions: HashMap::new(),
            order: Vec::new(),
            current: None,
            spam_ids: Vec::new(),
            spam_hashes: HashSet::new(),
        }
    }

    pub fn with_gate(mut self, gate: SpamGateConfig) -> Self {
        self.gate = gate;
        self
    }

    /// Admit, reject, or skip one revision.
    ///
    /// Runs the gate, then the three matching passes inside a transactional
    /// scope. A [`MatchingError`] is returned only after the article state
    /// has been fully rolled back; the caller decides whether to continue
    /// with later revisions.
    pub fn process_revision(&mut self, mut record: RevisionRecord) -> Result<Admission, MatchingError> {
        let Some(text) = record.text.take() else {
            debug!(rev_id = %record.id, "revision_skipped_no_content");
            return Ok(Admission::Skipped);
        };
        let rev_hash = record
            .hash
            .take()
            .unwrap_or_else(|| ContentHash::of(&text));

        // Exact duplicate of known vandalism: reject without matching.
        if self.spam_hashes.contains(&rev_hash) {
            self.record_spam(record.id, rev_hash, SpamReason::KnownContent);
            return Ok(Admission::Rejected(SpamReason::KnownContent));
        }

        let length = record.length.unwrap_or(text.len());
        let prev_length = self.current_revision().map(|rev| rev.length).unwrap_or(0);
        if self.gate.is_size_drop(prev_length, length, record.is_content_move()) {
            self.record_spam(record.id, rev_hash, SpamReason::SizeDrop);
            return Ok(Admission::Rejected(SpamReason::SizeDrop));
        }

        let lowered = text.to_lowercase();
        let mut staged = Revision::new(record.id, record.editor, record.timestamp, length);
        let mut session = MatchSession::open(&self.corpus);

        match self.run_matching(&lowered, &mut staged, &mut session) {
            Err(err) => {
                // Fatal for this revision, but never partially applied.
                self.rollback(&session);
                Err(err)
            }
            Ok(WordPassOutcome::Vandalism) => {
                self.rollback(&session);
                self.record_spam(record.id, rev_hash, SpamReason::TokenDensity);
                Ok(Admission::Rejected(SpamReason::TokenDensity))
            }
            Ok(WordPassOutcome::Clean) => {
                self.commit(staged, session);
                Ok(Admission::Admitted)
            }
        }
    }

    fn run_matching(
        &mut self,
        text: &str,
        staged: &mut Revision,
        session: &mut MatchSession,
    ) -> Result<WordPassOutcome, MatchingError> {
        let Self {
            segmenter,
            gate,
            corpus,
            paragraph_store,
            sentence_store,
            revisions,
            current,
            ..
        } = self;

        let sentinel = Revision::sentinel();
        let prev = current
            .and_then(|id| revisions.get(&id))
            .unwrap_or(&sentinel);

        matching::paragraph_pass(segmenter, corpus, paragraph_store, prev, staged, text, session)?;

        if !session.unmatched_curr_paragraphs.is_empty() {
            let total = staged.ordered_paragraphs.len().max(1);
            let ratio = session.unmatched_curr_paragraphs.len() as f64 / total as f64;
            if ratio > gate.unmatched_ratio_floor {
                session.possible_vandalism = true;
            }

            matching::sentence_pass(segmenter, corpus, sentence_store, session)?;

            if !session.unmatched_curr_sentences.is_empty() {
                return Ok(differ::word_pass(corpus, staged, gate, session));
            }
        }
        Ok(WordPassOutcome::Clean)
    }

    /// Make the staged revision current and fold the session's results into
    /// long-lived state: deletion events, the presence chain of surviving
    /// tokens, and the newly introduced structures.
    fn commit(&mut self, staged: Revision, session: MatchSession) {
        let curr_id = staged.id;
        let prev_id = self.current;
        let Self {
            corpus,
            paragraph_store,
            sentence_store,
            revisions,
            order,
            current,
            ..
        } = self;
        let Corpus {
            paragraphs,
            sentences,
            ledger,
        } = corpus;

        // Deletions discovered by the word differ.
        for &t in &session.removed_tokens {
            if let Some(token) = ledger.get_mut(t) {
                token.outbound.push(curr_id);
            }
        }

        // Previous-revision tokens absent from the new text.
        if let Some(prev) = prev_id.and_then(|id| revisions.get(&id)) {
            let mut vanished: Vec<TokenId> = Vec::new();
            for instances in prev.paragraphs.values() {
                for &p in instances {
                    let Some(paragraph) = paragraphs.get(p.index()) else {
                        continue;
                    };
                    for sentence_instances in paragraph.sentences.values() {
                        for &s in sentence_instances {
                            let Some(sentence) = sentences.get(s.index()) else {
                                continue;
                            };
                            for &t in &sentence.words {
                                if !session.is_token_matched(t) {
                                    vanished.push(t);
                                }
                            }
                        }
                    }
                }
            }
            for t in vanished {
                if let Some(token) = ledger.get_mut(t) {
                    token.outbound.push(curr_id);
                }
            }
        }

        // Survivors: tokens that matched and were not removed this pass. A
        // survivor whose last use predates the previous revision is
        // reappearing.
        for t in session.matched_tokens() {
            let Some(token) = ledger.get_mut(t) else {
                continue;
            };
            if token.outbound.last() == Some(&curr_id) {
                continue;
            }
            if prev_id != Some(token.last_revision) {
                token.inbound.push(curr_id);
            }
            token.last_revision = curr_id;
        }

        // Publish the structures this revision introduced; their working
        // text is no longer needed.
        for &p in &session.unmatched_curr_paragraphs {
            if let Some(paragraph) = paragraphs.get_mut(p.index()) {
                paragraph_store.insert(paragraph.hash.clone(), p);
                paragraph.text = None;
            }
        }
        for &s in &session.unmatched_curr_sentences {
            if let Some(sentence) = sentences.get_mut(s.index()) {
                sentence_store.insert(sentence.hash.clone(), s);
                sentence.text = None;
                sentence.word_values = Vec::new();
            }
        }

        info!(
            rev_id = %curr_id,
            original_adds = staged.original_adds,
            paragraphs = staged.ordered_paragraphs.len(),
            "revision_committed"
        );
        order.push(curr_id);
        revisions.insert(curr_id, staged);
        *current = Some(curr_id);
    }

    /// Erase every instance the attempt created. Instances older than the
    /// session's watermarks were never mutated, so truncation restores the
    /// pre-attempt state exactly.
    fn rollback(&mut self, session: &MatchSession) {
        self.corpus.paragraphs.truncate(session.paragraph_watermark);
        self.corpus.sentences.truncate(session.sentence_watermark);
        self.corpus.ledger.truncate(session.token_watermark);
    }

    fn record_spam(&mut self, id: RevisionId, hash: ContentHash, reason: SpamReason) {
        warn!(rev_id = %id, ?reason, "revision_rejected");
        self.spam_ids.push(id);
        self.spam_hashes.insert(hash);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn current_revision(&self) -> Option<&Revision> {
        self.current.and_then(|id| self.revisions.get(&id))
    }

    pub fn revision(&self, id: RevisionId) -> Option<&Revision> {
        self.revisions.get(&id)
    }

    /// Committed revisions in admission order.
    pub fn revisions(&self) -> impl Iterator<Item = &Revision> {
        self.order.iter().filter_map(|id| self.revisions.get(id))
    }

    pub fn ordered_revisions(&self) -> &[RevisionId] {
        &self.order
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.corpus.ledger.get(id)
    }

    /// The full token ledger, in creation order.
    pub fn tokens(&self) -> &[Token] {
        self.corpus.ledger.as_slice()
    }

    pub fn token_count(&self) -> usize {
        self.corpus.ledger.len()
    }

    pub fn paragraph(&self, idx: ParagraphIdx) -> Option<&Paragraph> {
        self.corpus.paragraph(idx)
    }

    pub fn sentence(&self, idx: SentenceIdx) -> Option<&Sentence> {
        self.corpus.sentence(idx)
    }

    /// Ids of every rejected revision, in rejection order.
    pub fn spam_ids(&self) -> &[RevisionId] {
        &self.spam_ids
    }

    /// Reading-order token traversal of a committed revision.
    pub fn revision_tokens(&self, id: RevisionId) -> Option<RevisionTokens<'_>> {
        let revision = self.revisions.get(&id)?;
        Some(RevisionTokens::new(&self.corpus, revision))
    }
}
