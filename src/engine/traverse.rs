use crate::history::revision::Revision;
use crate::history::token::Token;
use crate::store::{Corpus, OccurrenceCounter};
use crate::types::identifiers::{ParagraphIdx, SentenceIdx};

/// Lazy traversal of one revision's tokens in reading order: paragraph
/// order, then sentence occurrence order, then word order.
///
/// Duplicate-hash occurrences are resolved with the same per-hash running
/// counter the matching passes use, so the k-th occurrence of a hash always
/// walks the k-th stored instance. The iterator is finite and restartable:
/// requesting it again starts a fresh walk.
pub struct RevisionTokens<'a> {
    corpus: &'a Corpus,
    revision: &'a Revision,
    paragraph_counter: OccurrenceCounter,
    paragraph_pos: usize,
    current_paragraph: Option<ParagraphIdx>,
    sentence_counter: OccurrenceCounter,
    sentence_pos: usize,
    current_sentence: Option<SentenceIdx>,
    word_pos: usize,
}

impl<'a> RevisionTokens<'a> {
    pub(crate) fn new(corpus: &'a Corpus, revision: &'a Revision) -> Self {
        Self {
            corpus,
            revision,
            paragraph_counter: OccurrenceCounter::new(),
            paragraph_pos: 0,
            current_paragraph: None,
            sentence_counter: OccurrenceCounter::new(),
            sentence_pos: 0,
            current_sentence: None,
            word_pos: 0,
        }
    }
}

impl<'a> Iterator for RevisionTokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        loop {
            if let Some(s) = self.current_sentence {
                let sentence = self.corpus.sentence(s)?;
                if self.word_pos < sentence.words.len() {
                    let token = sentence.words[self.word_pos];
                    self.word_pos += 1;
                    return self.corpus.ledger.get(token);
                }
                self.current_sentence = None;
            }

            if let Some(p) = self.current_paragraph {
                let paragraph = self.corpus.paragraph(p)?;
                if self.sentence_pos < paragraph.ordered_sentences.len() {
                    let hash = &paragraph.ordered_sentences[self.sentence_pos];
                    self.sentence_pos += 1;
                    let occurrence = self.sentence_counter.next(hash);
                    self.current_sentence = paragraph
                        .sentences
                        .get(hash)
                        .and_then(|list| list.get(occurrence))
                        .copied();
                    self.word_pos = 0;
                    self.current_sentence?;
                    continue;
                }
                self.current_paragraph = None;
            }

            if self.paragraph_pos < self.revision.ordered_paragraphs.len() {
                let hash = &self.revision.ordered_paragraphs[self.paragraph_pos];
                self.paragraph_pos += 1;
                let occurrence = self.paragraph_counter.next(hash);
                self.current_paragraph = self
                    .revision
                    .paragraphs
                    .get(hash)
                    .and_then(|list| list.get(occurrence))
                    .copied();
                self.sentence_pos = 0;
                self.sentence_counter = OccurrenceCounter::new();
                self.current_paragraph?;
                continue;
            }
            return None;
        }
    }
}
