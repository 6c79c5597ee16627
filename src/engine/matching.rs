use crate::engine::session::MatchSession;
use crate::history::revision::Revision;
use crate::history::structure::{Paragraph, Sentence};
use crate::segment::Segmenter;
use crate::store::{ContentStore, Corpus, OccurrenceCounter};
use crate::types::identifiers::{ContentHash, ParagraphIdx, SentenceIdx, TokenId};
use crate::types::record::MatchingError;

/// How a candidate instance relates to the tokens claimed so far this pass.
enum Claim {
    /// No contained token is claimed yet: the whole instance is available.
    Whole,
    /// Every contained token is already claimed: the content was consumed
    /// by an earlier step of this same pass.
    Accounted,
    /// Mixed claims; the candidate cannot be used for this occurrence.
    Conflict,
}

fn classify<I>(tokens: I, session: &MatchSession) -> Claim
where
    I: IntoIterator<Item = TokenId>,
{
    let mut any = false;
    let mut all = true;
    for token in tokens {
        if session.is_token_matched(token) {
            any = true;
        } else {
            all = false;
        }
    }
    if !any {
        Claim::Whole
    } else if all {
        Claim::Accounted
    } else {
        Claim::Conflict
    }
}

/// First claimable instance in `pool`, scanning in stored order.
///
/// A `Whole` claim marks the instance plus everything inside it and returns
/// it for reattachment; an `Accounted` candidate is marked as a bookkeeping
/// no-op and scanning continues; a `Conflict` candidate is skipped.
fn scan_paragraph_pool(
    corpus: &Corpus,
    pool: &[ParagraphIdx],
    session: &mut MatchSession,
) -> Option<ParagraphIdx> {
    for &p in pool {
        if session.is_paragraph_matched(p) {
            continue;
        }
        let Some(paragraph) = corpus.paragraph(p) else {
            continue;
        };
        match classify(corpus.paragraph_token_ids(paragraph), session) {
            Claim::Whole => {
                session.mark_paragraph(p);
                for instances in paragraph.sentences.values() {
                    for &s in instances {
                        session.mark_sentence(s);
                        if let Some(sentence) = corpus.sentence(s) {
                            for &t in &sentence.words {
                                session.mark_token(t);
                            }
                        }
                    }
                }
                return Some(p);
            }
            Claim::Accounted => session.mark_paragraph(p),
            Claim::Conflict => {}
        }
    }
    None
}

fn scan_sentence_pool(
    corpus: &Corpus,
    pool: &[SentenceIdx],
    session: &mut MatchSession,
) -> Option<SentenceIdx> {
    for &s in pool {
        if session.is_sentence_matched(s) {
            continue;
        }
        let Some(sentence) = corpus.sentence(s) else {
            continue;
        };
        match classify(sentence.words.iter().copied(), session) {
            Claim::Whole => {
                session.mark_sentence(s);
                for &t in &sentence.words {
                    session.mark_token(t);
                }
                return Some(s);
            }
            Claim::Accounted => session.mark_sentence(s),
            Claim::Conflict => {}
        }
    }
    None
}

/// Paragraph pass over the current revision's text.
///
/// Each non-empty trimmed paragraph is matched against the previous
/// revision's paragraphs first, then the global store; carried-over
/// instances are reattached by reference, the rest are instantiated fresh.
/// Afterwards the previous revision's paragraphs are re-walked in original
/// order (k-th occurrence to k-th instance) to collect the ones this
/// revision never matched.
pub(crate) fn paragraph_pass<S: Segmenter>(
    segmenter: &S,
    corpus: &mut Corpus,
    store: &ContentStore<ParagraphIdx>,
    prev: &Revision,
    staged: &mut Revision,
    text: &str,
    session: &mut MatchSession,
) -> Result<(), MatchingError> {
    for raw in segmenter.paragraphs(text) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let hash = ContentHash::of(trimmed);

        let prev_pool = prev.paragraphs.get(&hash).map(Vec::as_slice).unwrap_or(&[]);
        let claimed = scan_paragraph_pool(corpus, prev_pool, session)
            .or_else(|| scan_paragraph_pool(corpus, store.instances(&hash), session));

        match claimed {
            Some(p) => staged.attach_paragraph(hash, p),
            None => {
                let p = corpus.push_paragraph(Paragraph::new(hash.clone(), trimmed.to_string()));
                staged.attach_paragraph(hash, p);
                session.unmatched_curr_paragraphs.push(p);
            }
        }
    }

    let mut seen = OccurrenceCounter::new();
    for hash in &prev.ordered_paragraphs {
        let occurrence = seen.next(hash);
        let instance = prev
            .paragraphs
            .get(hash)
            .and_then(|list| list.get(occurrence))
            .copied()
            .ok_or_else(|| MatchingError::OccurrenceMismatch {
                hash: hash.clone(),
                occurrence,
            })?;
        if !session.is_paragraph_matched(instance) {
            session.unmatched_prev_paragraphs.push(instance);
        }
    }
    Ok(())
}

/// Sentence pass over the unmatched current paragraphs.
///
/// Sentence identity is computed on the whitespace-cleaned token form, not
/// the raw text. Candidates come from the unmatched previous paragraphs
/// first, then the global store. Previous sentences left unmatched at the
/// end are force-marked so they cannot be reused later in this revision,
/// and recorded for the word pass.
pub(crate) fn sentence_pass<S: Segmenter>(
    segmenter: &S,
    corpus: &mut Corpus,
    store: &ContentStore<SentenceIdx>,
    session: &mut MatchSession,
) -> Result<(), MatchingError> {
    let curr_paragraphs = session.unmatched_curr_paragraphs.clone();
    let prev_paragraphs = session.unmatched_prev_paragraphs.clone();

    for p in curr_paragraphs {
        let text = corpus
            .paragraph(p)
            .and_then(|paragraph| paragraph.text.clone())
            .ok_or(MatchingError::ParagraphTextMissing)?;

        for raw in segmenter.sentences(&text) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let words = segmenter.tokens(trimmed);
            let normalized = words.join(" ");
            let hash = ContentHash::of(&normalized);

            let mut claimed = None;
            for &pp in &prev_paragraphs {
                let pool: Vec<SentenceIdx> = corpus
                    .paragraph(pp)
                    .and_then(|paragraph| paragraph.sentences.get(&hash).cloned())
                    .unwrap_or_default();
                claimed = scan_sentence_pool(corpus, &pool, session);
                if claimed.is_some() {
                    break;
                }
            }
            let claimed =
                claimed.or_else(|| scan_sentence_pool(corpus, store.instances(&hash), session));

            match claimed {
                Some(s) => corpus.paragraphs[p.index()].attach_sentence(hash, s),
                None => {
                    let s = corpus.push_sentence(Sentence::new(hash.clone(), normalized, words));
                    corpus.paragraphs[p.index()].attach_sentence(hash, s);
                    session.unmatched_curr_sentences.push(s);
                }
            }
        }
    }

    for &pp in &prev_paragraphs {
        let mut seen = OccurrenceCounter::new();
        let Some(paragraph) = corpus.paragraph(pp) else {
            continue;
        };
        for hash in &paragraph.ordered_sentences {
            let occurrence = seen.next(hash);
            let instance = paragraph
                .sentences
                .get(hash)
                .and_then(|list| list.get(occurrence))
                .copied()
                .ok_or_else(|| MatchingError::OccurrenceMismatch {
                    hash: hash.clone(),
                    occurrence,
                })?;
            if !session.is_sentence_matched(instance) {
                session.unmatched_prev_sentences.push(instance);
                session.mark_sentence(instance);
            }
        }
    }
    Ok(())
}
