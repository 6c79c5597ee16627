use crate::engine::diff::{diff_words, DiffEntry, DiffTag};
use crate::engine::gate::SpamGateConfig;
use crate::engine::session::MatchSession;
use crate::history::revision::Revision;
use crate::store::Corpus;
use crate::types::identifiers::{SentenceIdx, TokenId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WordPassOutcome {
    Clean,
    /// Density heuristic fired; no tokens were created.
    Vandalism,
}

/// Word-level resolution of the text no coarser pass could match.
///
/// Aligns the still-unclaimed words of the unmatched previous sentences
/// against the words of the unmatched current sentences. Each current word
/// consumes the first diff entry carrying its value: an unchanged entry
/// reuses the first claimable previous token, a removed entry records a
/// deletion without filling the current slot, an added entry (or no entry
/// at all) mints a fresh token.
pub(crate) fn word_pass(
    corpus: &mut Corpus,
    staged: &mut Revision,
    gate: &SpamGateConfig,
    session: &mut MatchSession,
) -> WordPassOutcome {
    let mut prev_words: Vec<(TokenId, String)> = Vec::new();
    for &s in &session.unmatched_prev_sentences {
        let Some(sentence) = corpus.sentence(s) else {
            continue;
        };
        for &t in &sentence.words {
            if session.is_token_matched(t) {
                continue;
            }
            if let Some(token) = corpus.ledger.get(t) {
                prev_words.push((t, token.value.clone()));
            }
        }
    }

    let curr_sentences: Vec<(SentenceIdx, Vec<String>)> = session
        .unmatched_curr_sentences
        .iter()
        .map(|&s| {
            let words = corpus
                .sentence(s)
                .map(|sentence| sentence.word_values.clone())
                .unwrap_or_default();
            (s, words)
        })
        .collect();
    let curr_words: Vec<String> = curr_sentences
        .iter()
        .flat_map(|(_, words)| words.iter().cloned())
        .collect();

    // Pure deletion: nothing to diff.
    if curr_words.is_empty() {
        return WordPassOutcome::Clean;
    }

    if session.possible_vandalism {
        if gate.is_token_spam(curr_words.iter().map(String::as_str)) {
            return WordPassOutcome::Vandalism;
        }
        session.possible_vandalism = false;
    }

    // Pure addition: every current word is a new authorship event.
    if prev_words.is_empty() {
        for (s, words) in curr_sentences {
            for value in words {
                mint(corpus, staged, s, value);
            }
        }
        return WordPassOutcome::Clean;
    }

    let prev_values: Vec<String> = prev_words.iter().map(|(_, value)| value.clone()).collect();
    let mut entries: Vec<Option<DiffEntry>> = diff_words(&prev_values, &curr_words)
        .into_iter()
        .map(Some)
        .collect();

    for (s, words) in curr_sentences {
        for value in words {
            let mut placed = false;
            for pos in 0..entries.len() {
                let tag = match &entries[pos] {
                    Some(entry) if entry.value == value => entry.tag,
                    _ => continue,
                };
                match tag {
                    DiffTag::Unchanged => {
                        if let Some(t) = claimable(&prev_words, session, &value) {
                            session.mark_token(t);
                            corpus.sentences[s.index()].words.push(t);
                            entries[pos] = None;
                            placed = true;
                            break;
                        }
                    }
                    DiffTag::Removed => {
                        // The value also left the previous text somewhere:
                        // record the deletion, keep looking for this word.
                        if let Some(t) = claimable(&prev_words, session, &value) {
                            session.mark_token(t);
                            session.removed_tokens.push(t);
                            entries[pos] = None;
                        }
                    }
                    DiffTag::Added => {
                        mint(corpus, staged, s, value.clone());
                        entries[pos] = None;
                        placed = true;
                        break;
                    }
                }
            }
            if !placed {
                mint(corpus, staged, s, value);
            }
        }
    }
    WordPassOutcome::Clean
}

/// First previous token with this value not yet claimed this pass.
fn claimable(
    prev_words: &[(TokenId, String)],
    session: &MatchSession,
    value: &str,
) -> Option<TokenId> {
    prev_words
        .iter()
        .find(|(t, v)| v.as_str() == value && !session.is_token_matched(*t))
        .map(|(t, _)| *t)
}

fn mint(corpus: &mut Corpus, staged: &mut Revision, sentence: SentenceIdx, value: String) {
    let id = corpus.ledger.mint(value, staged.id);
    corpus.sentences[sentence.index()].words.push(id);
    staged.original_adds += 1;
}
