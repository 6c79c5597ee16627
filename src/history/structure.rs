use std::collections::HashMap;

use serde::Serialize;

use crate::types::identifiers::{ContentHash, SentenceIdx, TokenId};

/// One sentence instance, shared by reference (arena index) across every
/// revision whose text contains this exact sentence.
#[derive(Debug, Clone, Serialize)]
pub struct Sentence {
    pub hash: ContentHash,
    /// Tokens currently contained, in reading order.
    pub words: Vec<TokenId>,
    /// Normalized text; retained only until the sentence is first committed,
    /// then discarded to bound memory.
    #[serde(skip)]
    pub(crate) text: Option<String>,
    /// Word values of the normalized text, same lifetime as `text`.
    #[serde(skip)]
    pub(crate) word_values: Vec<String>,
}

impl Sentence {
    pub(crate) fn new(hash: ContentHash, text: String, word_values: Vec<String>) -> Self {
        Self {
            hash,
            words: Vec::new(),
            text: Some(text),
            word_values,
        }
    }
}

/// One paragraph instance, shared by reference across revisions exactly
/// like [`Sentence`].
///
/// `sentences` maps each sentence hash to the ordered list of instances
/// appearing under it — a list, because the same sentence text can occur
/// more than once inside one paragraph. `ordered_sentences` records hash
/// appearance order; the k-th occurrence of a hash resolves to the k-th
/// instance in its list.
#[derive(Debug, Clone, Serialize)]
pub struct Paragraph {
    pub hash: ContentHash,
    pub sentences: HashMap<ContentHash, Vec<SentenceIdx>>,
    pub ordered_sentences: Vec<ContentHash>,
    /// Raw text; discarded after the paragraph is first committed.
    #[serde(skip)]
    pub(crate) text: Option<String>,
}

impl Paragraph {
    pub(crate) fn new(hash: ContentHash, text: String) -> Self {
        Self {
            hash,
            sentences: HashMap::new(),
            ordered_sentences: Vec::new(),
            text: Some(text),
        }
    }

    pub(crate) fn attach_sentence(&mut self, hash: ContentHash, instance: SentenceIdx) {
        self.sentences.entry(hash.clone()).or_default().push(instance);
        self.ordered_sentences.push(hash);
    }
}
