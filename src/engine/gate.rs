use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tokens ignored by the density heuristic: table markup, brackets, quotes
/// and similar structural noise that repeats legitimately.
const NOISE_TOKENS: [&str; 13] = [
    "<", ">", "tr", "td", "[", "]", "\"", "*", "==", "{", "}", "|", "-",
];

/// Thresholds of the vandalism gate.
///
/// The size-drop heuristic fires only when the previous revision is above
/// `drop_prev_len` AND the current one is below `drop_curr_len`; drops
/// between two large or two small revisions are deliberately exempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamGateConfig {
    /// Relative length change at or below which a shrinking edit is spam.
    pub drop_ratio: f64,
    /// Previous-revision length above which the size-drop check applies.
    pub drop_prev_len: usize,
    /// Current-revision length below which the size-drop check applies.
    pub drop_curr_len: usize,
    /// Average per-distinct-token frequency above which new text is spam.
    pub density_limit: f64,
    /// Unmatched-paragraph fraction above which the density check arms.
    pub unmatched_ratio_floor: f64,
}

impl Default for SpamGateConfig {
    fn default() -> Self {
        Self {
            drop_ratio: -0.40,
            drop_prev_len: 1000,
            drop_curr_len: 1000,
            density_limit: 20.0,
            unmatched_ratio_floor: 0.0,
        }
    }
}

impl SpamGateConfig {
    /// Size-drop heuristic over raw byte lengths. `content_move` edits
    /// (minor flag plus a nonempty comment) are exempt.
    pub fn is_size_drop(&self, prev_len: usize, curr_len: usize, content_move: bool) -> bool {
        if content_move {
            return false;
        }
        if prev_len <= self.drop_prev_len || curr_len >= self.drop_curr_len {
            return false;
        }
        let change = (curr_len as f64 - prev_len as f64) / prev_len as f64;
        change <= self.drop_ratio
    }

    /// True when the advisory is armed and the word density of the new text
    /// exceeds the limit.
    pub fn is_token_spam<'a, I>(&self, words: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        average_token_frequency(words) > self.density_limit
    }
}

/// Average occurrence count per distinct token, noise excluded. Zero for
/// empty input.
pub fn average_token_frequency<'a, I>(words: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *counts.entry(word).or_insert(0) += 1;
    }
    for noise in NOISE_TOKENS {
        counts.remove(noise);
    }
    if counts.is_empty() {
        return 0.0;
    }
    let total: usize = counts.values().sum();
    total as f64 / counts.len() as f64
}
