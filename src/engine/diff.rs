use std::collections::HashMap;

/// Three-way classification of one diff element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiffTag {
    Unchanged,
    Removed,
    Added,
}

#[derive(Debug, Clone)]
pub(crate) struct DiffEntry {
    pub(crate) tag: DiffTag,
    pub(crate) value: String,
}

/// Longest-common-subsequence alignment of two word sequences, rendered as
/// a flat unchanged/removed/added stream in sequence order. Removals are
/// emitted before additions at each divergence.
pub(crate) fn diff_words(prev: &[String], curr: &[String]) -> Vec<DiffEntry> {
    let mut out = Vec::with_capacity(prev.len() + curr.len());
    let (mut i, mut j) = (0, 0);

    for (ai, bj, size) in matching_blocks(prev, curr) {
        while i < ai {
            out.push(DiffEntry {
                tag: DiffTag::Removed,
                value: prev[i].clone(),
            });
            i += 1;
        }
        while j < bj {
            out.push(DiffEntry {
                tag: DiffTag::Added,
                value: curr[j].clone(),
            });
            j += 1;
        }
        for offset in 0..size {
            out.push(DiffEntry {
                tag: DiffTag::Unchanged,
                value: prev[ai + offset].clone(),
            });
        }
        i = ai + size;
        j = bj + size;
    }
    out
}

/// Maximal matching blocks `(prev_start, curr_start, len)` in sequence
/// order, terminated by the zero-length sentinel block at the ends.
fn matching_blocks(prev: &[String], curr: &[String]) -> Vec<(usize, usize, usize)> {
    let mut positions: HashMap<&String, Vec<usize>> = HashMap::new();
    for (j, word) in curr.iter().enumerate() {
        positions.entry(word).or_default().push(j);
    }

    let mut blocks = Vec::new();
    let mut queue = vec![(0, prev.len(), 0, curr.len())];
    while let Some((plo, phi, clo, chi)) = queue.pop() {
        let (i, j, size) = longest_match(prev, &positions, plo, phi, clo, chi);
        if size > 0 {
            blocks.push((i, j, size));
            queue.push((plo, i, clo, j));
            queue.push((i + size, phi, j + size, chi));
        }
    }
    blocks.sort_unstable();
    blocks.push((prev.len(), curr.len(), 0));
    blocks
}

/// Longest block with `prev[i..i+size] == curr[j..j+size]` inside the given
/// window; earliest block wins ties.
fn longest_match(
    prev: &[String],
    positions: &HashMap<&String, Vec<usize>>,
    plo: usize,
    phi: usize,
    clo: usize,
    chi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (plo, clo, 0);
    let mut lengths: HashMap<usize, usize> = HashMap::new();

    for i in plo..phi {
        let mut next_lengths = HashMap::new();
        if let Some(js) = positions.get(&prev[i]) {
            for &j in js {
                if j < clo {
                    continue;
                }
                if j >= chi {
                    break;
                }
                let size = 1 + j
                    .checked_sub(1)
                    .and_then(|prev_j| lengths.get(&prev_j))
                    .copied()
                    .unwrap_or(0);
                next_lengths.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        lengths = next_lengths;
    }
    (best_i, best_j, best_size)
}
