//! String similarity scoring
//!
//! The food matcher only needs a single `ratio(a, b)` in `[0.0, 1.0]`, so the
//! scorer sits behind a small trait and can be swapped in tests.

use std::collections::HashMap;

/// A similarity measure between two strings, 1.0 meaning identical
pub trait SimilarityScorer {
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp "gestalt" ratio, `2·M / (|a| + |b|)`, where M is the
/// total size of the matching blocks found by repeatedly taking the longest
/// common substring and recursing on both sides of it.
///
/// Elements occurring in more than 1% of a sequence of 200+ characters are
/// ignored as match anchors (the "popular element" heuristic).
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

/// Normalized Levenshtein similarity from `strsim`
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl SimilarityScorer for SequenceRatio {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        sequence_ratio(a, b)
    }
}

impl SimilarityScorer for NormalizedLevenshtein {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Index of every position of each element of `b`, with popular elements
/// dropped once `b` is long enough
fn index_positions(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let n = b.len();
    if n >= 200 {
        let popular_over = n / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= popular_over);
    }

    b2j
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`. The
/// block found through the index is then grown over equal neighbours, which
/// recovers popular elements dropped from the index.
fn find_longest_match(
    a: &[char],
    b: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j -> length of the match ending at (i - 1, j)
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j > 0 { j2len.get(&(j - 1)).copied().unwrap_or(0) } else { 0 };
                let k = prev + 1;
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < ahi
        && best_j + best_size < bhi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    (best_i, best_j, best_size)
}

/// Total number of characters in the matching blocks of `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let b2j = index_positions(b);
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = find_longest_match(a, b, &b2j, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Ratcliff/Obershelp similarity of two strings, compared by `char`
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let length = a.len() + b.len();
    if length == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / length as f64
}
