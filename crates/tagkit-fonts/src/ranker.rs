#![forbid(unsafe_code)]

//! Similarity ranking of a typed font name against the catalog.
//!
//! Each catalog key is compared to the query key with the O(NP)
//! furthest-reaching-path difference algorithm (Wu, Manber, Myers, Miller).
//! For sequences of length `m <= n` with `delta = n - m`, the algorithm finds
//! the smallest `p` (number of deletions from the longer sequence beyond
//! `delta`) such that diagonal `delta` reaches `n`. The insert/delete edit
//! distance is then `delta + 2p`.
//!
//! # Score
//!
//! Ranking uses `delta + 8p`, which weights mismatches more heavily than
//! pure length differences, so that a short prefix of a long family name
//! ranks above a same-length name with a typo. The value is opaque: it is
//! only meaningful for ordering and is exposed as [`Score`], not a count.
//!
//! # Invariants
//!
//! 1. A query whose key equals an entry's key scores [`Score::EXACT`], the
//!    minimum, and that entry sorts first (ties keep catalog order).
//! 2. Sorting is stable: entries with equal score stay in catalog order.
//! 3. The diagonal buffer holds `m + n + 3` slots and is reused per call.

use std::fmt;

use tracing::debug;

use crate::catalog::Catalog;
use crate::key::ComparisonKey;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons ranking cannot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// The catalog has no entries.
    EmptyCatalog,
    /// The query produced an empty comparison key.
    Normalization {
        /// The query as typed.
        query: String,
    },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "font catalog is empty"),
            Self::Normalization { query } => {
                write!(f, "cannot normalize font query {query:?}")
            }
        }
    }
}

impl std::error::Error for RankError {}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Opaque ranking score. Lower is more similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u64);

impl Score {
    /// Score of identical keys.
    pub const EXACT: Self = Self(0);

    fn from_path(delta: usize, p: usize) -> Self {
        Self(delta as u64 + 8 * p as u64)
    }

    /// Whether the keys compared equal.
    #[must_use]
    pub const fn is_exact(self) -> bool {
        self.0 == 0
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One ranked catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Similarity {
    /// Index into the catalog.
    pub index: usize,
    /// Ranking score against the query.
    pub score: Score,
}

/// Catalog indices sorted by ascending score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    results: Vec<Similarity>,
}

impl Ranking {
    /// Number of ranked entries (always the catalog size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The best match.
    #[must_use]
    pub fn best(&self) -> Option<Similarity> {
        self.results.first().copied()
    }

    /// All results, best first.
    #[must_use]
    pub fn as_slice(&self) -> &[Similarity] {
        &self.results
    }

    /// Iterate over results, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, Similarity> {
        self.results.iter()
    }

    /// Display names of the best `limit` entries.
    pub fn top_names<'c>(&self, catalog: &'c Catalog, limit: usize) -> Vec<&'c str> {
        self.results
            .iter()
            .take(limit)
            .filter_map(|s| catalog.name(s.index))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a Similarity;
    type IntoIter = std::slice::Iter<'a, Similarity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank every catalog entry against `query`.
///
/// The query key is derived with the catalog's own [`KeyOptions`](crate::KeyOptions).
pub fn rank(catalog: &Catalog, query: &str) -> Result<Ranking, RankError> {
    if catalog.is_empty() {
        return Err(RankError::EmptyCatalog);
    }
    let query_key = ComparisonKey::new(query, catalog.key_options());
    if query_key.is_empty() {
        return Err(RankError::Normalization {
            query: query.to_string(),
        });
    }

    let mut fp = Vec::new();
    let mut results: Vec<Similarity> = catalog
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (delta, p) = furthest_path(query_key.chars(), entry.key().chars(), &mut fp);
            Similarity {
                index,
                score: Score::from_path(delta, p),
            }
        })
        .collect();
    results.sort_by_key(|s| s.score);

    if let Some(best) = results.first() {
        debug!(
            query,
            candidates = results.len(),
            best = catalog.name(best.index).unwrap_or_default(),
            exact = best.score.is_exact(),
            "ranked font query"
        );
    }
    Ok(Ranking { results })
}

/// Insert/delete edit distance between two scalar sequences.
#[must_use]
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (delta, p) = furthest_path(a, b, &mut Vec::new());
    delta + 2 * p
}

/// Run O(NP) and return `(delta, p)`.
///
/// The shorter sequence is always taken as `a`.
fn furthest_path(a: &[char], b: &[char], fp: &mut Vec<isize>) -> (usize, usize) {
    let (a, b) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = a.len();
    let n = b.len();
    let delta = n - m;
    let offset = m + 1;

    fp.clear();
    fp.resize(m + n + 3, -1);

    let n_reach = n as isize;
    let delta_k = delta as isize;
    let mut p: isize = -1;
    loop {
        p += 1;
        for k in -p..delta_k {
            step(a, b, fp, offset, k);
        }
        for k in ((delta_k + 1)..=(delta_k + p)).rev() {
            step(a, b, fp, offset, k);
        }
        step(a, b, fp, offset, delta_k);
        if fp[slot(offset, delta_k)] == n_reach {
            return (delta, p as usize);
        }
    }
}

#[inline]
fn slot(offset: usize, k: isize) -> usize {
    (offset as isize + k) as usize
}

#[inline]
fn step(a: &[char], b: &[char], fp: &mut [isize], offset: usize, k: isize) {
    let from_below = fp[slot(offset, k - 1)] + 1;
    let from_above = fp[slot(offset, k + 1)];
    fp[slot(offset, k)] = snake(a, b, k, from_below.max(from_above));
}

/// Follow matching characters along diagonal `k` starting at row `y`.
#[inline]
fn snake(a: &[char], b: &[char], k: isize, y: isize) -> isize {
    let mut y = y;
    let mut x = y - k;
    while x >= 0 && (x as usize) < a.len() && (y as usize) < b.len() && a[x as usize] == b[y as usize] {
        x += 1;
        y += 1;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyOptions;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_names(names.iter().copied(), KeyOptions::default())
    }

    // =========================================================================
    // Distance
    // =========================================================================

    #[test]
    fn distance_of_identical_is_zero() {
        assert_eq!(edit_distance(&chars("ARIAL"), &chars("ARIAL")), 0);
    }

    #[test]
    fn distance_against_empty_is_length() {
        assert_eq!(edit_distance(&[], &chars("ABC")), 3);
        assert_eq!(edit_distance(&chars("ABC"), &[]), 3);
    }

    #[test]
    fn distance_counts_inserts_and_deletes() {
        // kitten -> sitting: LCS "ittn" (4), 6 + 7 - 8 = 5
        assert_eq!(edit_distance(&chars("kitten"), &chars("sitting")), 5);
        // a substitution is one delete plus one insert
        assert_eq!(edit_distance(&chars("ABC"), &chars("AXC")), 2);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = chars("MEIRYO UI");
        let b = chars("MS UI GOTHIC");
        assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn score_prefers_prefix_over_typo() {
        // "ARI" is a prefix of "ARIAL" (delta 2, p 0) but one substitution
        // away from "ARX" (delta 0, p 1).
        let mut fp = Vec::new();
        let prefix = {
            let (d, p) = furthest_path(&chars("ARI"), &chars("ARIAL"), &mut fp);
            Score::from_path(d, p)
        };
        let typo = {
            let (d, p) = furthest_path(&chars("ARI"), &chars("ARX"), &mut fp);
            Score::from_path(d, p)
        };
        assert!(prefix < typo);
    }

    // =========================================================================
    // Ranking
    // =========================================================================

    #[test]
    fn exact_match_ranks_first_with_exact_score() {
        let c = catalog(&["Arial", "Arial Black", "Courier New", "Verdana"]);
        let ranking = rank(&c, "arial").unwrap();
        let best = ranking.best().unwrap();
        assert_eq!(c.name(best.index), Some("Arial"));
        assert!(best.score.is_exact());
        assert_eq!(best.score, Score::EXACT);
        assert_eq!(ranking.len(), c.len());
    }

    #[test]
    fn results_are_sorted_ascending() {
        let c = catalog(&["Verdana", "Tahoma", "Times New Roman", "Arial", "Georgia"]);
        let ranking = rank(&c, "Time").unwrap();
        let scores: Vec<Score> = ranking.iter().map(|s| s.score).collect();
        let mut sorted = scores.clone();
        sorted.sort();
        assert_eq!(scores, sorted);
        assert_eq!(ranking.top_names(&c, 1), ["Times New Roman"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        // Both normalize to the query key exactly.
        let c = catalog(&["ARIAL", "Arial", "arial"]);
        let ranking = rank(&c, "Arial").unwrap();
        let indices: Vec<usize> = ranking.iter().map(|s| s.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert!(ranking.iter().all(|s| s.score.is_exact()));
    }

    #[test]
    fn kana_variants_match_exactly() {
        let c = catalog(&["MS ゴシック", "MS 明朝"]);
        let ranking = rank(&c, "ms こしつく").unwrap();
        assert!(ranking.best().unwrap().score.is_exact());
        assert_eq!(ranking.top_names(&c, 1), ["MS ゴシック"]);
    }

    #[test]
    fn top_names_respects_limit() {
        let c = catalog(&["A1", "A2", "A3", "A4"]);
        let ranking = rank(&c, "A").unwrap();
        assert_eq!(ranking.top_names(&c, 2).len(), 2);
        assert_eq!(ranking.top_names(&c, 10).len(), 4);
    }

    #[test]
    fn empty_catalog_is_an_error() {
        assert_eq!(rank(&Catalog::empty(), "Arial"), Err(RankError::EmptyCatalog));
    }

    #[test]
    fn empty_query_is_a_normalization_error() {
        let c = catalog(&["Arial"]);
        let err = rank(&c, "").unwrap_err();
        assert_eq!(err, RankError::Normalization { query: String::new() });
        assert!(err.to_string().contains("normalize"));
    }
}
