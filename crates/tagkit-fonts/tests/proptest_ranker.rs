//! Property tests for similarity ranking.
//!
//! Checks the O(NP) distance against a quadratic LCS table and the ordering
//! guarantees of `rank`.

use proptest::prelude::*;
use tagkit_fonts::{Catalog, KeyOptions, edit_distance, rank};

// =========================================================================
// Reference implementation
// =========================================================================

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}

fn small_alphabet() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C', 'ア', 'あ']), 0..24)
}

fn font_name() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,16}"
}

// =========================================================================
// Distance properties
// =========================================================================

proptest! {
    #[test]
    fn distance_matches_lcs(a in small_alphabet(), b in small_alphabet()) {
        let expected = a.len() + b.len() - 2 * lcs_len(&a, &b);
        prop_assert_eq!(edit_distance(&a, &b), expected);
    }

    #[test]
    fn distance_is_symmetric(a in small_alphabet(), b in small_alphabet()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn distance_to_self_is_zero(a in small_alphabet()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
    }
}

// =========================================================================
// Ranking properties
// =========================================================================

proptest! {
    #[test]
    fn ranking_covers_every_entry_once(
        names in prop::collection::vec(font_name(), 1..20),
        query in font_name(),
    ) {
        let catalog = Catalog::from_names(names, KeyOptions::default());
        prop_assume!(!catalog.is_empty());
        let ranking = rank(&catalog, &query).unwrap();
        let mut indices: Vec<usize> = ranking.iter().map(|s| s.index).collect();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..catalog.len()).collect::<Vec<_>>());
    }

    #[test]
    fn scores_never_decrease(
        names in prop::collection::vec(font_name(), 1..20),
        query in font_name(),
    ) {
        let catalog = Catalog::from_names(names, KeyOptions::default());
        prop_assume!(!catalog.is_empty());
        let ranking = rank(&catalog, &query).unwrap();
        for pair in ranking.as_slice().windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
        }
    }

    #[test]
    fn catalog_member_ranks_first_exactly(
        names in prop::collection::vec(font_name(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = Catalog::from_names(names, KeyOptions::default());
        prop_assume!(!catalog.is_empty());
        let target = catalog.name(pick.index(catalog.len())).unwrap().to_string();
        let ranking = rank(&catalog, &target).unwrap();
        let best = ranking.best().unwrap();
        prop_assert!(best.score.is_exact());
        prop_assert_eq!(
            catalog.get(best.index).unwrap().key(),
            catalog.get(catalog.index_of(&target).unwrap()).unwrap().key()
        );
    }
}
