// Property tests for the grouping invariant: whatever the matrix and
// threshold, the output is an exact partition of the input ids.

use carbon::discrepancy::analyze_group;
use carbon::grouping::group_documents;
use carbon::similarity::SimilarityMatrix;
use proptest::prelude::*;

/// Random symmetric matrix with unit diagonal, 2-8 documents, scores
/// anywhere in [-1, 1] (negative cosines are legal input).
fn arb_matrix() -> impl Strategy<Value = (Vec<String>, Vec<Vec<f64>>)> {
    (2usize..8).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        proptest::collection::vec(-1.0f64..=1.0, pairs).prop_map(move |upper| {
            let mut values = vec![vec![0.0; n]; n];
            let mut k = 0;
            for i in 0..n {
                values[i][i] = 1.0;
                for j in (i + 1)..n {
                    values[i][j] = upper[k];
                    values[j][i] = upper[k];
                    k += 1;
                }
            }
            let ids = (0..n).map(|i| format!("doc{i}.txt")).collect();
            (ids, values)
        })
    })
}

proptest! {
    #[test]
    fn grouping_is_an_exact_partition(
        (ids, values) in arb_matrix(),
        threshold in 0.0f64..=1.0,
    ) {
        let matrix = SimilarityMatrix::from_values(ids.clone(), values).unwrap();
        let groups = group_documents(&matrix, threshold);

        prop_assert!(groups.iter().all(|g| !g.is_empty()), "no group may be empty");

        let mut seen: Vec<String> = groups
            .iter()
            .flat_map(|g| g.members.iter().cloned())
            .collect();
        let mut expected = ids;
        seen.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected, "every id in exactly one group");
    }

    #[test]
    fn first_group_is_seeded_by_the_first_id(
        (ids, values) in arb_matrix(),
        threshold in 0.0f64..=1.0,
    ) {
        let first = ids[0].clone();
        let matrix = SimilarityMatrix::from_values(ids, values).unwrap();
        let groups = group_documents(&matrix, threshold);
        prop_assert_eq!(groups[0].seed(), first.as_str());
    }

    #[test]
    fn singleton_groups_never_raise_issues(text in ".{0,200}") {
        prop_assert!(analyze_group(&[text.as_str()]).is_empty());
    }
}
