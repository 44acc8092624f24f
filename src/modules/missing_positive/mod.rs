pub mod api;
pub mod types;

/// Returns the smallest strictly positive integer that does not occur in
/// `values`.
///
/// With `n = values.len()` the answer always lies in `1..=n + 1`, so only
/// values in `1..=n` are recorded; everything else can never be the answer
/// and is skipped. Presence is tracked in a separate table, leaving the
/// caller's slice untouched. Runs in O(n) time.
pub fn smallest_missing_positive(values: &[i64]) -> usize {
    let n = values.len();
    let mut present = vec![false; n];

    for &value in values {
        let Ok(value) = usize::try_from(value) else {
            continue;
        };
        if (1..=n).contains(&value) {
            present[value - 1] = true;
        }
    }

    present
        .iter()
        .position(|seen| !seen)
        .map_or(n + 1, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[1, 3, 6, 4, 1, 2], 5)]
    #[case(&[1, 2, 3], 4)]
    #[case(&[-1, -3], 1)]
    #[case(&[], 1)]
    #[case(&[0], 1)]
    #[case(&[2], 1)]
    #[case(&[1], 2)]
    #[case(&[7, 8, 9, 11, 12], 1)]
    #[case(&[3, 4, -1, 1], 2)]
    #[case(&[1, 1, 1, 1], 2)]
    #[case(&[2, 2, 2, 1], 3)]
    #[case(&[i64::MAX, i64::MIN, 1], 2)]
    fn literal_inputs(#[case] values: &[i64], #[case] expected: usize) {
        assert_eq!(smallest_missing_positive(values), expected);
    }

    #[test]
    fn input_is_left_untouched() {
        let values = vec![3, -4, 1, 9, 2];
        let before = values.clone();

        assert_eq!(smallest_missing_positive(&values), 4);
        assert_eq!(values, before);
    }

    fn permutation() -> impl Strategy<Value = Vec<i64>> {
        (0usize..64).prop_flat_map(|n| Just((1..=n as i64).collect::<Vec<_>>()).prop_shuffle())
    }

    proptest! {
        #[test]
        fn full_permutation_yields_next_integer(values in permutation()) {
            prop_assert_eq!(smallest_missing_positive(&values), values.len() + 1);
        }

        #[test]
        fn result_is_absent_and_everything_below_is_present(
            values in prop::collection::vec(-20i64..40, 0..48)
        ) {
            let result = smallest_missing_positive(&values);
            let result_value = i64::try_from(result).unwrap();

            prop_assert!(result >= 1 && result <= values.len() + 1);
            prop_assert!(!values.contains(&result_value));
            for smaller in 1..result_value {
                prop_assert!(values.contains(&smaller));
            }
        }

        #[test]
        fn repeated_runs_agree(values in prop::collection::vec(any::<i64>(), 0..32)) {
            let first = smallest_missing_positive(&values.clone());
            let second = smallest_missing_positive(&values.clone());
            prop_assert_eq!(first, second);
        }
    }
}
