#![forbid(unsafe_code)]

use std::collections::HashMap;

// ***************************************************************************
//                                  Types
// ***************************************************************************
// ---------------------------------------------------------------------------
// PairSum:
// ---------------------------------------------------------------------------
/// Outcome of a pair-sum search.  When a pair is found, `first < second` and
/// `first_value + second_value` equals the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSum {
    Found {
        first: usize,
        second: usize,
        first_value: i64,
        second_value: i64,
    },
    NotFound,
}

// ***************************************************************************
//                                Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// resolve:
// ---------------------------------------------------------------------------
/** Find two distinct positions whose values add up to target in a single
 * left-to-right pass.
 *
 * Each value is remembered with the index at which it was first seen.  At
 * position i the complement (target - values[i]) is looked up before
 * values[i] itself is recorded, so an index never pairs with itself.  The
 * first hit is returned, which yields the pair with the smallest second
 * index and, for that index, the smallest first index.
 *
 * A complement that doesn't fit in an i64 can't have been seen, so the
 * lookup is skipped rather than wrapping.  Fewer than two values always
 * produce NotFound.
 */
pub fn resolve(values: &[i64], target: i64) -> PairSum {
    let mut seen: HashMap<i64, usize> = HashMap::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        if let Some(complement) = target.checked_sub(value) {
            if let Some(&j) = seen.get(&complement) {
                return PairSum::Found {
                    first: j,
                    second: i,
                    first_value: complement,
                    second_value: value,
                };
            }
        }

        // Keep the earliest index for repeated values.
        seen.entry(value).or_insert(i);
    }

    PairSum::NotFound
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::{resolve, PairSum};

    fn found(first: usize, second: usize, first_value: i64, second_value: i64) -> PairSum {
        PairSum::Found {first, second, first_value, second_value}
    }

    // Quadratic reference: scan by second index, then by first index.
    fn brute_force(values: &[i64], target: i64) -> PairSum {
        for j in 0..values.len() {
            for i in 0..j {
                if values[i] as i128 + values[j] as i128 == target as i128 {
                    return found(i, j, values[i], values[j]);
                }
            }
        }
        PairSum::NotFound
    }

    #[test]
    fn first_two_values() {
        assert_eq!(resolve(&[2, 7, 11, 15], 9), found(0, 1, 2, 7));
    }

    #[test]
    fn skips_self_pairing() {
        // 3 + 3 would be 6 but index 0 can't pair with itself.
        assert_eq!(resolve(&[3, 2, 4], 6), found(1, 2, 2, 4));
    }

    #[test]
    fn duplicate_values() {
        assert_eq!(resolve(&[3, 3], 6), found(0, 1, 3, 3));
    }

    #[test]
    fn no_solution() {
        assert_eq!(resolve(&[1, 2, 3], 100), PairSum::NotFound);
    }

    #[test]
    fn short_inputs() {
        assert_eq!(resolve(&[], 0), PairSum::NotFound);
        assert_eq!(resolve(&[5], 5), PairSum::NotFound);
        assert_eq!(resolve(&[5], 10), PairSum::NotFound);
    }

    #[test]
    fn negative_values_and_target() {
        assert_eq!(resolve(&[-3, 4, 3, 90], 0), found(0, 2, -3, 3));
        assert_eq!(resolve(&[-1, -2, -3, -4, -5], -8), found(2, 4, -3, -5));
    }

    #[test]
    fn earliest_first_index_for_repeated_values() {
        // Both index 0 and index 2 hold 1; the earlier one is reported.
        assert_eq!(resolve(&[1, 5, 1, 9], 10), found(0, 3, 1, 9));
        assert_eq!(resolve(&[4, 4, 4, 4], 8), found(0, 1, 4, 4));
    }

    #[test]
    fn smallest_second_index_wins() {
        // (0,3) and (1,2) both sum to 5; the pair ending first is returned.
        assert_eq!(resolve(&[1, 2, 3, 4], 5), found(1, 2, 2, 3));
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(resolve(&[i64::MAX, 1], i64::MIN), PairSum::NotFound);
        assert_eq!(resolve(&[i64::MIN, 1, -1], i64::MIN + 1), found(0, 1, i64::MIN, 1));
        assert_eq!(resolve(&[i64::MAX, i64::MIN], -1), found(0, 1, i64::MAX, i64::MIN));
        assert_eq!(resolve(&[1, i64::MAX], i64::MIN), PairSum::NotFound);
    }

    #[test]
    fn repeated_calls_agree() {
        let values = [8, -2, 5, 5, 0, 13];
        let first = resolve(&values, 10);
        for _ in 0..10 {
            assert_eq!(resolve(&values, 10), first);
        }
        assert_eq!(first, found(2, 3, 5, 5));
    }

    #[test]
    fn matches_brute_force_on_small_inputs() {
        // Every sequence of length 0..=5 over the alphabet -2..=2.
        let alphabet = [-2i64, -1, 0, 1, 2];
        for len in 0..=5u32 {
            for code in 0..alphabet.len().pow(len) {
                let mut c = code;
                let values: Vec<i64> = (0..len)
                    .map(|_| {
                        let v = alphabet[c % alphabet.len()];
                        c /= alphabet.len();
                        v
                    })
                    .collect();

                for target in -5..=5 {
                    let got = resolve(&values, target);
                    assert_eq!(got, brute_force(&values, target), "values={:?} target={}", values, target);
                    if let PairSum::Found {first, second, first_value, second_value} = got {
                        assert!(first < second);
                        assert_eq!(values[first], first_value);
                        assert_eq!(values[second], second_value);
                        assert_eq!(first_value + second_value, target);
                    }
                }
            }
        }
    }
}
