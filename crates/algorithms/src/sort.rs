/// Stable top-down merge sort.
///
/// Splits at the midpoint and recurses; depth is `log2(n)`. Allocates a new
/// vector per merge, `O(n)` auxiliary space overall. Inputs of length 0 or 1
/// are returned as-is.
pub fn merge_sort<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    if items.len() <= 1 {
        return items.to_vec();
    }
    let (left, right) = items.split_at(items.len() / 2);
    merge(&merge_sort(left), &merge_sort(right))
}

/// Merge two sorted runs. On ties the left element wins, which keeps the
/// sort stable.
fn merge<T: PartialOrd + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if right[j] < left[i] {
            merged.push(right[j].clone());
            j += 1;
        } else {
            merged.push(left[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares on `key` only so stability is observable through `tag`.
    #[derive(Debug, Clone, PartialEq)]
    struct Keyed {
        key: i32,
        tag: usize,
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    #[test]
    fn sorts_numbers() {
        assert_eq!(merge_sort(&[5, 3, 9, 1, 3]), vec![1, 3, 3, 5, 9]);
        assert_eq!(merge_sort(&[2.5, -1.0, 0.0]), vec![-1.0, 0.0, 2.5]);
    }

    #[test]
    fn short_inputs_are_unchanged() {
        assert!(merge_sort::<i32>(&[]).is_empty());
        assert_eq!(merge_sort(&["only"]), vec!["only"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let items: Vec<Keyed> = [2, 1, 2, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(tag, key)| Keyed { key, tag })
            .collect();

        let tags: Vec<usize> = merge_sort(&items).iter().map(|k| k.tag).collect();
        assert_eq!(tags, vec![1, 3, 0, 2, 4]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: output is a sorted permutation and equal keys keep their order.
            #[test]
            fn sorted_stable_permutation(keys in prop::collection::vec(-20i32..20, 0..200)) {
                let items: Vec<Keyed> = keys
                    .iter()
                    .enumerate()
                    .map(|(tag, &key)| Keyed { key, tag })
                    .collect();

                let sorted = merge_sort(&items);

                let mut expected = items.clone();
                expected.sort_by_key(|k| k.key);
                prop_assert_eq!(&sorted, &expected);
                for pair in sorted.windows(2) {
                    prop_assert!(pair[0].key <= pair[1].key);
                    if pair[0].key == pair[1].key {
                        prop_assert!(pair[0].tag < pair[1].tag);
                    }
                }
            }
        }
    }
}
