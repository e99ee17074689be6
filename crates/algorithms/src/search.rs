/// Index of the first element equal to `target`, scanning from the front.
pub fn linear_search<T: PartialEq>(items: &[T], target: &T) -> Option<usize> {
    items.iter().position(|item| item == target)
}

/// Bisection over an ascending slice.
///
/// When `target` occurs more than once the returned index is whichever
/// occurrence the bisection reaches first, not necessarily the leftmost.
/// The result is meaningless if `sorted` is not ascending.
pub fn binary_search<T: PartialOrd>(sorted: &[T], target: &T) -> Option<usize> {
    let (mut low, mut high) = (0, sorted.len());
    while low < high {
        let mid = low + (high - low) / 2;
        let candidate = &sorted[mid];
        if candidate == target {
            return Some(mid);
        }
        if candidate < target {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    None
}
