//! Circular advance over fixed preference candidate lists.

/// The candidate after `current`, wrapping at the end of the list.
///
/// A `current` that is not in the list behaves as index -1, so the first
/// candidate is returned. `candidates` must be non-empty; every candidate
/// list in this crate is a non-empty constant.
pub fn next_candidate<'a, T: PartialEq>(current: &T, candidates: &'a [T]) -> &'a T {
    let index = candidates
        .iter()
        .position(|c| c == current)
        .map_or(0, |i| (i + 1) % candidates.len());
    &candidates[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &[&str] = &["alpha", "beta", "gamma"];

    #[test]
    fn test_advances_and_wraps() {
        assert_eq!(*next_candidate(&"alpha", LIST), "beta");
        assert_eq!(*next_candidate(&"beta", LIST), "gamma");
        assert_eq!(*next_candidate(&"gamma", LIST), "alpha");
    }

    #[test]
    fn test_unknown_current_yields_first_candidate() {
        assert_eq!(*next_candidate(&"missing", LIST), "alpha");
    }

    #[test]
    fn test_full_cycle_returns_to_start_from_any_member() {
        for start in LIST {
            let mut value = start;
            for _ in 0..LIST.len() {
                value = next_candidate(value, LIST);
            }
            assert_eq!(value, start);
        }
    }

    #[test]
    fn test_single_candidate_cycles_to_itself() {
        let one = &["only"];
        assert_eq!(*next_candidate(&"only", one), "only");
        assert_eq!(*next_candidate(&"other", one), "only");
    }
}
