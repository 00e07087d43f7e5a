//! In-place slice shuffling.

use rand::Rng;

/// Shuffle a slice in place with `passes` Fisher-Yates passes.
///
/// Each pass swaps index `i` with a uniformly random index in `i..len`.
/// A single pass already yields a uniform permutation; the pass count is
/// kept as a knob because callers treat it as a shuffle "quality" setting.
/// `passes == 0` leaves the slice untouched.
pub fn shuffle<T>(items: &mut [T], passes: usize) {
    let len = items.len();
    if len < 2 {
        return;
    }
    let mut rng = rand::rng();
    for _ in 0..passes {
        for i in 0..len - 1 {
            let j = rng.random_range(i..len);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut items: Vec<u8> = (1..=74).collect();
        shuffle(&mut items, 1);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=74).collect::<Vec<u8>>());
    }

    #[test]
    fn test_shuffle_multiple_passes_preserves_elements() {
        let mut items: Vec<u8> = (1..=15).collect();
        shuffle(&mut items, 15);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=15).collect::<Vec<u8>>());
    }

    #[test]
    fn test_shuffle_zero_passes_is_noop() {
        let mut items = vec![1, 2, 3, 4, 5];
        shuffle(&mut items, 0);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, 3);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&mut single, 3);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_shuffle_eventually_reorders() {
        // 20 elements stay in their original order across ten shuffles
        // with probability well below any flake threshold.
        let original: Vec<u32> = (0..20).collect();
        for _ in 0..10 {
            let mut items = original.clone();
            shuffle(&mut items, 1);
            if items != original {
                return;
            }
        }
        panic!("shuffle never changed the order of 20 elements in 10 tries");
    }
}
