use rand::Rng;

/// Uniform in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn sorted(mut v: Vec<&str>) -> Vec<&str> {
        v.sort();
        v
    }

    #[test]
    fn result_is_a_permutation() {
        let words = vec!["I", "was", "very", "busy", "this", "morning", "."];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let out = shuffled(&words, &mut rng);
            assert_eq!(out.len(), words.len());
            assert_eq!(sorted(out), sorted(words.clone()));
        }
    }

    #[test]
    fn duplicates_are_preserved() {
        let words = vec!["the", "cat", "saw", "the", "dog"];
        let mut rng = SmallRng::seed_from_u64(11);
        let out = shuffled(&words, &mut rng);
        assert_eq!(out.iter().filter(|w| **w == "the").count(), 2);
    }

    #[test]
    fn order_changes_with_high_probability() {
        let words = vec!["a", "b", "c", "d", "e"];
        let mut rng = SmallRng::seed_from_u64(42);
        let changed = (0..100)
            .filter(|_| shuffled(&words, &mut rng) != words)
            .count();
        // P(identity) is 1/120 per trial.
        assert!(changed >= 90, "only {changed} of 100 shuffles changed the order");
    }

    #[test]
    fn every_arrangement_of_three_appears_evenly() {
        let items = [0u8, 1, 2];
        let mut rng = SmallRng::seed_from_u64(1234);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let trials = 6000;
        for _ in 0..trials {
            *counts.entry(shuffled(&items, &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, n) in counts {
            assert!((800..1200).contains(&n), "{perm:?} appeared {n} times");
        }
    }

    #[test]
    fn empty_and_single_are_untouched() {
        let mut rng = SmallRng::seed_from_u64(0);
        let empty: Vec<u8> = Vec::new();
        assert!(shuffled(&empty, &mut rng).is_empty());
        assert_eq!(shuffled(&["only"], &mut rng), vec!["only"]);
    }
}
