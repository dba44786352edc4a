use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Seeded runs are reproducible; without a seed every run gets a fresh order.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Uniform random permutation of the cells, in place (Fisher-Yates).
pub fn shuffle_cells<R: Rng + ?Sized>(cells: &mut [u64], rng: &mut R) {
    cells.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(v: &[u64]) -> Vec<u64> {
        let mut v = v.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn shuffle_keeps_the_multiset() {
        let original: Vec<u64> = (0..1000u64).map(|i| i % 37).collect();
        let mut cells = original.clone();
        shuffle_cells(&mut cells, &mut make_rng(Some(42)));
        assert_eq!(cells.len(), original.len());
        assert_eq!(sorted(&cells), sorted(&original));
        assert_ne!(cells, original);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a: Vec<u64> = (0..100).collect();
        let mut b = a.clone();
        shuffle_cells(&mut a, &mut make_rng(Some(7)));
        shuffle_cells(&mut b, &mut make_rng(Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_is_reachable() {
        // Element 0 of a 4-element array should land everywhere over many runs.
        let mut rng = make_rng(Some(1));
        let mut seen = [0usize; 4];
        for _ in 0..4000 {
            let mut cells = [0u64, 1, 2, 3];
            shuffle_cells(&mut cells, &mut rng);
            let pos = cells.iter().position(|x| *x == 0).unwrap();
            seen[pos] += 1;
        }
        for count in seen {
            assert!(count > 800 && count < 1200, "skewed shuffle: {:?}", seen);
        }
    }

    #[test]
    fn empty_and_single() {
        let mut rng = make_rng(None);
        let mut empty: Vec<u64> = vec![];
        shuffle_cells(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec![5u64];
        shuffle_cells(&mut one, &mut rng);
        assert_eq!(one, vec![5]);
    }
}
