//! Random selection of users for segment assignment
//!
//! The generator is process-scoped: seeded once from OS entropy and shared
//! by every request, so two calls in the same clock tick still draw
//! different samples.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Number of users to select for `percent` of `population`.
///
/// `floor(population * percent / 100)`, clamped to `0..=population`.
/// Negative, NaN and >100 percentages are accepted and clamped.
pub fn selection_size(population: usize, percent: f64) -> usize {
    let target = (population as f64 * percent / 100.0).floor();
    if target.is_nan() || target <= 0.0 {
        return 0;
    }
    (target as usize).min(population)
}

/// Uniformly random subset of `ids` sized by [`selection_size`].
pub fn select_users<R>(rng: &mut R, mut ids: Vec<i64>, percent: f64) -> Vec<i64>
where
    R: Rng + ?Sized,
{
    let count = selection_size(ids.len(), percent);
    let (chosen, _) = ids.partial_shuffle(rng, count);
    chosen.to_vec()
}

/// Shared random source for assignment requests
pub struct Sampler {
    rng: Mutex<StdRng>,
}

impl Sampler {
    /// Seed once from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sampler for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Select `percent` of `ids` at random.
    pub fn select(&self, ids: Vec<i64>, percent: f64) -> Vec<i64> {
        // Poisoning is harmless for an RNG
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        select_users(&mut *rng, ids, percent)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn size_follows_floor_of_percentage() {
        assert_eq!(selection_size(10, 0.0), 0);
        assert_eq!(selection_size(10, 50.0), 5);
        assert_eq!(selection_size(10, 100.0), 10);
        assert_eq!(selection_size(10, 55.0), 5);
        assert_eq!(selection_size(3, 33.3), 0);
        assert_eq!(selection_size(7, 99.9), 6);
    }

    #[test]
    fn size_clamps_out_of_range_percent() {
        assert_eq!(selection_size(10, 250.0), 10);
        assert_eq!(selection_size(10, -20.0), 0);
        assert_eq!(selection_size(10, f64::NAN), 0);
        assert_eq!(selection_size(10, f64::INFINITY), 10);
    }

    #[test]
    fn size_of_empty_population_is_zero() {
        assert_eq!(selection_size(0, 100.0), 0);
        assert_eq!(selection_size(0, 50.0), 0);
    }

    #[test]
    fn selection_is_subset_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let ids: Vec<i64> = (1..=100).collect();
        let picked = select_users(&mut rng, ids.clone(), 30.0);

        assert_eq!(picked.len(), 30);
        let unique: HashSet<i64> = picked.iter().copied().collect();
        assert_eq!(unique.len(), 30);
        assert!(picked.iter().all(|id| ids.contains(id)));
    }

    #[test]
    fn full_selection_is_whole_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut picked = select_users(&mut rng, vec![4, 3, 2, 1], 100.0);
        picked.sort_unstable();
        assert_eq!(picked, vec![1, 2, 3, 4]);
    }

    #[test]
    fn shared_sampler_does_not_repeat_itself() {
        // The same sampler advances between calls instead of being reseeded
        let sampler = Sampler::seeded(7);
        let ids: Vec<i64> = (0..1000).collect();
        let first = sampler.select(ids.clone(), 10.0);
        let second = sampler.select(ids, 10.0);
        assert_eq!(first.len(), 100);
        assert_ne!(first, second);
    }

    #[test]
    fn seeded_samplers_are_reproducible() {
        let ids: Vec<i64> = (0..50).collect();
        let a = Sampler::seeded(99).select(ids.clone(), 20.0);
        let b = Sampler::seeded(99).select(ids, 20.0);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_population_selects_nothing() {
        let sampler = Sampler::seeded(3);
        assert!(sampler.select(Vec::new(), 100.0).is_empty());
    }
}
