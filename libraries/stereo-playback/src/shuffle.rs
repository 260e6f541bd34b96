//! Shuffle without replacement
//!
//! A shuffle session draws uniformly at random from a pool of track ids and
//! never returns the same id twice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use stereo_core::TrackId;

/// Pool of ids not yet drawn in the current shuffle session
#[derive(Debug)]
pub struct ShufflePool {
    remaining: Vec<TrackId>,
    rng: StdRng,
}

impl ShufflePool {
    /// Create a pool seeded from OS entropy
    ///
    /// Duplicate ids are collapsed, first occurrence wins.
    pub fn new(ids: impl IntoIterator<Item = TrackId>) -> Self {
        Self::with_rng(ids, StdRng::from_entropy())
    }

    /// Create a pool with a caller-provided generator (deterministic tests)
    pub fn with_rng(ids: impl IntoIterator<Item = TrackId>, rng: StdRng) -> Self {
        let mut seen = HashSet::new();
        let remaining = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { remaining, rng }
    }

    /// Remove and return a random remaining id
    pub fn draw(&mut self) -> Option<TrackId> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(index))
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(ids: impl IntoIterator<Item = i64>, seed: u64) -> ShufflePool {
        ShufflePool::with_rng(ids.into_iter().map(TrackId::new), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn draws_every_id_exactly_once() {
        let mut pool = seeded(1..=20, 7);
        let mut drawn = Vec::new();
        while let Some(id) = pool.draw() {
            drawn.push(id.get());
        }

        drawn.sort_unstable();
        assert_eq!(drawn, (1..=20).collect::<Vec<_>>());
        assert!(pool.is_empty());
        assert_eq!(pool.draw(), None);
    }

    #[test]
    fn duplicates_collapse_on_creation() {
        let pool = seeded([3, 1, 3, 2, 1], 1);
        assert_eq!(pool.remaining(), 3);
    }

    #[test]
    fn shrinks_by_one_per_draw() {
        let mut pool = seeded(1..=4, 99);
        for expected in (0..4).rev() {
            pool.draw();
            assert_eq!(pool.remaining(), expected);
        }
    }

    #[test]
    fn empty_pool() {
        let mut pool = ShufflePool::new(std::iter::empty());
        assert!(pool.is_empty());
        assert_eq!(pool.draw(), None);
    }

    #[test]
    fn order_is_not_fixed() {
        // Two seeds producing the same order for 10 items is vanishingly unlikely
        let order = |seed| {
            let mut pool = seeded(1..=10, seed);
            std::iter::from_fn(|| pool.draw()).collect::<Vec<_>>()
        };
        assert_ne!(order(1), order(2));
    }
}
