//! Reviewer selection: uniform random choice among eligible candidates.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::foundation::UserId;

/// Shuffles `candidates` and keeps the first `min(count, len)` entries.
///
/// Every subset of the requested size is equally likely. Returns fewer
/// than `count` ids when the pool is small and an empty vec for an empty
/// pool.
pub fn shuffle_and_take<R: Rng + ?Sized>(
    rng: &mut R,
    mut candidates: Vec<UserId>,
    count: usize,
) -> Vec<UserId> {
    candidates.shuffle(rng);
    candidates.truncate(count);
    candidates
}

/// Picks a single candidate uniformly, or `None` for an empty pool.
pub fn pick_uniform<R: Rng + ?Sized>(rng: &mut R, candidates: &[UserId]) -> Option<UserId> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Shared selector owning an injectable random source.
///
/// Safe to share across tasks; the generator sits behind a mutex.
#[derive(Debug)]
pub struct ReviewerSelector {
    rng: Mutex<StdRng>,
}

impl ReviewerSelector {
    /// Deterministic selector for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Builds a seeded selector when a seed is given, otherwise an entropy-backed one.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Chooses up to `count` distinct reviewers from `candidates`.
    pub fn select(&self, candidates: Vec<UserId>, count: usize) -> Vec<UserId> {
        // A panicked holder cannot leave StdRng in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        shuffle_and_take(&mut *rng, candidates, count)
    }

    /// Chooses one replacement reviewer.
    pub fn pick_one(&self, candidates: &[UserId]) -> Option<UserId> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_uniform(&mut *rng, candidates)
    }
}

impl Default for ReviewerSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}
