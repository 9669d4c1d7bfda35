//! # Random winner selection.
//!
//! [`Selector`] draws the winning slot for a spin. Implementations must return a
//! value uniformly distributed over `[0, n)`.
//!
//! - [`UniformSelector`]: thread-local RNG (default).
//! - [`SeededSelector`]: reproducible sequence from a fixed seed (tests, demos).
//!
//! Both reduce an **unsigned** draw to the range with `random_range`, which rejects
//! the biased tail instead of taking a plain modulo.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of winning indices.
///
/// # Example
/// ```
/// use spinwheel::{Selector, UniformSelector};
///
/// let sel = UniformSelector;
/// let w = sel.next(8);
/// assert!(w < 8);
/// ```
pub trait Selector: Send + Sync + 'static {
    /// Returns an index uniformly distributed over `[0, n)`.
    ///
    /// `n == 0` returns `0`; the ring never has zero slots.
    fn next(&self, n: usize) -> usize;

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Uniform selector backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSelector;

impl Selector for UniformSelector {
    fn next(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        rand::rng().random_range(0..n)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Deterministic selector: the same seed yields the same winners.
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    /// Creates a selector seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn next(&self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0..n)
    }

    fn name(&self) -> &'static str {
        "seeded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pearson chi-square statistic of `counts` against a uniform expectation.
    fn chi_square(counts: &[u64]) -> f64 {
        let total: u64 = counts.iter().sum();
        let expected = total as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum()
    }

    fn histogram(sel: &dyn Selector, n: usize, samples: usize) -> Vec<u64> {
        let mut counts = vec![0u64; n];
        for _ in 0..samples {
            let v = sel.next(n);
            assert!(v < n, "value {v} out of range for n={n}");
            counts[v] += 1;
        }
        counts
    }

    #[test]
    fn values_stay_in_range_for_small_rings() {
        let sel = UniformSelector;
        for n in 1..=32 {
            for _ in 0..500 {
                assert!(sel.next(n) < n);
            }
        }
    }

    #[test]
    fn single_slot_always_wins() {
        assert_eq!(SeededSelector::new(9).next(1), 0);
        assert_eq!(UniformSelector.next(1), 0);
    }

    #[test]
    fn zero_slots_returns_zero() {
        assert_eq!(UniformSelector.next(0), 0);
        assert_eq!(SeededSelector::new(1).next(0), 0);
    }

    #[test]
    fn seeded_selector_is_reproducible() {
        let a = SeededSelector::new(42);
        let b = SeededSelector::new(42);
        let xs: Vec<usize> = (0..64).map(|_| a.next(8)).collect();
        let ys: Vec<usize> = (0..64).map(|_| b.next(8)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn seeded_selector_passes_chi_square() {
        // 7 degrees of freedom: p = 0.0001 critical value is ~29.88.
        let counts = histogram(&SeededSelector::new(0x5eed), 8, 80_000);
        let stat = chi_square(&counts);
        assert!(stat < 29.88, "chi-square {stat} counts={counts:?}");
    }

    #[test]
    fn uniform_selector_passes_chi_square_on_odd_ring() {
        // 8 degrees of freedom: p = 0.00001 critical value is ~37.33.
        let counts = histogram(&UniformSelector, 9, 90_000);
        let stat = chi_square(&counts);
        assert!(stat < 37.33, "chi-square {stat} counts={counts:?}");
    }
}
