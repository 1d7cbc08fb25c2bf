//! Style rotation: every style once before any repeats.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::models::Style;

/// Tracks the styles used since the last full cycle of the catalog.
#[derive(Debug, Clone, Default)]
pub struct StyleRotator {
    used: HashSet<Style>,
}

impl StyleRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next style uniformly from those not yet used this cycle.
    ///
    /// Once the catalog is exhausted the used set is cleared and the pick is
    /// made from the full catalog, so the style that closed the previous
    /// cycle may be chosen again straight away.
    pub fn next_style<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Style {
        let mut candidates: Vec<Style> = Style::ALL
            .iter()
            .copied()
            .filter(|style| !self.used.contains(style))
            .collect();

        if candidates.is_empty() {
            log::debug!("style catalog exhausted, starting a new cycle");
            self.used.clear();
            candidates = Style::ALL.to_vec();
        }

        // Never empty: the catalog is a non-empty constant.
        let style = *candidates.choose(rng).unwrap_or(&Style::ALL[0]);
        self.used.insert(style);
        style
    }

    pub fn used(&self) -> &HashSet<Style> {
        &self.used
    }

    pub fn remaining(&self) -> usize {
        Style::ALL.len() - self.used.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_no_repeats_within_a_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut rotator = StyleRotator::new();

        let picked: HashSet<Style> = (0..Style::ALL.len())
            .map(|_| rotator.next_style(&mut rng))
            .collect();

        assert_eq!(picked.len(), Style::ALL.len());
        assert_eq!(rotator.remaining(), 0);
    }

    #[test]
    fn test_resets_after_full_cycle() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut rotator = StyleRotator::new();

        for _ in 0..Style::ALL.len() {
            rotator.next_style(&mut rng);
        }
        let first_of_next_cycle = rotator.next_style(&mut rng);

        assert_eq!(rotator.used().len(), 1);
        assert!(rotator.used().contains(&first_of_next_cycle));
    }

    #[test]
    fn test_used_set_stays_within_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rotator = StyleRotator::new();

        for _ in 0..50 {
            rotator.next_style(&mut rng);
            assert!(rotator.used().iter().all(|s| Style::ALL.contains(s)));
            assert!(rotator.used().len() <= Style::ALL.len());
        }
    }

    #[test]
    fn test_every_cycle_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut rotator = StyleRotator::new();

        for _ in 0..4 {
            let cycle: HashSet<Style> = (0..Style::ALL.len())
                .map(|_| rotator.next_style(&mut rng))
                .collect();
            assert_eq!(cycle.len(), Style::ALL.len());
        }
    }
}
