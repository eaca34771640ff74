//! Selection operators
//!
//! This module provides the two mating-pool policies: fitness-proportional
//! roulette sampling and elitism with duplication.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::error::ConfigError;
use crate::operators::traits::SelectionOperator;
use crate::population::organism::Organism;
use crate::population::population::Population;

/// Roulette wheel selection (fitness proportionate)
///
/// Draws the pool with replacement; each organism's probability is its share
/// of the population's total fitness. A total of exactly zero degenerates to
/// uniform sampling, so a fresh population with no interaction yet still
/// reproduces.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }
}

impl SelectionOperator for RouletteSelection {
    fn mating_pool<R: Rng>(&self, population: &Population, rng: &mut R) -> Vec<Organism> {
        let n = population.len();
        let weights: Vec<f64> = population.iter().map(Organism::fitness).collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => (0..n)
                .map(|_| population.organisms()[dist.sample(rng)])
                .collect(),
            // All-zero weights (or a degenerate distribution) fall back to
            // uniform sampling.
            Err(_) => (0..n)
                .map(|_| population.organisms()[rng.gen_range(0..n)])
                .collect(),
        }
    }
}

/// Elitism selection with duplication
///
/// Ranks the population best-first, keeps the top `elite_count`, and repeats
/// them cyclically until the pool reaches population size, then shuffles the
/// pool so consecutive pairing does not mate each elite with itself.
#[derive(Clone, Copy, Debug)]
pub struct ElitismSelection {
    /// Number of top-ranked organisms admitted to the pool
    pub elite_count: usize,
}

impl ElitismSelection {
    /// Create a new elitism selection keeping the top `elite_count`
    pub fn new(elite_count: usize) -> Self {
        Self { elite_count }
    }
}

impl Default for ElitismSelection {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SelectionOperator for ElitismSelection {
    fn mating_pool<R: Rng>(&self, population: &Population, rng: &mut R) -> Vec<Organism> {
        let n = population.len();
        let elites: Vec<&Organism> = population.ranked().into_iter().take(self.elite_count).collect();

        let mut pool: Vec<Organism> = (0..n).map(|i| *elites[i % elites.len()]).collect();
        pool.shuffle(rng);
        pool
    }

    fn validate(&self, population_size: usize) -> Result<(), ConfigError> {
        if self.elite_count == 0 {
            return Err(ConfigError::invalid_range(
                "elite_count",
                "must be at least 1",
            ));
        }
        if self.elite_count >= population_size {
            return Err(ConfigError::invalid_range(
                "elite_count",
                format!(
                    "{} must be smaller than the population size {population_size}",
                    self.elite_count
                ),
            ));
        }
        Ok(())
    }
}
