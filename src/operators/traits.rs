//! Operator traits
//!
//! This module defines the configurable seams of the engine: how a mating
//! pool is drawn from a population, and how two parents produce offspring.

use rand::Rng;

use crate::error::ConfigError;
use crate::population::organism::Organism;
use crate::population::population::Population;

/// Selection operator trait
///
/// Draws a mating pool of exactly `population.len()` organisms from a
/// population. Non-mutating over the input; the pool holds fresh copies,
/// never references into the population's slots.
pub trait SelectionOperator: Send + Sync {
    /// Produce a mating pool the same size as the population
    fn mating_pool<R: Rng>(&self, population: &Population, rng: &mut R) -> Vec<Organism>;

    /// Validate this operator against the engine configuration
    fn validate(&self, _population_size: usize) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Offspring of one mating event
///
/// Crossover strategies differ in arity: some produce a single child per
/// invocation, some a complementary pair.
#[derive(Clone, Debug, PartialEq)]
pub enum Offspring {
    /// One child
    Single(Organism),
    /// Two complementary children
    Pair(Organism, Organism),
}

impl Offspring {
    /// Number of children produced
    pub fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(_, _) => 2,
        }
    }

    /// Take the first (or only) child
    pub fn into_first(self) -> Organism {
        match self {
            Self::Single(child) | Self::Pair(child, _) => child,
        }
    }
}

/// Crossover operator trait
///
/// Combines two parents' trait vectors into offspring. Implementations never
/// mutate the parents, and every child starts with zero fitness.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents
    fn crossover<R: Rng>(&self, parent1: &Organism, parent2: &Organism, rng: &mut R) -> Offspring;

    /// Number of children per `crossover` invocation
    fn children_per_mating(&self) -> usize {
        1
    }

    /// Probability that a mating event performs crossover rather than cloning
    fn crossover_probability(&self) -> f64 {
        1.0
    }

    /// Validate this operator against the engine configuration
    fn validate(&self, _population_size: usize) -> Result<(), ConfigError> {
        let p = self.crossover_probability();
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::invalid_range(
                "crossover_probability",
                format!("{p} is not in [0, 1]"),
            ));
        }
        Ok(())
    }
}
