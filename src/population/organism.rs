//! Organism wrapper type
//!
//! This module provides the Organism type that wraps a trait vector with its
//! fitness accumulator.

use serde::{Deserialize, Serialize};

use crate::genome::flower::FlowerTraits;

/// An organism in the population
///
/// Wraps a trait vector with a non-negative fitness accumulator. Fitness is
/// supplied by an external collaborator between generation steps; every
/// organism produced by reproduction starts over at zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    traits: FlowerTraits,
    fitness: f64,
}

impl Organism {
    /// Create a new organism with zero fitness
    pub fn new(traits: FlowerTraits) -> Self {
        Self {
            traits,
            fitness: 0.0,
        }
    }

    /// Create an organism with a known fitness
    pub fn with_fitness(traits: FlowerTraits, fitness: f64) -> Self {
        Self { traits, fitness }
    }

    /// Get the trait vector
    pub fn traits(&self) -> &FlowerTraits {
        &self.traits
    }

    /// Get a mutable reference to the trait vector
    pub fn traits_mut(&mut self) -> &mut FlowerTraits {
        &mut self.traits
    }

    /// Get the accumulated fitness
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Add to the fitness accumulator
    pub fn add_fitness(&mut self, delta: f64) {
        self.fitness += delta;
    }

    /// Reset the fitness accumulator to zero
    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }

    /// Check if this organism out-scores another
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness > other.fitness
    }
}

impl std::fmt::Display for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} fitness={:.2}", self.traits, self.fitness)
    }
}
