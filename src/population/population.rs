//! Population type
//!
//! This module provides the Population container type: an ordered,
//! fixed-cardinality sequence of organisms. Slot order is the stable
//! position-to-visual-slot mapping for the presentation layer; ranked views
//! are produced as new orderings and never disturb it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::flower::FlowerTraits;
use crate::population::organism::Organism;

/// A population of organisms
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    organisms: Vec<Organism>,
}

impl Population {
    /// Create a random population of the given size
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        let organisms = (0..size)
            .map(|_| Organism::new(FlowerTraits::random(rng)))
            .collect();
        Self { organisms }
    }

    /// Create a population from a vector of organisms
    pub fn from_organisms(organisms: Vec<Organism>) -> Self {
        Self { organisms }
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    /// Get an organism by slot index
    pub fn get(&self, index: usize) -> Option<&Organism> {
        self.organisms.get(index)
    }

    /// Get a mutable reference to an organism by slot index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Organism> {
        self.organisms.get_mut(index)
    }

    /// Get an iterator over the organisms in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.iter()
    }

    /// Get the organisms in slot order
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    /// Get a best-first view of the population
    ///
    /// Returns a new ordering; slot order is untouched. Ties keep slot order.
    pub fn ranked(&self) -> Vec<&Organism> {
        let mut ranked: Vec<&Organism> = self.organisms.iter().collect();
        ranked.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Get the fittest organism
    pub fn best(&self) -> Option<&Organism> {
        self.organisms.iter().max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Sum of all fitness accumulators
    pub fn total_fitness(&self) -> f64 {
        self.organisms.iter().map(Organism::fitness).sum()
    }
}
