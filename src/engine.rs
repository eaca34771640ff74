//! Evolution engine
//!
//! This module provides the generation-step orchestrator. The engine owns
//! the live population and its RNG; an external presentation collaborator
//! accumulates fitness between steps and receives a redraw notification
//! after each one.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EvoResult};
use crate::operators::mutation::{BitFlipMutation, DEFAULT_MUTATION_RATE};
use crate::operators::traits::{CrossoverOperator, Offspring, SelectionOperator};
use crate::population::organism::Organism;
use crate::population::population::Population;

/// Numeric engine configuration
///
/// Operator choices (selection policy, crossover strategy) are made on the
/// builder, not here; the crossover probability and elite count travel with
/// their operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Population size, constant across the engine's lifetime
    pub population_size: usize,
    /// Per-bit mutation probability
    pub mutation_rate: f64,
    /// RNG seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::invalid_range(
                "population_size",
                format!("{} is too small, need at least 2", self.population_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::invalid_range(
                "mutation_rate",
                format!("{} is not in [0, 1]", self.mutation_rate),
            ));
        }
        Ok(())
    }
}

/// Presentation collaborator notified after each generation step
pub trait GenerationObserver {
    /// A new generation is live and needs a redraw
    fn redraw(&mut self, generation: u64, population: &Population);
}

/// Summary of one completed generation step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    /// Generation number of the new live population
    pub generation: u64,
    /// Best fitness among the parents that were just replaced
    pub parent_best_fitness: f64,
}

/// Builder for [`EvolutionEngine`]
///
/// Selection policy and crossover strategy are deployment decisions and must
/// be set explicitly; `build` refuses to pick one.
pub struct EngineBuilder<S, C> {
    config: EngineConfig,
    selection: Option<S>,
    crossover: Option<C>,
}

impl EngineBuilder<(), ()> {
    /// Create a new builder with default numeric configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            selection: None,
            crossover: None,
        }
    }
}

impl Default for EngineBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> EngineBuilder<S, C> {
    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the per-bit mutation rate
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Set the RNG seed for a reproducible run
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the whole numeric configuration at once
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the selection policy
    pub fn selection<NewS>(self, selection: NewS) -> EngineBuilder<NewS, C>
    where
        NewS: SelectionOperator,
    {
        EngineBuilder {
            config: self.config,
            selection: Some(selection),
            crossover: self.crossover,
        }
    }

    /// Set the crossover strategy
    pub fn crossover<NewC>(self, crossover: NewC) -> EngineBuilder<S, NewC>
    where
        NewC: CrossoverOperator,
    {
        EngineBuilder {
            config: self.config,
            selection: self.selection,
            crossover: Some(crossover),
        }
    }
}

impl<S, C> EngineBuilder<S, C>
where
    S: SelectionOperator,
    C: CrossoverOperator,
{
    /// Build the engine, seeding the RNG and the initial random population
    pub fn build(self) -> EvoResult<EvolutionEngine<S, C>> {
        self.config.validate()?;

        let selection = self.selection.ok_or_else(|| {
            ConfigError::invalid_range("selection", "a selection policy must be chosen")
        })?;
        let crossover = self.crossover.ok_or_else(|| {
            ConfigError::invalid_range("crossover", "a crossover strategy must be chosen")
        })?;
        selection.validate(self.config.population_size)?;
        crossover.validate(self.config.population_size)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let population = Population::random(self.config.population_size, &mut rng);
        let mutation = BitFlipMutation::new(self.config.mutation_rate);

        Ok(EvolutionEngine {
            config: self.config,
            selection,
            crossover,
            mutation,
            population,
            generation: 1,
            rng,
            observer: None,
        })
    }
}

/// Generation-step orchestrator
///
/// Owns the live population. `step()` runs one full
/// select → reproduce → mutate/repair → replace cycle synchronously and to
/// completion; the population is swapped wholesale, never partially updated.
pub struct EvolutionEngine<S, C> {
    config: EngineConfig,
    selection: S,
    crossover: C,
    mutation: BitFlipMutation,
    population: Population,
    generation: u64,
    rng: StdRng,
    observer: Option<Box<dyn GenerationObserver>>,
}

impl<S, C> EvolutionEngine<S, C>
where
    S: SelectionOperator,
    C: CrossoverOperator,
{
    /// Create a builder
    pub fn builder() -> EngineBuilder<(), ()> {
        EngineBuilder::new()
    }

    /// The live population, in slot order
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generation number of the live population, starting at 1
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The numeric configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register the presentation collaborator to notify after each step
    pub fn set_observer(&mut self, observer: Box<dyn GenerationObserver>) {
        self.observer = Some(observer);
    }

    /// Add interaction-derived fitness to the organism at `organism_index`
    ///
    /// No-ops on a stale or out-of-bounds index (the population is replaced
    /// each generation, so indices only stay valid until the next `step`)
    /// and on a negative or non-finite delta.
    pub fn record_interaction_fitness(&mut self, organism_index: usize, delta: f64) {
        if !delta.is_finite() || delta < 0.0 {
            debug!("ignoring interaction delta {delta} for organism {organism_index}");
            return;
        }
        match self.population.get_mut(organism_index) {
            Some(organism) => {
                organism.add_fitness(delta);
                trace!(
                    "organism {organism_index} fitness now {:.2}",
                    organism.fitness()
                );
            }
            None => debug!("ignoring interaction for stale index {organism_index}"),
        }
    }

    /// Run one generation step
    ///
    /// Draws a mating pool, reproduces exactly `population_size` children,
    /// mutates and repairs each, swaps the population in a single
    /// assignment, and notifies the observer.
    pub fn step(&mut self) -> StepReport {
        let n = self.config.population_size;
        let parent_best_fitness = self.population.best().map(Organism::fitness).unwrap_or(0.0);

        debug!(
            "generation {}: drawing mating pool of {n} (total fitness {:.2})",
            self.generation,
            self.population.total_fitness()
        );
        let pool = self.selection.mating_pool(&self.population, &mut self.rng);
        debug_assert_eq!(pool.len(), n);

        let children = self.reproduce(&pool, n);
        debug_assert_eq!(children.len(), n);
        debug_assert!(children.iter().all(|child| child.fitness() == 0.0));
        debug_assert!(children.iter().all(|child| child.traits().is_within_domain()));

        self.population = Population::from_organisms(children);
        self.generation += 1;
        info!(
            "generation {} live (parent best fitness {parent_best_fitness:.2})",
            self.generation
        );

        if let Some(observer) = self.observer.as_mut() {
            observer.redraw(self.generation, &self.population);
        }

        StepReport {
            generation: self.generation,
            parent_best_fitness,
        }
    }

    /// Produce exactly `n` mutated, repaired children from the mating pool
    fn reproduce(&mut self, pool: &[Organism], n: usize) -> Vec<Organism> {
        let mut children = Vec::with_capacity(n);

        if self.crossover.children_per_mating() == 2 {
            // Pair-producing strategies consume the pool as consecutive
            // disjoint pairs; selection has already randomized pool order.
            for pair in pool.chunks_exact(2) {
                if children.len() >= n {
                    break;
                }
                match self.crossover.crossover(&pair[0], &pair[1], &mut self.rng) {
                    Offspring::Pair(first, second) => {
                        children.push(first);
                        if children.len() < n {
                            children.push(second);
                        }
                    }
                    Offspring::Single(child) => children.push(child),
                }
            }
            // Odd pool size leaves one slot; fill it from one extra mating
            while children.len() < n {
                let (parent1, parent2) = self.sample_parents(pool);
                let child = self
                    .crossover
                    .crossover(&parent1, &parent2, &mut self.rng)
                    .into_first();
                children.push(child);
            }
        } else {
            for slot in 0..n {
                let (parent1, parent2) = self.sample_parents(pool);
                let child = self
                    .crossover
                    .crossover(&parent1, &parent2, &mut self.rng)
                    .into_first();
                trace!("mating for slot {slot}: [{parent1}] x [{parent2}] -> [{child}]");
                children.push(child);
            }
        }

        for child in &mut children {
            self.mutation.mutate(child, &mut self.rng);
        }
        children
    }

    /// Draw two distinct parents from the pool
    fn sample_parents(&mut self, pool: &[Organism]) -> (Organism, Organism) {
        let picked: Vec<&Organism> = pool.choose_multiple(&mut self.rng, 2).collect();
        (*picked[0], *picked[1])
    }
}
