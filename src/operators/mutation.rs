//! Mutation operator
//!
//! This module provides bit-flip mutation over the 80-bit chromosome,
//! followed by the repair step that restores the trait domain.

use log::warn;
use rand::Rng;

use crate::genome::codec::Genome;
use crate::population::organism::Organism;

/// Default per-bit flip probability
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;

/// Bit-flip mutation
///
/// Encodes the organism's traits to the chromosome, flips every bit
/// independently with probability `rate` (a fresh draw per bit), decodes, and
/// repairs the result into the legal trait domain.
#[derive(Clone, Copy, Debug)]
pub struct BitFlipMutation {
    /// Per-bit flip probability
    pub rate: f64,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation with the given per-bit rate
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Mutate an organism's traits in place
    ///
    /// Fitness is untouched. A trait value too wide for its field here means
    /// a repair step was skipped upstream; that is fatal in debug builds and
    /// clamped defensively in release builds.
    pub fn mutate<R: Rng>(&self, organism: &mut Organism, rng: &mut R) {
        let traits = *organism.traits();
        let mut genome = match traits.encode() {
            Ok(genome) => genome,
            Err(err) => {
                debug_assert!(false, "trait vector escaped repair: {err}");
                warn!("clamping trait vector that escaped repair: {err}");
                traits
                    .repaired()
                    .encode()
                    .expect("repaired traits fit their declared widths")
            }
        };

        for bit in 0..Genome::WIDTH {
            if rng.gen::<f64>() < self.rate {
                genome.flip(bit);
            }
        }

        let mut mutated = genome.decode();
        mutated.repair();
        *organism.traits_mut() = mutated;
    }
}

impl Default for BitFlipMutation {
    fn default() -> Self {
        Self::new(DEFAULT_MUTATION_RATE)
    }
}
