//! # flora-evo
//!
//! An interactive genetic-algorithm engine that evolves a small population
//! of parametrized flowers across discrete generations.
//!
//! Fitness is not computed: a presentation collaborator accumulates it from
//! human interaction (hover time on a rendered flower) between generation
//! steps. This crate owns the evolutionary machinery — the 80-bit chromosome
//! codec, selection, crossover, mutation, and repair — and exposes the live
//! population for the collaborator to render.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flora_evo::prelude::*;
//!
//! let mut engine = EngineBuilder::new()
//!     .population_size(8)
//!     .mutation_rate(0.05)
//!     .seed(42)
//!     .selection(RouletteSelection::new())
//!     .crossover(FieldUniformCrossover::new(0.65))
//!     .build()?;
//!
//! // The collaborator feeds hover durations in between steps...
//! engine.record_interaction_fitness(3, 1.8);
//!
//! // ...and each step breeds the next generation from them.
//! let report = engine.step();
//! println!("generation {} is live", report.generation);
//! ```

pub mod engine;
pub mod error;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::error::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
