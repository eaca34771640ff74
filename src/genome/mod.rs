//! Genome schema, trait vector, and chromosome codec
//!
//! This module fixes the chromosome layout and provides the typed trait
//! vector with its encode/decode and repair operations.

pub mod codec;
pub mod domain;
pub mod flower;

pub mod prelude {
    pub use super::codec::*;
    pub use super::domain::*;
    pub use super::flower::*;
}
