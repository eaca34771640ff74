//! Error types for flora-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for genome encoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A trait value does not fit in its declared bit width
    #[error("{gene} value {value} does not fit in {bits} bits")]
    OutOfRange {
        /// Name of the offending gene
        gene: &'static str,
        /// The value that failed to encode
        value: u8,
        /// Declared bit width of the gene
        bits: u32,
    },
}

/// Error type for engine configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration parameter is outside its sane bounds
    #[error("invalid {parameter}: {reason}")]
    InvalidRange {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Shorthand for building an `InvalidRange` error
    pub fn invalid_range(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Top-level error type for evolution operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvolutionError {
    /// Genome encoding error
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
