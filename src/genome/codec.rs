//! Genome codec
//!
//! This module provides the fixed-width 80-bit chromosome and its
//! encode/decode contract with [`FlowerTraits`]. Bits are stored in a `u128`
//! and manipulated with shifts and masks; bit 0 is the most significant bit
//! of the chromosome, so the display order matches the field order of the
//! schema.

use crate::error::EncodeError;
use crate::genome::domain::{CHROMOSOME_BITS, GENES, GENE_COUNT};
use crate::genome::flower::FlowerTraits;

/// Fixed-width 80-bit chromosome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Genome(u128);

impl Genome {
    /// Chromosome width in bits
    pub const WIDTH: usize = CHROMOSOME_BITS;

    /// The all-zeros chromosome
    pub const fn zeros() -> Self {
        Self(0)
    }

    /// The all-ones chromosome
    pub const fn ones() -> Self {
        Self((1u128 << Self::WIDTH) - 1)
    }

    /// Build from raw bits; anything above the chromosome width is discarded
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits & ((1u128 << Self::WIDTH) - 1))
    }

    /// The raw bits, right-aligned in the low 80 bits
    pub const fn to_bits(self) -> u128 {
        self.0
    }

    /// Get the bit at `index`
    ///
    /// # Panics
    /// Panics if `index >= Self::WIDTH`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < Self::WIDTH, "bit index {index} out of range");
        (self.0 >> (Self::WIDTH - 1 - index)) & 1 == 1
    }

    /// Flip the bit at `index`
    ///
    /// # Panics
    /// Panics if `index >= Self::WIDTH`.
    pub fn flip(&mut self, index: usize) {
        assert!(index < Self::WIDTH, "bit index {index} out of range");
        self.0 ^= 1u128 << (Self::WIDTH - 1 - index);
    }

    /// Count the set bits
    pub const fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Decode into a trait vector
    ///
    /// Total over any 80-bit input: decoded genes always fit their bit
    /// widths, but may lie outside their legal ranges (a 5-bit center_size
    /// can decode to 29). Decode never clamps; that is repair's job.
    pub fn decode(&self) -> FlowerTraits {
        let mut genes = [0u8; GENE_COUNT];
        let mut word = self.0;
        for (gene, domain) in genes.iter_mut().zip(GENES.iter()).rev() {
            *gene = (word & ((1u128 << domain.bits) - 1)) as u8;
            word >>= domain.bits;
        }
        FlowerTraits::from_genes(genes)
    }
}

impl std::fmt::Display for Genome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for index in 0..Self::WIDTH {
            write!(f, "{}", u8::from(self.bit(index)))?;
        }
        Ok(())
    }
}

impl FlowerTraits {
    /// Encode into the 80-bit chromosome
    ///
    /// Genes are concatenated big-endian in schema order. Fails with
    /// [`EncodeError::OutOfRange`] if a gene value does not fit its declared
    /// bit width; values inside the width but outside the legal range (which
    /// repair would clamp) encode fine.
    pub fn encode(&self) -> Result<Genome, EncodeError> {
        let mut word: u128 = 0;
        for (gene, domain) in self.as_genes().iter().zip(GENES.iter()) {
            if !domain.fits_width(*gene) {
                return Err(EncodeError::OutOfRange {
                    gene: domain.name,
                    value: *gene,
                    bits: domain.bits,
                });
            }
            word = (word << domain.bits) | u128::from(*gene);
        }
        Ok(Genome(word))
    }
}
