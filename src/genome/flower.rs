//! Flower trait vector
//!
//! This module provides the typed trait vector an organism is built from:
//! five named fields with fixed bit widths and legal ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::domain::{GENE_COUNT, GENES};

/// An 8-bit-per-channel RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack the channels into a 24-bit integer (red in the high bits)
    pub const fn packed(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack a 24-bit integer into channels
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Sample a uniformly random color
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The trait vector of a flower
///
/// Field order matches the chromosome schema in [`crate::genome::domain`];
/// every encode, decode, crossover, and mutation operation relies on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowerTraits {
    /// Radius of the flower center, legal range [8, 20]
    pub center_size: u8,
    /// Color of the flower center
    pub center_color: Rgb,
    /// Color of the petals
    pub petal_color: Rgb,
    /// Color of the stem
    pub stem_color: Rgb,
    /// Number of petals, legal range [0, 7]
    pub num_petals: u8,
}

impl FlowerTraits {
    /// Sample a random trait vector, uniform within each gene's legal range
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            center_size: rng.gen_range(8..=20),
            center_color: Rgb::random(rng),
            petal_color: Rgb::random(rng),
            stem_color: Rgb::random(rng),
            num_petals: rng.gen_range(0..=7),
        }
    }

    /// Flatten into the ordered 11-gene view
    pub fn as_genes(&self) -> [u8; GENE_COUNT] {
        [
            self.center_size,
            self.center_color.r,
            self.center_color.g,
            self.center_color.b,
            self.petal_color.r,
            self.petal_color.g,
            self.petal_color.b,
            self.stem_color.r,
            self.stem_color.g,
            self.stem_color.b,
            self.num_petals,
        ]
    }

    /// Rebuild from the ordered 11-gene view
    pub fn from_genes(genes: [u8; GENE_COUNT]) -> Self {
        Self {
            center_size: genes[0],
            center_color: Rgb::new(genes[1], genes[2], genes[3]),
            petal_color: Rgb::new(genes[4], genes[5], genes[6]),
            stem_color: Rgb::new(genes[7], genes[8], genes[9]),
            num_petals: genes[10],
        }
    }

    /// Clamp every gene into its legal range, in place
    pub fn repair(&mut self) {
        let mut genes = self.as_genes();
        for (gene, domain) in genes.iter_mut().zip(GENES.iter()) {
            *gene = domain.clamp(*gene);
        }
        *self = Self::from_genes(genes);
    }

    /// Return a repaired copy
    pub fn repaired(&self) -> Self {
        let mut repaired = *self;
        repaired.repair();
        repaired
    }

    /// Check if every gene is within its legal range
    pub fn is_within_domain(&self) -> bool {
        self.as_genes()
            .iter()
            .zip(GENES.iter())
            .all(|(gene, domain)| domain.contains(*gene))
    }
}

impl std::fmt::Display for FlowerTraits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "size={} center={} petals={}x{} stem={}",
            self.center_size, self.center_color, self.num_petals, self.petal_color, self.stem_color
        )
    }
}
