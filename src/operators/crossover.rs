//! Crossover operators
//!
//! This module provides the three interchangeable crossover strategies. Each
//! deployment picks exactly one; the engine builder refuses to guess.

use rand::Rng;

use crate::genome::domain::GENE_COUNT;
use crate::genome::flower::{FlowerTraits, Rgb};
use crate::operators::traits::{CrossoverOperator, Offspring};
use crate::population::organism::Organism;

/// Default probability that a mating event performs crossover
pub const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.65;

fn clone_of<R: Rng>(parent1: &Organism, parent2: &Organism, rng: &mut R) -> Organism {
    let donor = if rng.gen::<bool>() { parent1 } else { parent2 };
    Organism::new(*donor.traits())
}

/// Field-uniform crossover
///
/// With probability `crossover_probability` the child takes each of the five
/// trait fields (a color counts as one field) from either parent with equal
/// chance; otherwise it is a verbatim clone of one randomly-chosen parent.
/// One child per mating event.
#[derive(Clone, Copy, Debug)]
pub struct FieldUniformCrossover {
    /// Probability of crossing rather than cloning
    pub crossover_probability: f64,
}

impl FieldUniformCrossover {
    /// Create a new field-uniform crossover
    pub fn new(crossover_probability: f64) -> Self {
        Self {
            crossover_probability,
        }
    }
}

impl Default for FieldUniformCrossover {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSOVER_PROBABILITY)
    }
}

impl CrossoverOperator for FieldUniformCrossover {
    fn crossover<R: Rng>(&self, parent1: &Organism, parent2: &Organism, rng: &mut R) -> Offspring {
        if rng.gen::<f64>() >= self.crossover_probability {
            return Offspring::Single(clone_of(parent1, parent2, rng));
        }

        let a = parent1.traits();
        let b = parent2.traits();
        let traits = FlowerTraits {
            center_size: if rng.gen::<bool>() { a.center_size } else { b.center_size },
            center_color: if rng.gen::<bool>() { a.center_color } else { b.center_color },
            petal_color: if rng.gen::<bool>() { a.petal_color } else { b.petal_color },
            stem_color: if rng.gen::<bool>() { a.stem_color } else { b.stem_color },
            num_petals: if rng.gen::<bool>() { a.num_petals } else { b.num_petals },
        };
        Offspring::Single(Organism::new(traits))
    }

    fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }
}

/// Flat single-point crossover
///
/// Flattens both parents into the ordered 11-gene sequence, cuts once at a
/// random index in [1, 10], and swaps tails to produce two complementary
/// children. Without crossover each child is a verbatim clone of its own
/// parent. Two children per mating event.
#[derive(Clone, Copy, Debug)]
pub struct FlatSinglePointCrossover {
    /// Probability of crossing rather than cloning
    pub crossover_probability: f64,
}

impl FlatSinglePointCrossover {
    /// Create a new flat single-point crossover
    pub fn new(crossover_probability: f64) -> Self {
        Self {
            crossover_probability,
        }
    }

    fn splice_at(parent1: &FlowerTraits, parent2: &FlowerTraits, cut: usize) -> (Organism, Organism) {
        let genes_a = parent1.as_genes();
        let genes_b = parent2.as_genes();
        let mut child1 = genes_a;
        let mut child2 = genes_b;
        for index in cut..GENE_COUNT {
            child1[index] = genes_b[index];
            child2[index] = genes_a[index];
        }
        (
            Organism::new(FlowerTraits::from_genes(child1)),
            Organism::new(FlowerTraits::from_genes(child2)),
        )
    }
}

impl Default for FlatSinglePointCrossover {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSOVER_PROBABILITY)
    }
}

impl CrossoverOperator for FlatSinglePointCrossover {
    fn crossover<R: Rng>(&self, parent1: &Organism, parent2: &Organism, rng: &mut R) -> Offspring {
        if rng.gen::<f64>() >= self.crossover_probability {
            return Offspring::Pair(
                Organism::new(*parent1.traits()),
                Organism::new(*parent2.traits()),
            );
        }

        let cut = rng.gen_range(1..GENE_COUNT);
        let (child1, child2) = Self::splice_at(parent1.traits(), parent2.traits(), cut);
        Offspring::Pair(child1, child2)
    }

    fn children_per_mating(&self) -> usize {
        2
    }

    fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }
}

/// Bit single-point crossover, per field
///
/// With probability `crossover_probability`, each of the five trait fields is
/// spliced independently at a random bit cut in [1, width − 1]: the child
/// field takes parent A's high bits and parent B's low bits. Otherwise the
/// child clones one randomly-chosen parent's full vector. One child per
/// mating event.
#[derive(Clone, Copy, Debug)]
pub struct BitSinglePointCrossover {
    /// Probability of crossing rather than cloning
    pub crossover_probability: f64,
}

impl BitSinglePointCrossover {
    /// Create a new bit single-point crossover
    pub fn new(crossover_probability: f64) -> Self {
        Self {
            crossover_probability,
        }
    }

    /// Splice two field values at `cut` bits from the top of `width`
    fn splice_field(a: u32, b: u32, width: u32, cut: u32) -> u32 {
        debug_assert!(cut >= 1 && cut < width);
        let low_bits = width - cut;
        let low_mask = (1u32 << low_bits) - 1;
        (a & !low_mask) | (b & low_mask)
    }

    fn splice_random<R: Rng>(a: u32, b: u32, width: u32, rng: &mut R) -> u32 {
        let cut = rng.gen_range(1..width);
        Self::splice_field(a, b, width, cut)
    }
}

impl Default for BitSinglePointCrossover {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSOVER_PROBABILITY)
    }
}

impl CrossoverOperator for BitSinglePointCrossover {
    fn crossover<R: Rng>(&self, parent1: &Organism, parent2: &Organism, rng: &mut R) -> Offspring {
        if rng.gen::<f64>() >= self.crossover_probability {
            return Offspring::Single(clone_of(parent1, parent2, rng));
        }

        let a = parent1.traits();
        let b = parent2.traits();
        let traits = FlowerTraits {
            center_size: Self::splice_random(
                u32::from(a.center_size),
                u32::from(b.center_size),
                5,
                rng,
            ) as u8,
            center_color: Rgb::from_packed(Self::splice_random(
                a.center_color.packed(),
                b.center_color.packed(),
                24,
                rng,
            )),
            petal_color: Rgb::from_packed(Self::splice_random(
                a.petal_color.packed(),
                b.petal_color.packed(),
                24,
                rng,
            )),
            stem_color: Rgb::from_packed(Self::splice_random(
                a.stem_color.packed(),
                b.stem_color.packed(),
                24,
                rng,
            )),
            num_petals: Self::splice_random(
                u32::from(a.num_petals),
                u32::from(b.num_petals),
                3,
                rng,
            ) as u8,
        };
        Offspring::Single(Organism::new(traits))
    }

    fn crossover_probability(&self) -> f64 {
        self.crossover_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parent_pair() -> (Organism, Organism) {
        let low = FlowerTraits {
            center_size: 8,
            center_color: Rgb::new(0, 0, 0),
            petal_color: Rgb::new(0, 0, 0),
            stem_color: Rgb::new(0, 0, 0),
            num_petals: 0,
        };
        let high = FlowerTraits {
            center_size: 20,
            center_color: Rgb::new(255, 255, 255),
            petal_color: Rgb::new(255, 255, 255),
            stem_color: Rgb::new(255, 255, 255),
            num_petals: 7,
        };
        (
            Organism::with_fitness(low, 5.0),
            Organism::with_fitness(high, 0.0),
        )
    }

    #[test]
    fn test_field_uniform_child_fields_come_from_a_parent() {
        let mut rng = StdRng::seed_from_u64(97);
        let (p1, p2) = parent_pair();
        let crossover = FieldUniformCrossover::new(1.0);

        for _ in 0..50 {
            let child = crossover.crossover(&p1, &p2, &mut rng).into_first();
            let traits = child.traits();
            assert!(traits.center_size == 8 || traits.center_size == 20);
            assert!(
                traits.center_color == Rgb::new(0, 0, 0)
                    || traits.center_color == Rgb::new(255, 255, 255)
            );
            assert!(traits.num_petals == 0 || traits.num_petals == 7);
            assert_eq!(child.fitness(), 0.0);
        }
    }

    #[test]
    fn test_field_uniform_without_crossover_clones_a_parent() {
        let mut rng = StdRng::seed_from_u64(101);
        let (p1, p2) = parent_pair();
        let crossover = FieldUniformCrossover::new(0.0);

        for _ in 0..20 {
            let child = crossover.crossover(&p1, &p2, &mut rng).into_first();
            assert!(child.traits() == p1.traits() || child.traits() == p2.traits());
            assert_eq!(child.fitness(), 0.0);
        }
    }

    #[test]
    fn test_flat_single_point_cut_at_five() {
        let (p1, p2) = parent_pair();
        let (child1, child2) = FlatSinglePointCrossover::splice_at(p1.traits(), p2.traits(), 5);

        let genes_a = p1.traits().as_genes();
        let genes_b = p2.traits().as_genes();
        let genes_1 = child1.traits().as_genes();
        let genes_2 = child2.traits().as_genes();
        assert_eq!(&genes_1[..5], &genes_a[..5]);
        assert_eq!(&genes_1[5..], &genes_b[5..]);
        assert_eq!(&genes_2[..5], &genes_b[..5]);
        assert_eq!(&genes_2[5..], &genes_a[5..]);
        assert_eq!(child1.fitness(), 0.0);
        assert_eq!(child2.fitness(), 0.0);
    }

    #[test]
    fn test_flat_single_point_children_are_complementary() {
        let mut rng = StdRng::seed_from_u64(103);
        let (p1, p2) = parent_pair();
        let crossover = FlatSinglePointCrossover::new(1.0);

        for _ in 0..50 {
            let offspring = crossover.crossover(&p1, &p2, &mut rng);
            let Offspring::Pair(child1, child2) = offspring else {
                panic!("flat single-point must produce a pair");
            };
            let genes_a = p1.traits().as_genes();
            let genes_b = p2.traits().as_genes();
            let genes_1 = child1.traits().as_genes();
            let genes_2 = child2.traits().as_genes();
            for i in 0..GENE_COUNT {
                // Each position holds one parent's gene in one child and the
                // other parent's gene in the other child
                assert!(
                    (genes_1[i] == genes_a[i] && genes_2[i] == genes_b[i])
                        || (genes_1[i] == genes_b[i] && genes_2[i] == genes_a[i])
                );
            }
        }
    }

    #[test]
    fn test_flat_single_point_without_crossover_clones_both_parents() {
        let mut rng = StdRng::seed_from_u64(107);
        let (p1, p2) = parent_pair();
        let crossover = FlatSinglePointCrossover::new(0.0);

        let Offspring::Pair(child1, child2) = crossover.crossover(&p1, &p2, &mut rng) else {
            panic!("flat single-point must produce a pair");
        };
        assert_eq!(child1.traits(), p1.traits());
        assert_eq!(child2.traits(), p2.traits());
        assert_eq!(child1.fitness(), 0.0);
        assert_eq!(child2.fitness(), 0.0);
    }

    #[test]
    fn test_bit_splice_field() {
        // 10100 cut 1 over 01000: top 1 bit of a, low 4 of b
        assert_eq!(BitSinglePointCrossover::splice_field(0b10100, 0b01000, 5, 1), 0b11000);
        // cut 4: top 4 bits of a, low 1 of b
        assert_eq!(BitSinglePointCrossover::splice_field(0b10100, 0b01001, 5, 4), 0b10101);
    }

    #[test]
    fn test_bit_single_point_stays_within_field_widths() {
        let mut rng = StdRng::seed_from_u64(109);
        let (p1, p2) = parent_pair();
        let crossover = BitSinglePointCrossover::new(1.0);

        for _ in 0..100 {
            let child = crossover.crossover(&p1, &p2, &mut rng).into_first();
            // Splicing can leave the legal range but never the bit width,
            // so the child always encodes
            assert!(child.traits().encode().is_ok());
            assert_eq!(child.fitness(), 0.0);
        }
    }

    #[test]
    fn test_bit_single_point_without_crossover_clones_a_parent() {
        let mut rng = StdRng::seed_from_u64(113);
        let (p1, p2) = parent_pair();
        let crossover = BitSinglePointCrossover::new(0.0);

        for _ in 0..20 {
            let child = crossover.crossover(&p1, &p2, &mut rng).into_first();
            assert!(child.traits() == p1.traits() || child.traits() == p2.traits());
        }
    }

    #[test]
    fn test_parents_never_mutated() {
        let mut rng = StdRng::seed_from_u64(127);
        let (p1, p2) = parent_pair();
        let snapshot = (p1, p2);

        FieldUniformCrossover::default().crossover(&p1, &p2, &mut rng);
        FlatSinglePointCrossover::default().crossover(&p1, &p2, &mut rng);
        BitSinglePointCrossover::default().crossover(&p1, &p2, &mut rng);

        assert_eq!((p1, p2), snapshot);
    }

    #[test]
    fn test_default_probability() {
        assert_eq!(
            FieldUniformCrossover::default().crossover_probability(),
            DEFAULT_CROSSOVER_PROBABILITY
        );
        assert_eq!(
            FlatSinglePointCrossover::default().crossover_probability(),
            DEFAULT_CROSSOVER_PROBABILITY
        );
        assert_eq!(
            BitSinglePointCrossover::default().crossover_probability(),
            DEFAULT_CROSSOVER_PROBABILITY
        );
    }
}
