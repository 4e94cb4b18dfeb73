//! Move-sequence genomes and their variation operators.

use crate::core::{Direction, SearchRng};

/// A fixed-length sequence of moves.
pub type Genome = Vec<Direction>;

/// Genome of `length` uniformly random directions.
pub fn random_genome(rng: &mut SearchRng, length: usize) -> Genome {
    (0..length).map(|_| rng.direction()).collect()
}

/// Random cut point in `1..=length - 2`.
///
/// `None` for genomes shorter than 3, which are never recombined.
pub fn crossover_point(rng: &mut SearchRng, length: usize) -> Option<usize> {
    if length < 3 {
        None
    } else {
        Some(rng.gen_inclusive(1, length - 2))
    }
}

/// Single-point crossover: swap the tails of two parents at `point`.
///
/// `point` must not exceed either parent's length.
pub fn crossover(a: &[Direction], b: &[Direction], point: usize) -> (Genome, Genome) {
    let mut first = a[..point].to_vec();
    first.extend_from_slice(&b[point..]);
    let mut second = b[..point].to_vec();
    second.extend_from_slice(&a[point..]);
    (first, second)
}

/// Replace one random gene with a random direction.
///
/// The new direction may equal the old one. Empty genomes are left alone.
pub fn mutate(genome: &mut Genome, rng: &mut SearchRng) {
    if genome.is_empty() {
        return;
    }
    let index = rng.gen_index(genome.len());
    genome[index] = rng.direction();
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_random_genome_length() {
        let mut rng = SearchRng::new(1);
        assert_eq!(random_genome(&mut rng, 10).len(), 10);
        assert!(random_genome(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let a = [Up, Up, Up, Up];
        let b = [Down, Down, Down, Down];
        let (c, d) = crossover(&a, &b, 1);
        assert_eq!(c, vec![Up, Down, Down, Down]);
        assert_eq!(d, vec![Down, Up, Up, Up]);
    }

    #[test]
    fn test_crossover_point_range() {
        let mut rng = SearchRng::new(5);
        assert_eq!(crossover_point(&mut rng, 0), None);
        assert_eq!(crossover_point(&mut rng, 2), None);
        assert_eq!(crossover_point(&mut rng, 3), Some(1));
        for _ in 0..100 {
            let p = crossover_point(&mut rng, 10).unwrap();
            assert!((1..=8).contains(&p));
        }
    }

    #[test]
    fn test_mutate_changes_at_most_one_gene() {
        let mut rng = SearchRng::new(13);
        for _ in 0..50 {
            let original = random_genome(&mut rng, 10);
            let mut mutated = original.clone();
            mutate(&mut mutated, &mut rng);
            let diff = original.iter().zip(&mutated).filter(|(a, b)| a != b).count();
            assert!(diff <= 1);
        }
    }

    #[test]
    fn test_mutate_empty() {
        let mut rng = SearchRng::new(13);
        let mut genome = Genome::new();
        mutate(&mut genome, &mut rng);
        assert!(genome.is_empty());
    }
}
