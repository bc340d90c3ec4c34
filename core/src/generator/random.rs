use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::*;

/// Picks a free cell uniformly and flips a (possibly weighted) coin for its value.
#[derive(Clone, Debug)]
pub struct RandomTileGenerator<R = SmallRng> {
    rng: R,
    distribution: SpawnDistribution,
}

impl RandomTileGenerator<SmallRng> {
    pub fn from_seed(seed: u64, distribution: SpawnDistribution) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), distribution)
    }
}

impl<R: Rng> RandomTileGenerator<R> {
    pub fn new(rng: R, distribution: SpawnDistribution) -> Self {
        Self { rng, distribution }
    }

    pub fn distribution(&self) -> SpawnDistribution {
        self.distribution
    }
}

impl<R: Rng> TileGenerator for RandomTileGenerator<R> {
    fn next_placement(&mut self, free: &[Coord2]) -> Option<Placement> {
        let &coords = free.choose(&mut self.rng)?;
        let tile = if self.rng.random_bool(self.distribution.four_probability()) {
            4
        } else {
            2
        };
        Some(Placement::new(coords, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE: [Coord2; 3] = [(0, 1), (2, 2), (3, 0)];

    #[test]
    fn same_seed_replays_same_placements() {
        let mut a = RandomTileGenerator::from_seed(7, SpawnDistribution::Uniform);
        let mut b = RandomTileGenerator::from_seed(7, SpawnDistribution::Uniform);

        for _ in 0..32 {
            assert_eq!(a.next_placement(&FREE), b.next_placement(&FREE));
        }
    }

    #[test]
    fn placements_land_on_free_cells_with_spawn_values() {
        let mut generator = RandomTileGenerator::from_seed(42, SpawnDistribution::Uniform);

        for _ in 0..200 {
            let placement = generator.next_placement(&FREE).unwrap();
            assert!(FREE.contains(&placement.coords));
            assert!(matches!(placement.tile, 2 | 4));
        }
    }

    #[test]
    fn uniform_coin_is_roughly_fair_and_classic_favors_twos() {
        let count_fours = |distribution| {
            let mut generator = RandomTileGenerator::from_seed(1234, distribution);
            (0..4000)
                .filter(|_| generator.next_placement(&FREE).unwrap().tile == 4)
                .count()
        };

        let uniform = count_fours(SpawnDistribution::Uniform);
        let classic = count_fours(SpawnDistribution::Classic);

        assert!((1700..2300).contains(&uniform), "uniform fours: {uniform}");
        assert!((200..700).contains(&classic), "classic fours: {classic}");
    }

    #[test]
    fn free_cells_are_picked_uniformly() {
        let mut generator = RandomTileGenerator::from_seed(99, SpawnDistribution::Classic);
        let mut hits = [0usize; FREE.len()];

        for _ in 0..3000 {
            let placement = generator.next_placement(&FREE).unwrap();
            let slot = FREE.iter().position(|&c| c == placement.coords).unwrap();
            hits[slot] += 1;
        }

        for (coords, count) in FREE.iter().zip(hits) {
            assert!((850..1150).contains(&count), "{coords:?} picked {count} times");
        }
    }

    #[test]
    fn empty_free_list_yields_nothing() {
        let mut generator = RandomTileGenerator::from_seed(0, SpawnDistribution::Classic);

        assert_eq!(generator.next_placement(&[]), None);
        assert_eq!(generator.distribution(), SpawnDistribution::Classic);
    }
}
