//! Seeded random walk used for opportunistic movement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::controller::{try_move, Controller};
use crate::error::ActionError;
use crate::geometry::{Direction, DIRECTIONS};

/// Uniformly random compass direction picker.
///
/// Each robot owns one, seeded from its [`AgentConfig`](crate::AgentConfig),
/// so a run is reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: StdRng,
}

impl RandomWalk {
    /// Creates a new random walk from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws one of the eight movement directions.
    pub fn next_direction(&mut self) -> Direction {
        DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())]
    }

    /// Draws a direction and moves that way if legal.
    ///
    /// Returns whether a move was issued.
    pub fn step<C: Controller + ?Sized>(&mut self, rc: &mut C) -> Result<bool, ActionError> {
        let dir = self.next_direction();
        try_move(rc, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_draws_center() {
        let mut walk = RandomWalk::new(6147);
        for _ in 0..200 {
            assert_ne!(walk.next_direction(), Direction::Center);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomWalk::new(42);
        let mut b = RandomWalk::new(42);
        let xs: Vec<_> = (0..32).map(|_| a.next_direction()).collect();
        let ys: Vec<_> = (0..32).map(|_| b.next_direction()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn covers_every_direction() {
        let mut walk = RandomWalk::new(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(walk.next_direction());
        }
        assert_eq!(seen.len(), DIRECTIONS.len());
    }
}
