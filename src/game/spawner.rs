use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Piece, Tetromino};

/// Uniform random piece source.
pub struct Spawner {
    rng: StdRng,
}

impl Spawner {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_kind(&mut self) -> Tetromino {
        Tetromino::ALL[self.rng.gen_range(0..Tetromino::ALL.len())]
    }

    pub fn spawn(&mut self, board_width: usize) -> Piece {
        Piece::spawn(self.next_kind(), board_width)
    }
}
