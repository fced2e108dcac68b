//! Zobrist hashing of board positions
//!
//! Keys are drawn once per game session. A hash is the XOR of the keys of
//! every occupied cell, plus a key when player two is to move and a key when
//! player two is the side being searched for, so scores cached for one
//! perspective are never read back for the other.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    board::{Board, Player, Position},
    HEIGHT, WIDTH,
};

#[derive(Clone, Debug)]
pub struct Zobrist {
    cells: [[[u64; 2]; WIDTH]; HEIGHT],
    player_two_to_move: u64,
    player_two_maximizing: u64,
}

impl Zobrist {
    /// Draws a fresh key table, reproducible when `seed` is given
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut cells = [[[0u64; 2]; WIDTH]; HEIGHT];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                for key in cell.iter_mut() {
                    *key = rng.random();
                }
            }
        }

        Self {
            cells,
            player_two_to_move: rng.random(),
            player_two_maximizing: rng.random(),
        }
    }

    pub fn key(&self, position: Position, player: Player) -> u64 {
        self.cells[position.row][position.column][player.index()]
    }

    /// Full hash of `board` with `to_move` next, searched for `maximizer`
    pub fn hash(&self, board: &Board, to_move: Player, maximizer: Player) -> u64 {
        let mut hash = 0;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let position = Position::new(row, column);
                if let Some(owner) = board.get(position).owner() {
                    hash ^= self.key(position, owner);
                }
            }
        }
        if to_move == Player::Two {
            hash ^= self.player_two_to_move;
        }
        if maximizer == Player::Two {
            hash ^= self.player_two_maximizing;
        }
        hash
    }

    /// Hash after `player` drops a disc on `position`, also passing the turn
    pub fn update(&self, hash: u64, position: Position, player: Player) -> u64 {
        hash ^ self.key(position, player) ^ self.player_two_to_move
    }
}
