use rand::Rng;

use crate::basic::board::{get_occupied_cells, random_free_spot};
use crate::basic::{Board, Point};
use crate::snake::Snake;

/// A rabbit sits on one cell until the snake's head lands on it. The
/// simulation only reads the position and flips `consumed`; respawning
/// is the spawner's job, after the tick that consumed it.
#[derive(Copy, Clone, Debug)]
pub struct Rabbit {
    pub pos: Point,
    pub consumed: bool,
}

impl Rabbit {
    pub fn at(pos: Point) -> Self {
        Self { pos, consumed: false }
    }

    /// Spawn on a uniformly random cell not covered by the snake.
    /// `None` when the board is full.
    pub fn spawn(board: &Board, snake: &Snake, rng: &mut impl Rng) -> Option<Self> {
        let occupied_cells = get_occupied_cells(snake, &[]);
        random_free_spot(&occupied_cells, board, rng).map(Self::at)
    }

    /// Consumed rabbits are relocated rather than recreated, never onto
    /// the snake or their own cell. Returns false and leaves the rabbit
    /// consumed when the board is full.
    pub fn relocate(&mut self, board: &Board, snake: &Snake, rng: &mut impl Rng) -> bool {
        let occupied_cells = get_occupied_cells(snake, std::slice::from_ref(self));
        match random_free_spot(&occupied_cells, board, rng) {
            Some(pos) => {
                self.pos = pos;
                self.consumed = false;
                true
            }
            None => false,
        }
    }
}
