use rand::Rng;

use crate::basic::Point;
use crate::error::{Error, ErrorType, Result};
use crate::rabbit::Rabbit;
use crate::snake::Snake;

/// The discrete playfield: pixel bounds quantized to a square cell grid
#[derive(Copy, Clone, Debug)]
pub struct Board {
    width: isize,
    height: isize,
    cell_size: isize,
}

impl Board {
    /// Fails unless width and height are positive multiples of a
    /// positive cell size
    pub fn new(width: isize, height: isize, cell_size: isize) -> Result<Self> {
        let valid = cell_size > 0
            && width > 0
            && height > 0
            && width % cell_size == 0
            && height % cell_size == 0;
        if !valid {
            return Err(Error::from(ErrorType::InvalidBoard { width, height, cell_size })
                .with_trace_step("Board::new"));
        }
        Ok(Self { width, height, cell_size })
    }

    pub fn width(&self) -> isize {
        self.width
    }

    pub fn height(&self) -> isize {
        self.height
    }

    pub fn cell_size(&self) -> isize {
        self.cell_size
    }

    pub fn cols(&self) -> isize {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> isize {
        self.height / self.cell_size
    }

    /// Half-open bounds check, [0, width) x [0, height)
    pub fn contains(&self, pos: Point) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Whether a position sits exactly on the cell grid
    pub fn on_grid(&self, pos: Point) -> bool {
        pos.x % self.cell_size == 0 && pos.y % self.cell_size == 0
    }

    fn cell_index(&self, pos: Point) -> usize {
        ((pos.y / self.cell_size) * self.cols() + pos.x / self.cell_size) as usize
    }

    fn cell_at(&self, index: usize) -> Point {
        Point {
            x: index as isize % self.cols() * self.cell_size,
            y: index as isize / self.cols() * self.cell_size,
        }
    }
}

pub fn get_occupied_cells(snake: &Snake, rabbits: &[Rabbit]) -> Vec<Point> {
    // upper bound
    let max_occupied_cells = snake.body.segments.len() + rabbits.len();
    let mut occupied_cells = Vec::with_capacity(max_occupied_cells);
    occupied_cells.extend(rabbits.iter().map(|rabbit| rabbit.pos));
    occupied_cells.extend(snake.body.segments.iter().map(|segment| segment.pos));
    occupied_cells.sort_unstable();
    occupied_cells.dedup();
    occupied_cells
}

pub fn random_free_spot(occupied_cells: &[Point], board: &Board, rng: &mut impl Rng) -> Option<Point> {
    let free_spaces = (board.cols() * board.rows()) as usize - occupied_cells.len();
    if free_spaces == 0 {
        return None;
    }

    // occupied_cells is sorted in row-major order so each occupied index
    // at or below the draw shifts it up by one
    let mut new_idx = rng.gen_range(0..free_spaces);
    for pos in occupied_cells {
        let idx = board.cell_index(*pos);
        if idx <= new_idx {
            new_idx += 1;
        }
    }

    assert!(new_idx < (board.cols() * board.rows()) as usize);
    Some(board.cell_at(new_idx))
}
