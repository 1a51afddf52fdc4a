pub use board::Board;
pub use dir::{Axis, Dir};
pub use point::Point;

pub mod board;
mod dir;
mod point;

use static_assertions::const_assert;

/// Default cell side length in pixel units; all positions the simulation
/// produces are multiples of the board's cell size.
pub const CELL_SIZE: isize = 16;

const_assert!(CELL_SIZE > 0);
