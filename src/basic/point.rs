use std::cmp::Ordering;
use std::fmt::{Debug, Error, Formatter};

use super::dir::Dir;

/// A pixel position on the board, always a multiple of the cell size
#[derive(Eq, PartialEq, Copy, Clone, Hash, Add, AddAssign, Sub, SubAssign)]
pub struct Point {
    pub x: isize,
    pub y: isize,
}

impl Point {
    #[must_use]
    pub fn translate(self, dir: Dir, dist: isize, cell_size: isize) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx * dist * cell_size,
            y: self.y + dy * dist * cell_size,
        }
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// row-major, matches the cell indexing used for free-spot search
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => self.x.cmp(&other.x),
            ord => ord,
        }
    }
}

#[test]
fn test_translate() {
    use Dir::*;

    let start = Point { x: 32, y: 48 };
    for (dir, dist, expect) in [
        (U, 1, Point { x: 32, y: 32 }),
        (R, 2, Point { x: 64, y: 48 }),
        (D, 1, Point { x: 32, y: 64 }),
        (L, 1, Point { x: 16, y: 48 }),
    ] {
        assert_eq!(start.translate(dir, dist, 16), expect);
    }
}
