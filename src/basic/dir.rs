use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rand::Rng;
use Dir::*;

// defined in clockwise order starting at U
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    U = 0,
    R = 1,
    D = 2,
    L = 3,
}

impl From<u8> for Dir {
    fn from(num: u8) -> Self {
        // SAFETY: (num % 4) is between 0 and 3
        unsafe { std::mem::transmute(num % 4) }
    }
}

impl Neg for Dir {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self + 2
    }
}

impl Add<u8> for Dir {
    type Output = Self;

    fn add(self, rhs: u8) -> Self::Output {
        Self::from(self as u8 + rhs)
    }
}

impl AddAssign<u8> for Dir {
    fn add_assign(&mut self, rhs: u8) {
        *self = *self + rhs;
    }
}

impl Sub<u8> for Dir {
    type Output = Self;

    fn sub(self, rhs: u8) -> Self::Output {
        self + (4 - (rhs % 4))
    }
}

impl SubAssign<u8> for Dir {
    fn sub_assign(&mut self, rhs: u8) {
        *self = *self - rhs;
    }
}

// U is the smallest, directions get bigger clockwise, L is the largest
impl Ord for Dir {
    fn cmp(&self, other: &Self) -> Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl PartialOrd for Dir {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis {
    Vertical,   // |
    Horizontal, // -
}

impl Dir {
    pub fn axis(self) -> Axis {
        use Axis::*;

        match self {
            U | D => Vertical,
            L | R => Horizontal,
        }
    }

    /// Unit offset of one step in this direction, y grows downward
    pub fn offset(self) -> (isize, isize) {
        match self {
            U => (0, -1),
            R => (1, 0),
            D => (0, 1),
            L => (-1, 0),
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::from(rng.gen_range(0..4u8))
    }
}

#[test]
fn test_dir_math() {
    let test_plus = [(U, 1, R), (U, 2, D), (R, 3, U), (D, 4, D)];

    for &(start, add, expect) in &test_plus {
        assert_eq!(start + add, expect);
    }

    let test_minus = [(U, 1, L), (U, 2, D), (R, 3, D), (D, 4, D)];

    for &(start, sub, expect) in &test_minus {
        assert_eq!(start - sub, expect);
    }
}

#[test]
fn test_opposites() {
    for (dir, opposite) in [(U, D), (R, L), (D, U), (L, R)] {
        assert_eq!(-dir, opposite);
        assert_eq!(-(-dir), dir);
    }
}
