use crate::basic::{Axis, Dir};

/// Visual shape of a body segment, corners are named by the pair of cell
/// edges the body passes through
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BodyVariant {
    Vertical,
    Horizontal,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl BodyVariant {
    pub fn straight(axis: Axis) -> Self {
        match axis {
            Axis::Vertical => Self::Vertical,
            Axis::Horizontal => Self::Horizontal,
        }
    }

    pub fn is_corner(self) -> bool {
        !matches!(self, Self::Vertical | Self::Horizontal)
    }
}

/// Resolve the shape of a body segment from the direction it was last
/// moving in (`coming`) and the direction it adopts from its predecessor
/// (`going`).
///
/// Reverse pairs never occur: the simulation rejects heading requests
/// opposite to the head's rendered direction, and every other segment
/// follows the path the head traced.
pub fn body_variant(coming: Dir, going: Dir) -> BodyVariant {
    use BodyVariant::*;
    use Dir::*;

    match (coming, going) {
        (U, U) | (D, D) => Vertical,
        (L, L) | (R, R) => Horizontal,
        (D, R) | (L, U) => TopRight,
        (U, R) | (L, D) => BottomRight,
        (U, L) | (R, D) => BottomLeft,
        (D, L) | (R, U) => TopLeft,
        _ => unreachable!("segment reversed: {:?} -> {:?}", coming, going),
    }
}

#[test]
fn test_body_variant_table() {
    use BodyVariant::*;
    use Dir::*;

    for (coming, going, variant) in [
        (U, U, Vertical),
        (D, D, Vertical),
        (L, L, Horizontal),
        (R, R, Horizontal),
        (D, R, TopRight),
        (L, U, TopRight),
        (U, R, BottomRight),
        (L, D, BottomRight),
        (U, L, BottomLeft),
        (R, D, BottomLeft),
        (D, L, TopLeft),
        (R, U, TopLeft),
    ] {
        assert_eq!(
            body_variant(coming, going),
            variant,
            "{:?} -> {:?}",
            coming,
            going
        );
    }
}

#[test]
fn test_corner_classification() {
    use BodyVariant::*;

    assert!(!Vertical.is_corner());
    assert!(!Horizontal.is_corner());
    for corner in [TopRight, BottomRight, BottomLeft, TopLeft] {
        assert!(corner.is_corner());
    }
}
