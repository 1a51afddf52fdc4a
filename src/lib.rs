//! Frame-driven snake movement and growth simulation on a square grid.
//!
//! The crate owns the simulation only: a chain of positioned, oriented
//! segments, a heading, a speed ramp, and a hunger clock. Rendering,
//! input mapping, and audio are collaborators that consume the events
//! returned by [`snake::Snake::tick`] and read segment data directly.

#[macro_use]
extern crate derive_more;

pub mod basic;
pub mod error;
pub mod rabbit;
pub mod snake;

pub use basic::{Axis, Board, Dir, Point, CELL_SIZE};
pub use rabbit::Rabbit;
pub use snake::{BodyVariant, DeathCause, Event, Segment, SegmentKind, Snake, State};
