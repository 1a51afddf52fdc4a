use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use static_assertions::const_assert;

use super::*;
use crate::basic::{Board, Dir, Point};
use crate::snake::eat::EatEffects;

/// Cells per second the snake cruises at without the accelerate input
pub const DEFAULT_SPEED_MIN: f32 = 4.3;
/// Cells per second at full acceleration, one cell per 60fps frame
pub const DEFAULT_SPEED_MAX: f32 = 60.0;

const_assert!(DEFAULT_SPEED_MIN > 0.);
const_assert!(DEFAULT_SPEED_MIN <= DEFAULT_SPEED_MAX);

#[derive(Debug, Error)]
#[must_use]
pub struct BuilderError(pub Box<Builder>, pub &'static str);

impl Display for BuilderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "snake builder error: {}", self.1)?;
        writeln!(f, "builder: {:?}", self.0)
    }
}

#[derive(Default, Clone, Debug)]
pub struct Builder {
    pub board: Option<Board>,
    pub pos: Option<Point>,
    pub dir: Option<Dir>,
    pub speed_min: Option<f32>,
    pub speed_max: Option<f32>,
    pub eat_effects: Option<EatEffects>,
}

impl Builder {
    #[inline(always)]
    #[must_use]
    pub fn board(mut self, value: Board) -> Self {
        self.board = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn pos(mut self, value: Point) -> Self {
        self.pos = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn dir(mut self, value: Dir) -> Self {
        self.dir = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn speed_min(mut self, value: f32) -> Self {
        self.speed_min = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn speed_max(mut self, value: f32) -> Self {
        self.speed_max = Some(value);
        self
    }

    #[inline(always)]
    #[must_use]
    pub fn eat_effects(mut self, value: EatEffects) -> Self {
        self.eat_effects = Some(value);
        self
    }

    /// Build a living snake with the initial two-segment chain, the tail
    /// one cell behind the head
    pub fn build(&self) -> Result<Snake, BuilderError> {
        let board = self
            .board
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `board`"))?;
        let pos = self
            .pos
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `pos`"))?;
        let dir = self
            .dir
            .ok_or_else(|| BuilderError(Box::new(self.clone()), "missing field `dir`"))?;

        if !board.on_grid(pos) {
            return Err(BuilderError(
                Box::new(self.clone()),
                "head position is not on the cell grid",
            ));
        }

        let tail_pos = pos.translate(-dir, 1, board.cell_size());
        if !board.contains(pos) || !board.contains(tail_pos) {
            return Err(BuilderError(
                Box::new(self.clone()),
                "initial chain does not fit on the board",
            ));
        }

        let speed_min = self.speed_min.unwrap_or(DEFAULT_SPEED_MIN);
        let speed_max = self.speed_max.unwrap_or(DEFAULT_SPEED_MAX);
        if speed_min <= 0. || speed_min > speed_max {
            return Err(BuilderError(
                Box::new(self.clone()),
                "speed bounds must satisfy 0 < speed_min <= speed_max",
            ));
        }

        let mut segments = VecDeque::new();
        segments.push_back(Segment { kind: SegmentKind::Head, pos, dir });
        segments.push_back(Segment {
            kind: SegmentKind::Tail,
            pos: tail_pos,
            dir,
        });

        Ok(Snake {
            board,
            body: Body {
                segments,
                dir,
                pending_dir: None,
            },
            state: State::Living,
            speed: speed_min,
            speed_min,
            speed_max,
            health: FULL_HEALTH,
            eat_effects: self.eat_effects.unwrap_or_else(EatEffects::health_only),
            cell_progress: 0.,
        })
    }
}
