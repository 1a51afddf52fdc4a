use std::collections::VecDeque;

use rand::Rng;

use crate::basic::{Board, Dir, Point};
use crate::rabbit::Rabbit;

pub use builder::{Builder, BuilderError};
pub use eat::EatEffects;
pub use variant::{body_variant, BodyVariant};

pub mod builder;
pub mod eat;
pub mod variant;

/// Health is reset to this on every eat
pub const FULL_HEALTH: f32 = 100.0;
/// Health lost per second of not eating
pub const HEALTH_DECAY_RATE: f32 = 5.0;
/// Speed ramp rate in cells per second squared
pub const ACCEL: f32 = 30.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum State {
    Living,
    Dead,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DeathCause {
    HitWall,
    HitSelf,
    Starved,
}

/// What happened during a tick, in order, for the rendering, audio, and
/// score collaborators
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event {
    Moved(Point),
    Grew,
    Ate,
    Died(DeathCause),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SegmentKind {
    Head,
    Body(BodyVariant),
    Tail,
}

#[derive(Copy, Clone, Debug)]
pub struct Segment {
    pub kind: SegmentKind,
    pub pos: Point,
    /// Direction this segment last moved in, for head and tail segments
    /// this is also the rendered facing
    pub dir: Dir,
}

#[derive(Debug)]
pub struct Body {
    /// Ordered head to tail: index 0 is the head, the last index the tail
    pub segments: VecDeque<Segment>,

    /// Direction the head moves in on the next whole-cell advance
    pub dir: Dir,

    /// Buffered direction request, input arrives between ticks and is
    /// only committed at the start of an advance
    pub pending_dir: Option<Dir>,
}

impl Body {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// True if any segment sits at `pos`, optionally ignoring the head
    /// (the head must be excluded when testing its own candidate cell)
    pub fn occupies(&self, pos: Point, excluding_head: bool) -> bool {
        self.segments
            .iter()
            .skip(excluding_head as usize)
            .any(|segment| segment.pos == pos)
    }

    /// Follow-the-leader: every segment except the head adopts the
    /// position and direction its predecessor held before this move.
    ///
    /// Iterates tail-to-head so each predecessor is read before it is
    /// overwritten. The head's direction must already be committed; its
    /// position is still the pre-move one and is written by the caller
    /// afterwards.
    fn propagate(&mut self) {
        for i in (1..self.segments.len()).rev() {
            let predecessor = self.segments[i - 1];
            let segment = &mut self.segments[i];
            let old_dir = segment.dir;
            segment.pos = predecessor.pos;
            segment.dir = predecessor.dir;
            if let SegmentKind::Body(_) = segment.kind {
                segment.kind = SegmentKind::Body(body_variant(old_dir, predecessor.dir));
            }
        }
    }

    /// Insert a new body segment immediately before the tail, at the
    /// tail's position, pointing the tail's way. The two coincide until
    /// the next advance spreads them apart.
    fn grow(&mut self) {
        let tail_idx = self.segments.len() - 1;
        let tail = self.segments[tail_idx];
        self.segments.insert(
            tail_idx,
            Segment {
                kind: SegmentKind::Body(BodyVariant::straight(tail.dir.axis())),
                pos: tail.pos,
                dir: tail.dir,
            },
        );
    }
}

#[derive(Debug)]
pub struct Snake {
    pub board: Board,
    pub body: Body,
    pub state: State,

    /// Current speed in cells per second
    pub speed: f32,
    pub speed_min: f32,
    pub speed_max: f32,

    pub health: f32,
    pub eat_effects: EatEffects,

    /// Fractional cells owed, carried between ticks so movement is
    /// frame-rate independent
    cell_progress: f64,
}

impl Snake {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn head(&self) -> &Segment {
        self.body.head()
    }

    /// Request a change of heading. Requests opposite to the head's
    /// current rendered direction are ignored, pressing the reverse key
    /// simply does nothing. The last accepted request wins and takes
    /// effect on the next whole-cell advance.
    pub fn request_dir(&mut self, new_dir: Dir) {
        if new_dir == -self.head().dir {
            return;
        }
        self.body.pending_dir = Some(new_dir);
    }

    /// Query for external rabbit placement, includes the head
    pub fn is_in_snake(&self, pos: Point) -> bool {
        self.body.occupies(pos, false)
    }

    /// Advance the whole simulation by `dt` seconds.
    ///
    /// One call per rendered frame; frame deltas are irregular, so cell
    /// advances are derived through the progress accumulator and every
    /// owed cell is stepped and collision-checked individually.
    pub fn tick(&mut self, dt: f64, accelerate: bool, rabbits: &mut [Rabbit]) -> Vec<Event> {
        let mut events = vec![];

        if self.state == State::Dead {
            self.cell_progress = 0.;
            return events;
        }

        self.ramp_speed(dt as f32, accelerate);

        self.health -= HEALTH_DECAY_RATE * dt as f32;
        if self.health <= 0. {
            self.health = 0.;
            self.state = State::Dead;
            events.push(Event::Died(DeathCause::Starved));
            return events;
        }

        self.cell_progress += self.speed as f64 * dt;
        let mut steps = self.cell_progress as u32;
        self.cell_progress -= steps as f64;

        // every cell needs its own collision check, so steps are not
        // collapsed into a single multi-cell move
        while steps > 0 {
            steps -= 1;

            match self.advance_one_cell() {
                Ok(()) => events.push(Event::Moved(self.head().pos)),
                Err(cause) => {
                    self.state = State::Dead;
                    events.push(Event::Died(cause));
                    return events;
                }
            }

            let head_pos = self.head().pos;
            for rabbit in rabbits.iter_mut() {
                if !rabbit.consumed && rabbit.pos == head_pos {
                    rabbit.consumed = true;
                    self.body.grow();
                    self.health = self.eat_effects.restore_health;
                    let effects = self.eat_effects;
                    effects.apply(&mut self.speed, &mut self.speed_min);
                    events.push(Event::Ate);
                    events.push(Event::Grew);
                }
            }
        }

        events
    }

    /// Move the head one cell along the committed heading and pull the
    /// rest of the chain after it. No mutation happens on failure.
    pub fn advance_one_cell(&mut self) -> Result<(), DeathCause> {
        if self.state == State::Dead {
            panic!("called advance_one_cell() on a dead snake");
        }

        if let Some(dir) = self.body.pending_dir.take() {
            // validated against the head's rendered direction when it was
            // requested, the head can't have turned since
            self.body.dir = dir;
        }

        let dir = self.body.dir;
        let candidate = self.head().pos.translate(dir, 1, self.board.cell_size());

        if !self.board.contains(candidate) {
            return Err(DeathCause::HitWall);
        }
        if self.body.occupies(candidate, true) {
            return Err(DeathCause::HitSelf);
        }

        // the head turns in place first, the chain follows the path it
        // traced, then the head commits to its new cell
        self.body.segments[0].dir = dir;
        self.body.propagate();
        self.body.segments[0].pos = candidate;

        Ok(())
    }

    /// Randomize the starting position by wandering for a number of
    /// steps, the way the game scrambles a freshly spawned snake.
    /// Blocked steps are skipped, not fatal.
    pub fn scramble(&mut self, steps: usize, rng: &mut impl Rng) {
        for _ in 0..steps {
            self.request_dir(Dir::random(rng));
            let _ = self.advance_one_cell();
        }
    }

    fn ramp_speed(&mut self, dt: f32, accelerate: bool) {
        let target = if accelerate { self.speed_max } else { self.speed_min };
        if self.speed < target {
            self.speed = (self.speed + ACCEL * dt).min(target);
        } else {
            self.speed = (self.speed - ACCEL * dt).max(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Dir::*;

    fn snake_at(board_side: isize, pos: Point, dir: Dir) -> Snake {
        Snake::builder()
            .board(Board::new(board_side, board_side, 16).unwrap())
            .pos(pos)
            .dir(dir)
            .build()
            .unwrap()
    }

    fn fixed_speed_snake(board_side: isize, pos: Point, dir: Dir, speed: f32) -> Snake {
        Snake::builder()
            .board(Board::new(board_side, board_side, 16).unwrap())
            .pos(pos)
            .dir(dir)
            .speed_min(speed)
            .speed_max(speed)
            .build()
            .unwrap()
    }

    fn assert_contiguous(snake: &Snake) {
        for (a, b) in snake.body.segments.iter().tuple_windows() {
            let dist = (a.pos.x - b.pos.x).abs() + (a.pos.y - b.pos.y).abs();
            assert_eq!(dist, 16, "{:?} and {:?} are not one cell apart", a.pos, b.pos);
        }
    }

    #[test]
    fn test_initial_chain() {
        let snake = snake_at(320, Point { x: 160, y: 16 }, D);
        assert_eq!(snake.body.len(), 2);
        assert_eq!(snake.head().pos, Point { x: 160, y: 16 });
        assert_eq!(snake.head().kind, SegmentKind::Head);
        // the tail trails one cell behind the head
        assert_eq!(snake.body.tail().pos, Point { x: 160, y: 0 });
        assert_eq!(snake.body.tail().kind, SegmentKind::Tail);
        assert_eq!(snake.state, State::Living);
        assert_eq!(snake.health, FULL_HEALTH);
    }

    #[test]
    fn test_reverse_request_is_noop() {
        let mut snake = snake_at(320, Point { x: 160, y: 16 }, D);
        snake.request_dir(U);
        assert_eq!(snake.body.pending_dir, None);
        assert_eq!(snake.body.dir, D);

        snake.advance_one_cell().unwrap();
        assert_eq!(snake.head().pos, Point { x: 160, y: 32 });
    }

    #[test]
    fn test_turn_moves_head_one_cell() {
        let mut snake = snake_at(320, Point { x: 160, y: 16 }, D);
        snake.request_dir(R);
        snake.advance_one_cell().unwrap();

        assert_eq!(snake.head().pos, Point { x: 176, y: 16 });
        assert_eq!(snake.head().dir, R);
        assert_eq!(snake.body.len(), 2);
        assert_eq!(snake.state, State::Living);
        // the tail stepped into the head's old cell, facing the new way
        assert_eq!(snake.body.tail().pos, Point { x: 160, y: 16 });
        assert_eq!(snake.body.tail().dir, R);
    }

    #[test]
    fn test_last_request_wins() {
        let mut snake = snake_at(320, Point { x: 160, y: 160 }, R);
        snake.request_dir(U);
        snake.request_dir(D);
        snake.advance_one_cell().unwrap();
        assert_eq!(snake.head().pos, Point { x: 160, y: 176 });
    }

    #[test]
    fn test_buffered_request_cannot_reverse() {
        let mut snake = snake_at(320, Point { x: 160, y: 160 }, R);

        // a buffered turn doesn't open the door to a reverse: requests
        // are validated against the head's rendered direction, which
        // only changes when the buffered turn is actually taken
        snake.request_dir(U);
        snake.request_dir(L);
        assert_eq!(snake.body.pending_dir, Some(U));

        snake.advance_one_cell().unwrap();
        assert_eq!(snake.head().dir, U);
        assert_eq!(snake.head().pos, Point { x: 160, y: 144 });

        snake.request_dir(D);
        assert_eq!(snake.body.pending_dir, None);
        snake.advance_one_cell().unwrap();
        assert_eq!(snake.head().pos, Point { x: 160, y: 128 });
    }

    #[test]
    fn test_multi_cell_tick_eats_and_stops_at_wall() {
        // three cells owed in one tick, a rabbit one cell ahead and the
        // wall three: the events land in step order and the death ends
        // the tick
        let mut snake = fixed_speed_snake(160, Point { x: 112, y: 16 }, R, 30.);
        let mut rabbits = [Rabbit::at(Point { x: 128, y: 16 })];

        let events = snake.tick(0.1, false, &mut rabbits);
        assert_eq!(
            events,
            vec![
                Event::Moved(Point { x: 128, y: 16 }),
                Event::Ate,
                Event::Grew,
                Event::Moved(Point { x: 144, y: 16 }),
                Event::Died(DeathCause::HitWall),
            ]
        );
        assert_eq!(snake.state, State::Dead);
        assert_eq!(snake.body.len(), 3);
        assert_eq!(snake.health, FULL_HEALTH);
    }

    #[test]
    fn test_snake_is_debuggable() {
        let snake = snake_at(320, Point { x: 160, y: 16 }, D);
        let dump = format!("{:?}", snake);
        assert!(dump.contains("Living"));
        assert!(dump.contains("<160, 16>"));
    }

    #[test]
    fn test_corner_variants_through_a_turn() {
        let mut snake = snake_at(320, Point { x: 160, y: 160 }, R);
        snake.body.grow();
        snake.advance_one_cell().unwrap();
        snake.advance_one_cell().unwrap();

        snake.request_dir(D);
        snake.advance_one_cell().unwrap();
        // the neck sits on the corner cell, entered moving right,
        // exited moving down
        assert_eq!(
            snake.body.segments[1].kind,
            SegmentKind::Body(BodyVariant::BottomLeft)
        );

        snake.advance_one_cell().unwrap();
        // the corner has been passed on to the next segment,
        // the neck is straight again
        assert_eq!(
            snake.body.segments[1].kind,
            SegmentKind::Body(BodyVariant::Vertical)
        );
    }

    #[test]
    fn test_wall_collision() {
        let mut snake = snake_at(160, Point { x: 0, y: 16 }, L);
        assert_eq!(snake.advance_one_cell(), Err(DeathCause::HitWall));
        // failed advance leaves the snake untouched
        assert_eq!(snake.head().pos, Point { x: 0, y: 16 });
        assert_eq!(snake.state, State::Living);
    }

    #[test]
    fn test_wall_collision_through_tick() {
        let mut snake = fixed_speed_snake(160, Point { x: 0, y: 16 }, L, 10.);
        let events = snake.tick(0.1, false, &mut []);
        assert_eq!(events, vec![Event::Died(DeathCause::HitWall)]);
        assert_eq!(snake.state, State::Dead);

        // dead snakes only reset their accumulator
        let events = snake.tick(10.0, true, &mut []);
        assert!(events.is_empty());
        assert_eq!(snake.cell_progress, 0.);
        assert_eq!(snake.body.len(), 2);
    }

    #[test]
    fn test_self_collision() {
        let mut snake = snake_at(160, Point { x: 48, y: 48 }, R);
        for _ in 0..3 {
            snake.body.grow();
        }
        for _ in 0..3 {
            snake.advance_one_cell().unwrap();
        }

        snake.request_dir(D);
        snake.advance_one_cell().unwrap();
        snake.request_dir(L);
        snake.advance_one_cell().unwrap();
        snake.request_dir(U);
        assert_eq!(snake.advance_one_cell(), Err(DeathCause::HitSelf));
    }

    #[test]
    fn test_growth_on_eat() {
        let mut snake = fixed_speed_snake(160, Point { x: 16, y: 16 }, R, 10.);
        let mut rabbits = [Rabbit::at(Point { x: 32, y: 16 })];

        let events = snake.tick(0.1, false, &mut rabbits);
        assert_eq!(
            events,
            vec![Event::Moved(Point { x: 32, y: 16 }), Event::Ate, Event::Grew]
        );
        assert!(rabbits[0].consumed);
        assert_eq!(snake.body.len(), 3);
        assert_eq!(snake.health, FULL_HEALTH);

        // the new segment coincides with the tail, pointing its way
        let new = snake.body.segments[1];
        assert_eq!(new.pos, snake.body.tail().pos);
        assert_eq!(new.kind, SegmentKind::Body(BodyVariant::Horizontal));
    }

    #[test]
    fn test_chain_length_only_grows() {
        let mut snake = fixed_speed_snake(320, Point { x: 16, y: 160 }, R, 10.);
        let mut rabbits = [Rabbit::at(Point { x: 64, y: 160 })];

        let mut len = snake.body.len();
        let mut ate = 0;
        for _ in 0..20 {
            let events = snake.tick(0.05, false, &mut rabbits);
            ate += events.iter().filter(|e| **e == Event::Ate).count();
            assert!(snake.body.len() >= len);
            len = snake.body.len();
        }
        assert_eq!(ate, 1);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_chain_stays_contiguous() {
        let mut snake = snake_at(320, Point { x: 160, y: 160 }, R);
        snake.body.grow();
        snake.body.grow();
        for _ in 0..5 {
            snake.advance_one_cell().unwrap();
        }
        assert_contiguous(&snake);

        snake.request_dir(U);
        snake.advance_one_cell().unwrap();
        snake.request_dir(L);
        snake.advance_one_cell().unwrap();
        assert_contiguous(&snake);
    }

    #[test]
    fn test_accumulator_is_exact_for_binary_deltas() {
        // dt and speed chosen so every quantity is a dyadic rational and
        // float arithmetic is exact
        let mut many = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 16.);
        let mut one = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 16.);

        let mut moved_many = 0;
        for _ in 0..128 {
            moved_many += many.tick(1. / 128., false, &mut []).len();
        }
        let moved_one = one.tick(1.0, false, &mut []).len();

        assert_eq!(moved_many, 16);
        assert_eq!(moved_one, 16);
        assert_eq!(many.head().pos, one.head().pos);
    }

    #[test]
    fn test_accumulator_does_not_drift() {
        let mut many = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 10.);
        let mut one = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 10.);

        let mut moved_many = 0;
        for _ in 0..1000 {
            moved_many += many.tick(0.001, false, &mut []).len();
        }
        let moved_one = one.tick(1.0, false, &mut []).len();

        // rounding tolerance of one cell over the whole second
        assert!((moved_many as isize - moved_one as isize).abs() <= 1);
    }

    #[test]
    fn test_health_decays_monotonically() {
        let mut snake = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 5.);
        let mut last = snake.health;
        for _ in 0..10 {
            snake.tick(0.1, false, &mut []);
            assert!(snake.health < last);
            last = snake.health;
        }
        assert!((snake.health - (FULL_HEALTH - 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_starvation() {
        let mut snake = fixed_speed_snake(480, Point { x: 16, y: 240 }, R, 10.);
        let events = snake.tick(25.0, false, &mut []);
        assert_eq!(events, vec![Event::Died(DeathCause::Starved)]);
        assert_eq!(snake.health, 0.);
        assert_eq!(snake.state, State::Dead);
        // starvation is checked before movement, the snake died in place
        assert_eq!(snake.head().pos, Point { x: 16, y: 240 });
    }

    #[test]
    fn test_speed_ramp() {
        let mut snake = snake_at(480, Point { x: 16, y: 240 }, R);
        let cruise = snake.speed;
        assert_eq!(cruise, snake.speed_min);

        // a tick too short to move a cell still ramps the speed
        snake.tick(0.1, true, &mut []);
        assert!(snake.speed > cruise);
        assert!(snake.speed <= snake.speed_max);
        assert_eq!(snake.head().pos, Point { x: 16, y: 240 });

        // the ramp saturates at the maximum and decays back to the
        // cruise speed when the accelerate input is released
        snake.ramp_speed(5.0, true);
        assert_eq!(snake.speed, snake.speed_max);
        snake.ramp_speed(5.0, false);
        assert_eq!(snake.speed, snake.speed_min);
    }

    #[test]
    fn test_slowing_eat_effects() {
        let mut snake = Snake::builder()
            .board(Board::new(160, 160, 16).unwrap())
            .pos(Point { x: 16, y: 16 })
            .dir(R)
            .speed_min(10.)
            .speed_max(10.)
            .eat_effects(EatEffects::slowing(4., 3.))
            .build()
            .unwrap();
        let mut rabbits = [Rabbit::at(Point { x: 32, y: 16 })];

        snake.tick(0.1, false, &mut rabbits);
        assert_eq!(snake.speed_min, 6.);

        // the floor holds through repeated penalties
        rabbits[0] = Rabbit::at(Point { x: 48, y: 16 });
        snake.tick(0.2, false, &mut rabbits);
        rabbits[0] = Rabbit::at(Point { x: 64, y: 16 });
        snake.tick(0.3, false, &mut rabbits);
        assert_eq!(snake.speed_min, 3.);
    }

    #[test]
    fn test_scramble_never_kills() {
        let mut rng = StdRng::seed_from_u64(12345);
        for extra in 0..20 {
            let mut snake = snake_at(160, Point { x: 80, y: 16 }, D);
            snake.scramble(100 + extra, &mut rng);
            assert_eq!(snake.state, State::Living);
            assert!(snake.board.contains(snake.head().pos));
            assert!(!snake.body.occupies(snake.head().pos, true));
            assert_contiguous(&snake);
        }
    }
}
