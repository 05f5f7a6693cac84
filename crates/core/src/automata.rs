//! Movement automata - autonomous per-entity motion policies.
//!
//! Every automaton accumulates elapsed time and acts once its energy crosses
//! a velocity threshold. They share the [`Direction`] vocabulary and the
//! [`Bounds::contains`] test, and differ in how they choose a direction and
//! how they react to a candidate cell outside the grid:
//!
//! | Automaton | Direction choice | Out-of-bounds candidate |
//! |-----------|------------------|-------------------------|
//! | [`Wanderer`] | uniform random every step | discarded, stays put |
//! | [`Zipper`] | persisted, re-rolled every [`ZIPPER_SHIFT_MS`] | heading reversed |
//! | [`Bouncer`] | one persisted direction per axis, axes alternate | that axis reversed |

use crate::rng::{pick_direction, SimRng};
use crate::types::{
    Bounds, Direction, EntityKind, GlyphIndex, Position, BOUNCER_VELOCITY_MS, GLYPH_BOUNCER,
    GLYPH_WANDERER, WANDERER_VELOCITY_MS, ZIPPER_SHIFT_MS, ZIPPER_VELOCITY_MS,
};

/// Shared capability of all movement automata.
pub trait Automaton {
    /// Advance internal timers by `elapsed_ms` and possibly move within `bounds`.
    fn advance(&mut self, elapsed_ms: f64, bounds: Bounds);

    fn position(&self) -> Position;

    /// Glyph to draw at [`Automaton::position`].
    fn glyph(&self) -> GlyphIndex;
}

/// Steps in a random direction at a steady cadence, ignoring moves that
/// would leave the grid.
#[derive(Debug, Clone)]
pub struct Wanderer {
    pos: Position,
    energy: f64,
    rng: SimRng,
}

impl Wanderer {
    pub fn new(pos: Position, rng: SimRng) -> Self {
        Self {
            pos,
            energy: 0.0,
            rng,
        }
    }
}

impl Automaton for Wanderer {
    fn advance(&mut self, elapsed_ms: f64, bounds: Bounds) {
        self.energy += elapsed_ms;
        if self.energy > WANDERER_VELOCITY_MS {
            let candidate = self.pos.step(pick_direction(&mut self.rng));
            if bounds.contains(candidate) {
                self.pos = candidate;
            }
            self.energy = 0.0;
        }
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn glyph(&self) -> GlyphIndex {
        GLYPH_WANDERER
    }
}

/// Dashes along a heading, turning around at edges and picking a fresh
/// heading at random once its attention runs out.
#[derive(Debug, Clone)]
pub struct Zipper {
    pos: Position,
    energy: f64,
    attention: f64,
    direction: Direction,
    rng: SimRng,
}

impl Zipper {
    pub fn new(pos: Position, rng: SimRng) -> Self {
        Self {
            pos,
            energy: 0.0,
            attention: 0.0,
            direction: Direction::Right,
            rng,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Automaton for Zipper {
    fn advance(&mut self, elapsed_ms: f64, bounds: Bounds) {
        self.energy += elapsed_ms;
        self.attention += elapsed_ms;

        if self.energy > ZIPPER_VELOCITY_MS {
            self.energy = 0.0;
            let candidate = self.pos.step(self.direction);
            if bounds.contains(candidate) {
                self.pos = candidate;
            } else {
                self.direction = self.direction.reverse();
            }
        }

        if self.attention > ZIPPER_SHIFT_MS {
            self.attention = 0.0;
            self.direction = pick_direction(&mut self.rng);
        }
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn glyph(&self) -> GlyphIndex {
        match self.direction {
            Direction::Right => 0x1A,
            Direction::Up => 0x18,
            Direction::Left => 0x1B,
            Direction::Down => 0x19,
        }
    }
}

/// The axis a [`Bouncer`] moves along on its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Y,
    X,
}

impl Axis {
    pub fn other(&self) -> Self {
        match self {
            Axis::Y => Axis::X,
            Axis::X => Axis::Y,
        }
    }
}

/// Moves diagonally one axis at a time, reflecting off the grid edges.
///
/// Each threshold crossing acts on the axis whose turn it is, then hands
/// the turn to the other axis. Hitting an edge reverses that axis instead
/// of moving; the turn still passes, so a reflection costs that axis its
/// step.
#[derive(Debug, Clone)]
pub struct Bouncer {
    pos: Position,
    energy: f64,
    y_direction: Direction,
    x_direction: Direction,
    turn: Axis,
}

impl Bouncer {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            energy: 0.0,
            y_direction: Direction::Up,
            x_direction: Direction::Right,
            turn: Axis::Y,
        }
    }

    pub fn with_directions(mut self, y_direction: Direction, x_direction: Direction) -> Self {
        self.y_direction = y_direction;
        self.x_direction = x_direction;
        self
    }

    pub fn y_direction(&self) -> Direction {
        self.y_direction
    }

    pub fn x_direction(&self) -> Direction {
        self.x_direction
    }

    pub fn turn(&self) -> Axis {
        self.turn
    }
}

impl Automaton for Bouncer {
    fn advance(&mut self, elapsed_ms: f64, bounds: Bounds) {
        self.energy += elapsed_ms;
        if self.energy <= BOUNCER_VELOCITY_MS {
            return;
        }
        self.energy = 0.0;

        let heading = match self.turn {
            Axis::Y => self.y_direction,
            Axis::X => self.x_direction,
        };
        let candidate = self.pos.step(heading);
        if !bounds.row_in_bounds(candidate.y) {
            self.y_direction = self.y_direction.reverse();
        } else if !bounds.col_in_bounds(candidate.x) {
            self.x_direction = self.x_direction.reverse();
        } else {
            self.pos = candidate;
        }
        self.turn = self.turn.other();
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn glyph(&self) -> GlyphIndex {
        GLYPH_BOUNCER
    }
}

/// A simulated entity: one of the movement automata.
#[derive(Debug, Clone)]
pub enum Entity {
    Wanderer(Wanderer),
    Zipper(Zipper),
    Bouncer(Bouncer),
}

impl Entity {
    /// Create an entity of `kind` at `pos`.
    ///
    /// Automata that need randomness get a generator forked from `rng`.
    pub fn spawn(kind: EntityKind, pos: Position, rng: &mut SimRng) -> Self {
        match kind {
            EntityKind::Wanderer => Entity::Wanderer(Wanderer::new(pos, crate::rng::fork(rng))),
            EntityKind::Zipper => Entity::Zipper(Zipper::new(pos, crate::rng::fork(rng))),
            EntityKind::Bouncer => Entity::Bouncer(Bouncer::new(pos)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Wanderer(_) => EntityKind::Wanderer,
            Entity::Zipper(_) => EntityKind::Zipper,
            Entity::Bouncer(_) => EntityKind::Bouncer,
        }
    }
}

impl Automaton for Entity {
    fn advance(&mut self, elapsed_ms: f64, bounds: Bounds) {
        match self {
            Entity::Wanderer(e) => e.advance(elapsed_ms, bounds),
            Entity::Zipper(e) => e.advance(elapsed_ms, bounds),
            Entity::Bouncer(e) => e.advance(elapsed_ms, bounds),
        }
    }

    fn position(&self) -> Position {
        match self {
            Entity::Wanderer(e) => e.position(),
            Entity::Zipper(e) => e.position(),
            Entity::Bouncer(e) => e.position(),
        }
    }

    fn glyph(&self) -> GlyphIndex {
        match self {
            Entity::Wanderer(e) => e.glyph(),
            Entity::Zipper(e) => e.glyph(),
            Entity::Bouncer(e) => e.glyph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    const BOUNDS: Bounds = Bounds::new(5, 5);

    #[test]
    fn bouncer_reflects_off_top_then_moves_right() {
        let mut b = Bouncer::new(Position::new(0, 0));
        assert_eq!(b.y_direction(), Direction::Up);
        assert_eq!(b.x_direction(), Direction::Right);
        assert_eq!(b.turn(), Axis::Y);

        b.advance(BOUNCER_VELOCITY_MS + 1.0, BOUNDS);
        assert_eq!(b.y_direction(), Direction::Down);
        assert_eq!(b.position(), Position::new(0, 0));
        assert_eq!(b.turn(), Axis::X);

        b.advance(BOUNCER_VELOCITY_MS + 1.0, BOUNDS);
        assert_eq!(b.position(), Position::new(0, 1));
    }

    #[test]
    fn bouncer_alternates_axes_when_unobstructed() {
        let mut b = Bouncer::new(Position::new(2, 2)).with_directions(Direction::Down, Direction::Left);
        b.advance(101.0, BOUNDS);
        assert_eq!(b.position(), Position::new(3, 2));
        b.advance(101.0, BOUNDS);
        assert_eq!(b.position(), Position::new(3, 1));
        b.advance(101.0, BOUNDS);
        assert_eq!(b.position(), Position::new(4, 1));
    }

    #[test]
    fn bouncer_reflects_off_right_edge() {
        let mut b = Bouncer::new(Position::new(2, 4));
        b.advance(101.0, BOUNDS); // Y turn: up to row 1
        assert_eq!(b.position(), Position::new(1, 4));
        b.advance(101.0, BOUNDS); // X turn: column 5 is out
        assert_eq!(b.position(), Position::new(1, 4));
        assert_eq!(b.x_direction(), Direction::Left);
    }

    #[test]
    fn bouncer_waits_for_threshold() {
        let mut b = Bouncer::new(Position::new(2, 2));
        b.advance(60.0, BOUNDS);
        b.advance(40.0, BOUNDS);
        // Exactly at threshold is not over it.
        assert_eq!(b.position(), Position::new(2, 2));
        b.advance(1.0, BOUNDS);
        assert_eq!(b.position(), Position::new(1, 2));
    }

    #[test]
    fn zipper_reverses_at_right_edge() {
        let mut z = Zipper::new(Position::new(2, 4), seeded(1));
        assert_eq!(z.direction(), Direction::Right);

        z.advance(ZIPPER_VELOCITY_MS + 1.0, BOUNDS);
        assert_eq!(z.direction(), Direction::Left);
        assert_eq!(z.position(), Position::new(2, 4));

        z.advance(ZIPPER_VELOCITY_MS + 1.0, BOUNDS);
        assert_eq!(z.position(), Position::new(2, 3));
    }

    #[test]
    fn zipper_glyph_follows_direction() {
        let rng = seeded(1);
        let pos = Position::new(0, 0);
        assert_eq!(Zipper::new(pos, rng.clone()).glyph(), 0x1A);
        assert_eq!(Zipper::new(pos, rng.clone()).with_direction(Direction::Up).glyph(), 0x18);
        assert_eq!(Zipper::new(pos, rng.clone()).with_direction(Direction::Left).glyph(), 0x1B);
        assert_eq!(Zipper::new(pos, rng).with_direction(Direction::Down).glyph(), 0x19);
    }

    #[test]
    fn zipper_attention_rerolls_heading() {
        let big = Bounds::new(1000, 1000);
        let mut z = Zipper::new(Position::new(500, 500), seeded(21));
        let mut headings = Vec::new();
        for _ in 0..40 {
            // 25 * 41ms crosses the attention threshold exactly once.
            for _ in 0..25 {
                z.advance(41.0, big);
            }
            headings.push(z.direction());
        }
        headings.sort_by_key(|d| d.as_str());
        headings.dedup();
        assert!(headings.len() > 1, "heading never changed: {:?}", headings);
    }

    #[test]
    fn wanderer_waits_for_threshold() {
        let mut w = Wanderer::new(Position::new(2, 2), seeded(4));
        w.advance(WANDERER_VELOCITY_MS, BOUNDS);
        assert_eq!(w.position(), Position::new(2, 2));
        w.advance(1.0, BOUNDS);
        let p = w.position();
        let manhattan = (p.y - 2).abs() + (p.x - 2).abs();
        assert_eq!(manhattan, 1);
    }

    #[test]
    fn wanderer_on_single_cell_never_moves() {
        let mut w = Wanderer::new(Position::new(0, 0), seeded(4));
        for _ in 0..100 {
            w.advance(250.0, Bounds::new(1, 1));
        }
        assert_eq!(w.position(), Position::new(0, 0));
    }

    #[test]
    fn wanderer_discarded_step_still_spends_energy() {
        let single = Bounds::new(1, 1);
        let mut w = Wanderer::new(Position::new(0, 0), seeded(4));
        w.advance(250.0, single);
        assert_eq!(w.energy, 0.0);

        // Below threshold again, so no second step is attempted.
        w.advance(150.0, single);
        assert_eq!(w.energy, 150.0);
        assert_eq!(w.position(), Position::new(0, 0));
    }

    #[test]
    fn zipper_reversal_still_spends_energy() {
        let bounds = Bounds::new(1, 6);
        let mut z = Zipper::new(Position::new(0, 5), seeded(9)).with_direction(Direction::Right);
        z.advance(60.0, bounds);
        assert_eq!(z.energy, 0.0);
        assert_eq!(z.direction(), Direction::Left);

        z.advance(30.0, bounds);
        assert_eq!(z.energy, 30.0);
        assert_eq!(z.position(), Position::new(0, 5));
    }

    #[test]
    fn all_kinds_stay_in_bounds() {
        let mut rng = seeded(2024);
        for kind in [EntityKind::Wanderer, EntityKind::Zipper, EntityKind::Bouncer] {
            for (h, w) in [(1, 1), (1, 6), (6, 1), (3, 7), (10, 10)] {
                let bounds = Bounds::new(h, w);
                let pos = Position::new((h - 1) as i32, 0);
                let mut e = Entity::spawn(kind, pos, &mut rng);
                for step in 0..2000 {
                    e.advance(17.0 + (step % 13) as f64 * 11.0, bounds);
                    assert!(
                        bounds.contains(e.position()),
                        "{:?} escaped {}x{} at {:?}",
                        kind,
                        h,
                        w,
                        e.position()
                    );
                }
            }
        }
    }

    #[test]
    fn spawn_preserves_kind_and_position() {
        let mut rng = seeded(1);
        let pos = Position::new(3, 1);
        for kind in [EntityKind::Wanderer, EntityKind::Zipper, EntityKind::Bouncer] {
            let e = Entity::spawn(kind, pos, &mut rng);
            assert_eq!(e.kind(), kind);
            assert_eq!(e.position(), pos);
        }
        assert_eq!(Entity::spawn(EntityKind::Bouncer, pos, &mut rng).glyph(), GLYPH_BOUNCER);
        assert_eq!(Entity::spawn(EntityKind::Wanderer, pos, &mut rng).glyph(), GLYPH_WANDERER);
    }
}
