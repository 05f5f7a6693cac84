//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the sandbox.
//! All types are pure data with no I/O, so they can be shared by the
//! simulation, the terminal compositor, and the input layer alike.
//!
//! # Timing Constants
//!
//! Frame pacing is fixed; automata cadences are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_FPS` | 30 | Frame clock pacing rate |
//! | `MAX_DELTA_SECS` | 1.0 | Upper bound on a single frame's delta |
//! | `WANDERER_VELOCITY_MS` | 200 | Wanderer step cadence |
//! | `ZIPPER_VELOCITY_MS` | 50 | Zipper step cadence |
//! | `ZIPPER_SHIFT_MS` | 1000 | Zipper direction reassignment cadence |
//! | `BOUNCER_VELOCITY_MS` | 100 | Bouncer step cadence |
//!
//! # Glyph Indices
//!
//! Terrain and entities are stored as [`GlyphIndex`] values, i.e. indices
//! into the 256-entry code page 437 table owned by the terminal layer.
//! Because the index type is `u8`, every index is a valid table entry.
//!
//! # Examples
//!
//! ```
//! use terra_types::{Bounds, Direction, Position};
//!
//! let bounds = Bounds::new(5, 5);
//! let origin = Position::new(0, 0);
//!
//! assert!(!bounds.contains(origin.step(Direction::Up)));
//! assert!(bounds.contains(origin.step(Direction::Right)));
//! assert_eq!(Direction::Up.reverse(), Direction::Down);
//! ```

use arrayvec::ArrayVec;

/// Frame clock pacing rate in frames per second.
pub const TARGET_FPS: u32 = 30;

/// A single frame's delta time never exceeds this many seconds.
pub const MAX_DELTA_SECS: f64 = 1.0;

/// Wanderer takes one step whenever its energy exceeds this many ms.
pub const WANDERER_VELOCITY_MS: f64 = 200.0;

/// Zipper takes one step whenever its energy exceeds this many ms.
pub const ZIPPER_VELOCITY_MS: f64 = 50.0;

/// Zipper picks a new heading whenever its attention exceeds this many ms.
pub const ZIPPER_SHIFT_MS: f64 = 1000.0;

/// Bouncer takes one step (or bounces) whenever its energy exceeds this many ms.
pub const BOUNCER_VELOCITY_MS: f64 = 100.0;

/// Index into the code page glyph table.
pub type GlyphIndex = u8;

/// Blank terrain glyph (space).
pub const GLYPH_EMPTY: GlyphIndex = 0x20;

/// Wanderer glyph (`@`).
pub const GLYPH_WANDERER: GlyphIndex = 0x40;

/// Bouncer glyph (`Φ`).
pub const GLYPH_BOUNCER: GlyphIndex = 0xE8;

/// Terrain alphabet: blank ground followed by decorative scrub.
pub const TERRAIN_GLYPHS: [GlyphIndex; 7] = [GLYPH_EMPTY, 0x05, 0x06, 0x27, 0x2C, 0x3A, 0x3B];

/// Selection weights for [`TERRAIN_GLYPHS`], index for index.
pub const TERRAIN_WEIGHTS: [u32; 7] = [70, 5, 5, 5, 5, 5, 5];

/// Maximum number of entities a simulation roster can hold.
pub const MAX_ROSTER: usize = 16;

/// Cardinal movement directions shared by all automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    /// All four directions, in the order used for uniform random picks.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// The opposite direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use terra_types::Direction;
    ///
    /// for dir in Direction::ALL {
    ///     assert_eq!(dir.reverse().reverse(), dir);
    /// }
    /// assert_eq!(Direction::Right.reverse(), Direction::Left);
    /// ```
    pub fn reverse(&self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
        }
    }

    /// Row/column offset `(dy, dx)` of one step in this direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
        }
    }
}

/// Grid position in `(y, x)` order.
///
/// Signed so that a candidate one step past an edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub y: i32,
    pub x: i32,
}

impl Position {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Candidate position one step away in `dir`.
    pub fn step(&self, dir: Direction) -> Self {
        let (dy, dx) = dir.offset();
        Self {
            y: self.y + dy,
            x: self.x + dx,
        }
    }
}

/// Grid extents used for bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub height: usize,
    pub width: usize,
}

impl Bounds {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    pub fn row_in_bounds(&self, y: i32) -> bool {
        y >= 0 && (y as usize) < self.height
    }

    pub fn col_in_bounds(&self, x: i32) -> bool {
        x >= 0 && (x as usize) < self.width
    }

    /// Whether `pos` lies inside `[0, height) x [0, width)`.
    pub fn contains(&self, pos: Position) -> bool {
        self.row_in_bounds(pos.y) && self.col_in_bounds(pos.x)
    }

    /// Flat row-major index of an in-bounds position.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }
}

/// The automaton variants a simulation roster can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Wanderer,
    Zipper,
    Bouncer,
}

impl EntityKind {
    /// Parse an entity kind (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use terra_types::EntityKind;
    ///
    /// assert_eq!(EntityKind::from_str("Zipper"), Some(EntityKind::Zipper));
    /// assert_eq!(EntityKind::from_str("dragon"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wanderer" => Some(EntityKind::Wanderer),
            "zipper" => Some(EntityKind::Zipper),
            "bouncer" => Some(EntityKind::Bouncer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Wanderer => "wanderer",
            EntityKind::Zipper => "zipper",
            EntityKind::Bouncer => "bouncer",
        }
    }
}

/// Ordered list of entity kinds spawned on every new map.
///
/// Order matters: later entities are drawn over earlier ones.
pub type Roster = ArrayVec<EntityKind, MAX_ROSTER>;

/// The full sandbox roster: one of each automaton.
pub fn default_roster() -> Roster {
    let mut roster = Roster::new();
    roster.push(EntityKind::Wanderer);
    roster.push(EntityKind::Zipper);
    roster.push(EntityKind::Bouncer);
    roster
}

/// Scene commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Regenerate the terrain and respawn the roster
    GenerateMap,
    /// Stop the main loop
    Quit,
    /// Show/hide the code page panel
    ToggleCodePage,
    /// Show/hide the echo panel
    ToggleEcho,
    /// Write a character into the echo panel
    Echo(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_weights_favor_blank_ground() {
        assert_eq!(TERRAIN_GLYPHS.len(), TERRAIN_WEIGHTS.len());
        assert_eq!(TERRAIN_GLYPHS[0], GLYPH_EMPTY);
        let total: u32 = TERRAIN_WEIGHTS.iter().sum();
        assert_eq!(total, 100);
        assert!(TERRAIN_WEIGHTS[1..].iter().all(|&w| w == 5));
    }

    #[test]
    fn direction_offsets_cancel_with_reverse() {
        for dir in Direction::ALL {
            let (dy, dx) = dir.offset();
            let (ry, rx) = dir.reverse().offset();
            assert_eq!((dy + ry, dx + rx), (0, 0));
        }
    }

    #[test]
    fn bounds_reject_negative_and_past_edge() {
        let b = Bounds::new(3, 4);
        assert!(b.contains(Position::new(0, 0)));
        assert!(b.contains(Position::new(2, 3)));
        assert!(!b.contains(Position::new(-1, 0)));
        assert!(!b.contains(Position::new(0, -1)));
        assert!(!b.contains(Position::new(3, 0)));
        assert!(!b.contains(Position::new(0, 4)));
    }

    #[test]
    fn bounds_index_is_row_major() {
        let b = Bounds::new(3, 4);
        assert_eq!(b.index_of(Position::new(0, 0)), Some(0));
        assert_eq!(b.index_of(Position::new(1, 2)), Some(6));
        assert_eq!(b.index_of(Position::new(2, 3)), Some(11));
        assert_eq!(b.index_of(Position::new(3, 0)), None);
    }

    #[test]
    fn empty_bounds_contain_nothing() {
        let b = Bounds::new(0, 0);
        assert_eq!(b.area(), 0);
        assert!(!b.contains(Position::new(0, 0)));
    }

    #[test]
    fn default_roster_has_one_of_each() {
        let roster = default_roster();
        assert_eq!(
            roster.as_slice(),
            &[EntityKind::Wanderer, EntityKind::Zipper, EntityKind::Bouncer]
        );
    }
}
