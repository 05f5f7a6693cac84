//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the timing discipline and the simulation itself. It
//! has **no dependencies** on the terminal or on input handling, which makes
//! it:
//!
//! - **Deterministic**: the same seed produces the same map and the same
//!   entity paths for the same sequence of time slices
//! - **Testable**: time is injected through [`clock::TimeSource`], randomness
//!   through a seeded [`rng::SimRng`]
//! - **Portable**: runs headless as readily as behind a terminal
//!
//! # Module Structure
//!
//! - [`clock`]: fixed-rate frame clock with blown-frame accounting
//! - [`terrain`]: weighted-random terrain grid of glyph indices
//! - [`automata`]: Wanderer, Zipper and Bouncer movement policies
//! - [`simulation`]: terrain + roster, per-tick update, visible grid
//! - [`rng`]: seeded generator helpers
//!
//! # Example
//!
//! ```
//! use terra_core::Simulation;
//!
//! let mut sim = Simulation::new(12345);
//! sim.create_map(20, 40);
//!
//! // One 30 Hz frame's worth of time.
//! sim.update(33.3);
//!
//! let visible = sim.visible_grid();
//! assert_eq!(visible.len(), 20 * 40);
//! ```
//!
//! # Timing
//!
//! [`FrameClock`] paces the loop at [`types::TARGET_FPS`]. Each tick yields a
//! [`FrameData`] whose [`FrameData::delta_ms`] is fed to
//! [`Simulation::update`].

pub mod automata;
pub mod clock;
pub mod rng;
pub mod simulation;
pub mod terrain;

pub use terra_types as types;

// Re-export commonly used types for convenience
pub use automata::{Automaton, Axis, Bouncer, Entity, Wanderer, Zipper};
pub use clock::{FrameClock, FrameData, FrameTick, ManualTime, MonotonicTime, TimeSource};
pub use rng::SimRng;
pub use simulation::Simulation;
pub use terrain::TerrainGrid;
