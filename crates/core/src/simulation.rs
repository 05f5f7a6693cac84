//! Simulation - terrain plus the roster of automata living on it.

use arrayvec::ArrayVec;
use rand::Rng;
use tracing::info;

use crate::automata::{Automaton, Entity};
use crate::rng::{seeded, SimRng};
use crate::terrain::TerrainGrid;
use crate::types::{default_roster, Bounds, GlyphIndex, Position, Roster, MAX_ROSTER};

/// Primary simulation object.
///
/// Owns the terrain grid and the live entities. Entities are advanced and
/// drawn in roster order, so a later entity covers an earlier one sharing
/// its cell.
#[derive(Debug, Clone)]
pub struct Simulation {
    rng: SimRng,
    roster: Roster,
    terrain: TerrainGrid,
    entities: ArrayVec<Entity, MAX_ROSTER>,
}

impl Simulation {
    /// Create an empty simulation with the default roster.
    ///
    /// No map exists until [`Simulation::create_map`] is called.
    pub fn new(seed: u64) -> Self {
        Self::with_roster(seed, default_roster())
    }

    pub fn with_roster(seed: u64, roster: Roster) -> Self {
        Self {
            rng: seeded(seed),
            roster,
            terrain: TerrainGrid::default(),
            entities: ArrayVec::new(),
        }
    }

    /// Generate a new map and respawn the roster at random cells on it.
    ///
    /// A zero-area map has nowhere to place entities, so the roster stays
    /// empty until the next non-empty map.
    pub fn create_map(&mut self, height: usize, width: usize) {
        self.terrain = TerrainGrid::generate(height, width, &mut self.rng);
        self.entities.clear();

        if self.terrain.is_empty() {
            info!(height, width, "generated empty map");
            return;
        }

        for kind in self.roster.iter().copied() {
            let pos = Position::new(
                self.rng.gen_range(0..height) as i32,
                self.rng.gen_range(0..width) as i32,
            );
            self.entities.push(Entity::spawn(kind, pos, &mut self.rng));
        }
        info!(height, width, entities = self.entities.len(), "generated map");
    }

    /// Run the simulation for one time slice of `elapsed_ms` milliseconds.
    pub fn update(&mut self, elapsed_ms: f64) {
        let bounds = self.terrain.bounds();
        for entity in self.entities.iter_mut() {
            entity.advance(elapsed_ms, bounds);
        }
    }

    /// Terrain with every entity's glyph laid on top.
    pub fn visible_grid(&self) -> Vec<GlyphIndex> {
        let mut out = Vec::with_capacity(self.terrain.cells().len());
        self.visible_grid_into(&mut out);
        out
    }

    /// Like [`Simulation::visible_grid`], reusing `out`'s allocation.
    pub fn visible_grid_into(&self, out: &mut Vec<GlyphIndex>) {
        out.clear();
        out.extend_from_slice(self.terrain.cells());

        let bounds = self.terrain.bounds();
        for entity in &self.entities {
            if let Some(i) = bounds.index_of(entity.position()) {
                out[i] = entity.glyph();
            }
        }
    }

    /// Add an entity on top of the current roster.
    ///
    /// Returns `false` when the roster is already full. The entity is
    /// dropped on the next [`Simulation::create_map`].
    pub fn push_entity(&mut self, entity: Entity) -> bool {
        self.entities.try_push(entity).is_ok()
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    pub fn bounds(&self) -> Bounds {
        self.terrain.bounds()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
