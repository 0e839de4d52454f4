//! Overworld terrain and deterministic tree scattering.

// Tree scattering compares an f64 draw against the density
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use crate::battle::{Coord, GridSize};

/// Kind of overworld tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Open ground.
    #[default]
    Grass,
    /// Impassable wall.
    Wall,
    /// Impassable tree.
    Tree,
}

impl Terrain {
    /// Check if units can stand on this terrain.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(self, Terrain::Grass)
    }
}

/// Row-major terrain grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainMap {
    size: GridSize,
    tiles: Vec<Terrain>,
}

impl TerrainMap {
    /// All-grass map of the given size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            tiles: vec![Terrain::Grass; size.area()],
        }
    }

    /// Map dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    fn index(&self, coord: Coord) -> Option<usize> {
        self.size
            .contains(coord)
            .then(|| usize::from(coord.y) * usize::from(self.size.width) + usize::from(coord.x))
    }

    /// Terrain at `coord`, or `None` off the map.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Terrain> {
        self.index(coord).map(|i| self.tiles[i])
    }

    /// Set the terrain at `coord`. Off-map coordinates are ignored.
    pub fn set(&mut self, coord: Coord, terrain: Terrain) {
        if let Some(i) = self.index(coord) {
            self.tiles[i] = terrain;
        }
    }

    /// Whether `coord` is on the map and passable.
    #[must_use]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Terrain::is_passable)
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Terrain)> + '_ {
        self.size.coords().zip(self.tiles.iter().copied())
    }

    /// Count tiles of one kind.
    #[must_use]
    pub fn count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| **t == terrain).count()
    }

    /// Lay a horizontal wall on row `y` from `x0` to `x1` inclusive.
    pub fn wall_row(&mut self, y: u16, x0: u16, x1: u16) {
        for x in x0..=x1 {
            self.set(Coord::new(x, y), Terrain::Wall);
        }
    }

    /// Scatter trees over grass at roughly `density`.
    ///
    /// Tiles within one step (Chebyshev) of any `spawn` stay clear so units
    /// are never boxed in. Identical seeds produce identical maps.
    pub fn scatter_trees(&mut self, seed: u64, density: f64, spawns: &[Coord]) {
        let mut rng = Rng::new(seed);
        let coords: Vec<Coord> = self.size.coords().collect();

        for coord in coords {
            // Draw for every tile so the layout does not shift when spawns move.
            let roll = rng.next_f64();
            if self.get(coord) != Some(Terrain::Grass) {
                continue;
            }
            if spawns.iter().any(|s| chebyshev(*s, coord) <= 1) {
                continue;
            }
            if roll < density {
                self.set(coord, Terrain::Tree);
            }
        }
    }
}

fn chebyshev(a: Coord, b: Coord) -> u16 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // xorshift never leaves the zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform draw in [0, 1).
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits fill the mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
