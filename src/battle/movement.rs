//! Movement reachability.
//!
//! Uniform-cost flood from the mover's tile, bounded by its movement
//! points. Living enemies block traversal; allies may be passed through but
//! not stopped on.

use std::collections::BTreeSet;

use pathfinding::prelude::dijkstra_reach;
use tracing::trace;

use crate::battle::{Board, Coord, Occupant, Unit};

/// A set of grid tiles.
pub type TileSet = BTreeSet<Coord>;

/// Compute the tiles `unit` may end its move on.
///
/// The unit's own tile is always included. Every other member is free of
/// living units at the time of the query.
///
/// # Panics
///
/// Debug builds panic when asked about a defeated unit.
#[must_use]
pub fn reachable(board: &Board<'_>, unit: &Unit) -> TileSet {
    debug_assert!(unit.is_alive(), "reachable() queried for defeated unit {}", unit.name);

    let size = board.size();
    let start = unit.pos;
    let (side, movement) = (unit.side, unit.movement);

    let successors = move |current: &Coord, cost: u32| {
        let (adjacent, count) = current.adjacent(size);
        let count = if cost < movement { usize::from(count) } else { 0 };
        adjacent
            .into_iter()
            .take(count)
            .filter(move |next| board.occupant(side, *next) != Occupant::Enemy)
            .map(|next| (next, 1))
    };

    // Allies are passable, so re-check who stands on each tile before stopping.
    let destinations: TileSet = dijkstra_reach(&start, successors)
        .map(|item| item.node)
        .filter(|tile| *tile == start || board.is_free(*tile))
        .collect();

    trace!(unit = %unit.name, from = %start, tiles = destinations.len(), "computed reachable set");
    destinations
}
