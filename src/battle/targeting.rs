//! Attack range resolution.

use crate::battle::{TileSet, Unit};

/// Indices of living opponents inside `unit`'s attack band, in roster order.
pub fn targets_in_range<'a>(
    unit: &'a Unit,
    opponents: &'a [Unit],
) -> impl Iterator<Item = usize> + 'a {
    opponents
        .iter()
        .enumerate()
        .filter(move |(_, target)| target.is_alive() && unit.in_attack_range(unit.distance_to(target)))
        .map(|(index, _)| index)
}

/// Tiles `unit` may legally attack.
///
/// Only distance and liveness matter; there is no line-of-sight check.
#[must_use]
pub fn legal_targets(unit: &Unit, opponents: &[Unit]) -> TileSet {
    targets_in_range(unit, opponents)
        .map(|index| opponents[index].pos)
        .collect()
}
