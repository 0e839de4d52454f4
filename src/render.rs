//! Render-agnostic glyph model and plain-text renderers.
//!
//! Renderers never see internal handles: they consume [`Cell`]s built from
//! the read-only query surface of a session or the overworld.

use crate::battle::{BattleSession, Coord, GridSize, Side, Unit};
use crate::overworld::{Overworld, Terrain};

/// What occupies a tile, for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Open ground.
    Empty,
    /// Wall.
    Wall,
    /// Tree.
    Tree,
    /// A unit, living or fallen.
    Unit {
        /// Side the unit fights for.
        side: Side,
        /// Display symbol.
        symbol: char,
        /// Whether the unit has acted this round.
        acted: bool,
        /// Whether the unit still stands.
        alive: bool,
    },
}

impl Glyph {
    fn for_unit(unit: &Unit) -> Self {
        let initial = unit.name.chars().next().unwrap_or('?');
        let symbol = match unit.side {
            Side::Friendly => initial.to_ascii_uppercase(),
            Side::Enemy => initial.to_ascii_lowercase(),
        };
        Glyph::Unit {
            side: unit.side,
            symbol,
            acted: unit.has_acted,
            alive: unit.is_alive(),
        }
    }

    /// Single-character symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Glyph::Empty => '.',
            Glyph::Wall => '#',
            Glyph::Tree => 'T',
            Glyph::Unit { alive: false, .. } => 'x',
            Glyph::Unit { symbol, .. } => symbol,
        }
    }
}

/// One drawable tile with its overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Tile contents.
    pub glyph: Glyph,
    /// Part of the bound unit's reachable set.
    pub reachable: bool,
    /// Part of the bound unit's target set.
    pub target: bool,
    /// Under the cursor.
    pub cursor: bool,
}

impl Cell {
    const fn plain(glyph: Glyph) -> Self {
        Self {
            glyph,
            reachable: false,
            target: false,
            cursor: false,
        }
    }

    /// Three-character text form: brackets mark the cursor, angle brackets
    /// a target, `*` an empty reachable tile.
    #[must_use]
    pub fn text(&self) -> String {
        let (left, right) = if self.cursor {
            ('[', ']')
        } else if self.target {
            ('<', '>')
        } else {
            (' ', ' ')
        };
        let symbol = match self.glyph {
            Glyph::Empty if self.reachable => '*',
            glyph => glyph.symbol(),
        };
        format!("{left}{symbol}{right}")
    }
}

/// Row-major cells for a battle.
///
/// Living units are drawn over fallen ones sharing a tile.
#[must_use]
pub fn battle_cells(session: &BattleSession) -> Vec<Cell> {
    let size = session.size();
    let mut cells = vec![Cell::plain(Glyph::Empty); size.area()];

    let units = session.friendly().iter().chain(session.enemies());
    let (fallen, living): (Vec<&Unit>, Vec<&Unit>) = units.partition(|u| !u.is_alive());
    for unit in fallen.into_iter().chain(living) {
        if let Some(i) = index(size, unit.pos) {
            cells[i].glyph = Glyph::for_unit(unit);
        }
    }
    for coord in session.reachable() {
        if let Some(i) = index(size, *coord) {
            cells[i].reachable = true;
        }
    }
    for coord in session.targets() {
        if let Some(i) = index(size, *coord) {
            cells[i].target = true;
        }
    }
    if let Some(i) = index(size, session.cursor()) {
        cells[i].cursor = true;
    }
    cells
}

/// Row-major cells for the overworld. The hero is drawn as `@`.
#[must_use]
pub fn overworld_cells(world: &Overworld) -> Vec<Cell> {
    let size = world.size();
    let mut cells: Vec<Cell> = world
        .terrain()
        .iter()
        .map(|(_, terrain)| {
            Cell::plain(match terrain {
                Terrain::Grass => Glyph::Empty,
                Terrain::Wall => Glyph::Wall,
                Terrain::Tree => Glyph::Tree,
            })
        })
        .collect();

    for enemy in world.enemies().iter().filter(|e| e.is_alive()) {
        if let Some(i) = index(size, enemy.pos) {
            cells[i].glyph = Glyph::for_unit(enemy);
        }
    }
    let hero = world.hero();
    if let Some(i) = index(size, hero.pos) {
        cells[i].glyph = Glyph::Unit {
            side: Side::Friendly,
            symbol: '@',
            acted: false,
            alive: hero.is_alive(),
        };
    }
    cells
}

/// One status line per unit, friendly roster first.
#[must_use]
pub fn roster_lines(session: &BattleSession) -> Vec<String> {
    session
        .friendly()
        .iter()
        .chain(session.enemies())
        .map(|unit| {
            let state = if !unit.is_alive() {
                "down"
            } else if unit.has_acted {
                "done"
            } else {
                ""
            };
            format!(
                "{} {:<14} hp {:>2}/{:<2} {state}",
                Glyph::for_unit(unit).symbol(),
                unit.name,
                unit.hp(),
                unit.max_hp()
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Plain-text frame of a battle: grid, phase, rosters, message and log.
#[must_use]
pub fn render_battle_ascii(session: &BattleSession) -> String {
    let mut output = String::new();
    output.push_str(&format!("Round {} - {}\n", session.round(), session.phase().label()));
    render_grid(&mut output, session.size(), &battle_cells(session));

    for line in roster_lines(session) {
        output.push_str(&line);
        output.push('\n');
    }
    output.push('\n');
    output.push_str(session.message());
    output.push('\n');

    let log: Vec<&str> = session.log().collect();
    if !log.is_empty() {
        output.push_str("\nLog:\n");
        for line in log {
            output.push_str(&format!("  {line}\n"));
        }
    }
    output
}

/// Plain-text frame of the overworld.
#[must_use]
pub fn render_overworld_ascii(world: &Overworld) -> String {
    let mut output = String::new();
    let hero = world.hero();
    output.push_str(&format!("{} hp {}/{}\n", hero.name, hero.hp(), hero.max_hp()));
    render_grid(&mut output, world.size(), &overworld_cells(world));
    output.push_str("\nLegend: @=Hero  #=Wall  T=Tree  .=Grass\n");
    output
}

fn render_grid(output: &mut String, size: GridSize, cells: &[Cell]) {
    let inner = usize::from(size.width) * 3;
    output.push_str(&format!("┌{}┐\n", "─".repeat(inner)));
    for row in cells.chunks(usize::from(size.width).max(1)) {
        output.push('│');
        for cell in row {
            output.push_str(&cell.text());
        }
        output.push_str("│\n");
    }
    output.push_str(&format!("└{}┘\n", "─".repeat(inner)));
}

fn index(size: GridSize, coord: Coord) -> Option<usize> {
    size.contains(coord)
        .then(|| usize::from(coord.y) * usize::from(size.width) + usize::from(coord.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleConfig, BattleInput};
    use crate::overworld::TerrainMap;

    fn duel() -> BattleSession {
        let friendly = vec![Unit::new("Hero", Side::Friendly, Coord::new(1, 3), 20, 5, 4)];
        let enemies = vec![Unit::new("Goblin", Side::Enemy, Coord::new(6, 3), 10, 3, 3)];
        BattleSession::from_rosters(GridSize::BATTLE, friendly, enemies, BattleConfig::default()).unwrap()
    }

    #[test]
    fn test_battle_cells_place_units() {
        let session = duel();
        let cells = battle_cells(&session);
        assert_eq!(cells.len(), 48);
        assert_eq!(cells[3 * 8 + 1].glyph.symbol(), 'H');
        assert!(cells[3 * 8 + 1].cursor);
        assert_eq!(cells[3 * 8 + 6].glyph.symbol(), 'g');
        assert_eq!(cells[0].glyph, Glyph::Empty);
    }

    #[test]
    fn test_reachable_overlay() {
        let mut session = duel();
        session.handle_input(BattleInput::Confirm);
        let cells = battle_cells(&session);
        let marked = cells.iter().filter(|c| c.reachable).count();
        assert_eq!(marked, session.reachable().len());
        assert_eq!(cells[3 * 8 + 2].text(), " * ");
    }

    #[test]
    fn test_fallen_unit_glyph() {
        let mut unit = Unit::new("Goblin", Side::Enemy, Coord::new(0, 0), 10, 3, 3);
        unit.take_damage(10);
        assert_eq!(Glyph::for_unit(&unit).symbol(), 'x');
    }

    #[test]
    fn test_render_battle_ascii() {
        let session = duel();
        let frame = render_battle_ascii(&session);
        assert!(frame.starts_with("Round 1 - SELECT"));
        assert!(frame.contains("[H]"));
        assert!(frame.contains("H Hero"));
        assert!(frame.contains("hp 10/10"));
        assert!(frame.contains("Battle start!"));
        assert!(frame.contains("Log:\n  Battle start! Select a unit.\n"));
        // Header, two borders, six rows.
        assert_eq!(frame.lines().take_while(|l| !l.starts_with('└')).count(), 8);
    }

    #[test]
    fn test_render_overworld_ascii() {
        let mut terrain = TerrainMap::new(GridSize::new(4, 2));
        terrain.set(Coord::new(3, 0), Terrain::Wall);
        let hero = Unit::new("Hero", Side::Friendly, Coord::new(0, 0), 20, 5, 4);
        let goblin = Unit::new("Goblin", Side::Enemy, Coord::new(1, 1), 10, 3, 3);
        let world = Overworld::with_units(terrain, hero, vec![goblin]);

        let frame = render_overworld_ascii(&world);
        let header: Vec<&str> = frame.lines().take(2).collect();
        assert_eq!(header, vec!["Hero hp 20/20", "┌────────────┐"]);
        let rows: Vec<&str> = frame.lines().skip(2).take(2).collect();
        assert_eq!(rows, vec!["│ @  .  .  # │", "│ .  g  .  . │"]);
    }
}
