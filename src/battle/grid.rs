//! Grid coordinates, directions and bounds.

use serde::Serialize;

/// Battle grid width in tiles.
pub const BATTLE_GRID_W: u16 = 8;

/// Battle grid height in tiles.
pub const BATTLE_GRID_H: u16 = 6;

/// A coordinate on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub fn distance(self, other: Coord) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// Offset this coordinate by a signed delta, staying inside `size`.
    ///
    /// Returns `None` when the result would leave the grid.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, size: GridSize) -> Option<Coord> {
        let x = i32::from(self.x) + dx;
        let y = i32::from(self.y) + dy;
        let coord = Coord::new(u16::try_from(x).ok()?, u16::try_from(y).ok()?);
        size.contains(coord).then_some(coord)
    }

    /// Step one tile in a cardinal direction.
    #[must_use]
    pub fn step(self, direction: Direction, size: GridSize) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy, size)
    }

    /// Get adjacent coordinates (right, left, down, up).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, size: GridSize) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        for direction in Direction::CARDINAL {
            if let Some(next) = self.step(direction, size) {
                result[count as usize] = next;
                count += 1;
            }
        }

        (result, count)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Fixed neighbour order used by flood fill and the AI fallback.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit delta `(dx, dy)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of the dominant axis of travel from `from` to `to`.
    ///
    /// Horizontal wins ties. Returns `None` when both are the same tile.
    #[must_use]
    pub fn towards(from: Coord, to: Coord) -> Option<Direction> {
        if from == to {
            return None;
        }
        if from.x.abs_diff(to.x) >= from.y.abs_diff(to.y) {
            Some(if to.x > from.x { Direction::Right } else { Direction::Left })
        } else {
            Some(if to.y > from.y { Direction::Down } else { Direction::Up })
        }
    }
}

/// Dimensions of a rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    /// Width in tiles.
    pub width: u16,
    /// Height in tiles.
    pub height: u16,
}

impl GridSize {
    /// The fixed battle grid.
    pub const BATTLE: GridSize = GridSize::new(BATTLE_GRID_W, BATTLE_GRID_H);

    /// Create a new grid size.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Number of tiles on the grid.
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Move a cursor one tile, clamping at the edges.
    #[must_use]
    pub fn clamp_step(self, coord: Coord, direction: Direction) -> Coord {
        coord.step(direction, self).unwrap_or(coord)
    }

    /// Iterate over every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
