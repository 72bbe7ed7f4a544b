//! Battlefield coordinate system.
//!
//! The battlefield is a fixed `WIDTH` x `HEIGHT` grid of integer cells.
//! Armies are laid out inside a narrower placement box on their own side.

use serde::{Deserialize, Serialize};

/// Battlefield width in cells.
pub const WIDTH: u32 = 27;

/// Battlefield height in cells.
pub const HEIGHT: u32 = 21;

/// Columns in an army's placement box.
pub const PLACEMENT_WIDTH: u32 = 3;

/// Rows in an army's placement box.
pub const PLACEMENT_HEIGHT: u32 = 21;

/// Cardinal step offsets, in the order neighbours are explored.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

/// One step of a computed path.
pub type Edge = GridPos;

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Check if this position lies on the battlefield.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < WIDTH && self.y < HEIGHT
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Offset this position, returning `None` if the result leaves the battlefield.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let pos = Self::new(x, y);
        pos.in_bounds().then_some(pos)
    }

    /// The up to four in-bounds cardinal neighbours.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// Row-major index into a `WIDTH` x `HEIGHT` buffer.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        (self.y as usize) * (WIDTH as usize) + (self.x as usize)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which edge of the battlefield an army stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Columns starting at 0.
    #[default]
    Left,
    /// Columns ending at `WIDTH - 1`.
    Right,
}

impl Side {
    /// First battlefield column of a placement box of the given width.
    #[must_use]
    pub const fn first_column(self, box_width: u32) -> u32 {
        match self {
            Self::Left => 0,
            Self::Right => WIDTH.saturating_sub(box_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        assert!(GridPos::new(0, 0).in_bounds());
        assert!(GridPos::new(WIDTH - 1, HEIGHT - 1).in_bounds());
        assert!(!GridPos::new(WIDTH, 0).in_bounds());
        assert!(!GridPos::new(0, HEIGHT).in_bounds());
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(GridPos::new(0, 0).manhattan_distance(GridPos::new(3, 4)), 7);
        assert_eq!(GridPos::new(5, 5).manhattan_distance(GridPos::new(5, 5)), 0);
        assert_eq!(GridPos::new(9, 2).manhattan_distance(GridPos::new(1, 6)), 12);
    }

    #[test]
    fn test_neighbors_in_corner() {
        let neighbors: Vec<_> = GridPos::new(0, 0).neighbors().collect();
        assert_eq!(neighbors, vec![GridPos::new(1, 0), GridPos::new(0, 1)]);
    }

    #[test]
    fn test_neighbors_in_middle() {
        assert_eq!(GridPos::new(10, 10).neighbors().count(), 4);
    }

    #[test]
    fn test_side_columns() {
        assert_eq!(Side::Left.first_column(PLACEMENT_WIDTH), 0);
        assert_eq!(Side::Right.first_column(PLACEMENT_WIDTH), 24);
    }
}
