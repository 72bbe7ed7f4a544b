//! Grid-based shortest-path search between an attacker and its target.
//!
//! Uniform-cost search (Dijkstra) over the `WIDTH` x `HEIGHT` battlefield with
//! unit weight in the four cardinal directions. Cells held by living units
//! other than the attacker and the target are impassable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::{Edge, GridPos, HEIGHT, WIDTH};
use crate::unit::Unit;

/// Cell types for the navigation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Free cell (cost: 1).
    #[default]
    Walkable,
    /// Occupied by a unit.
    Blocked,
}

impl CellType {
    /// Returns true if this cell can be entered.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// Occupancy grid covering the whole battlefield.
#[derive(Debug, Clone)]
pub struct NavGrid {
    /// Cell data stored in row-major order.
    cells: Vec<CellType>,
}

impl NavGrid {
    /// Create a grid with every cell walkable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![CellType::Walkable; (WIDTH as usize) * (HEIGHT as usize)],
        }
    }

    /// Build the occupancy grid for a search from `attacker` to `target`.
    ///
    /// Every living, placed unit blocks its cell except the two endpoints,
    /// so the target stays reachable although it stands on its cell.
    pub fn from_units<'a>(
        attacker: &Unit,
        target: &Unit,
        all_units: impl IntoIterator<Item = &'a Unit>,
    ) -> Self {
        let endpoints = [attacker.position(), target.position()];
        let mut grid = Self::new();
        for unit in all_units.into_iter().filter(|u| u.is_alive()) {
            let Some(pos) = unit.position() else {
                continue;
            };
            if endpoints.contains(&Some(pos)) {
                continue;
            }
            grid.set_cell(pos, CellType::Blocked);
        }
        grid
    }

    /// Get cell type at a position.
    /// Returns `None` if out of bounds.
    #[must_use]
    pub fn get_cell(&self, pos: GridPos) -> Option<CellType> {
        pos.in_bounds().then(|| self.cells[pos.index()])
    }

    /// Set cell type at a position.
    /// Returns `false` if out of bounds.
    pub fn set_cell(&mut self, pos: GridPos, cell_type: CellType) -> bool {
        if pos.in_bounds() {
            self.cells[pos.index()] = cell_type;
            true
        } else {
            false
        }
    }

    /// Check if a cell is walkable.
    #[must_use]
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.get_cell(pos).is_some_and(CellType::is_walkable)
    }
}

impl Default for NavGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// An entry in the search frontier.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct FrontierNode {
    pos: GridPos,
    distance: u32,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest distance pops first.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the shortest path from `attacker` to `target`, avoiding other units.
///
/// The path runs from the attacker's cell to the target's cell, both
/// inclusive. An empty path means no route exists, or one of the two units
/// is not placed on the battlefield.
#[must_use]
pub fn find_path<'a>(
    attacker: &Unit,
    target: &Unit,
    all_units: impl IntoIterator<Item = &'a Unit>,
) -> Vec<Edge> {
    let (Some(start), Some(goal)) = (attacker.position(), target.position()) else {
        tracing::debug!(attacker = attacker.name(), "Path search skipped: unit not placed");
        return Vec::new();
    };

    tracing::trace!(attacker = attacker.name(), target = target.name(), "Path search started");
    let grid = NavGrid::from_units(attacker, target, all_units);
    let path = shortest_path(&grid, start, goal);

    if path.is_empty() {
        tracing::debug!(
            attacker = attacker.name(),
            target = target.name(),
            "No path: target is fully blocked"
        );
    } else {
        tracing::debug!(
            attacker = attacker.name(),
            target = target.name(),
            steps = path.len(),
            "Path found"
        );
    }
    path
}

/// Shortest path between two cells on a prepared grid.
///
/// The start and goal cells are always treated as enterable. Returns an empty
/// vector when either cell is off the battlefield or no route exists.
#[must_use]
pub fn shortest_path(grid: &NavGrid, start: GridPos, goal: GridPos) -> Vec<Edge> {
    if !start.in_bounds() || !goal.in_bounds() {
        return Vec::new();
    }

    let cell_count = (WIDTH as usize) * (HEIGHT as usize);
    let mut distance = vec![u32::MAX; cell_count];
    let mut visited = vec![false; cell_count];
    let mut previous: Vec<Option<GridPos>> = vec![None; cell_count];
    let mut frontier = BinaryHeap::new();

    distance[start.index()] = 0;
    frontier.push(FrontierNode {
        pos: start,
        distance: 0,
    });

    while let Some(current) = frontier.pop() {
        if visited[current.pos.index()] {
            continue;
        }
        visited[current.pos.index()] = true;

        if current.pos == goal {
            break;
        }

        for neighbor in current.pos.neighbors() {
            if neighbor != goal && !grid.is_walkable(neighbor) {
                continue;
            }
            let candidate = current.distance + 1;
            if candidate < distance[neighbor.index()] {
                distance[neighbor.index()] = candidate;
                previous[neighbor.index()] = Some(current.pos);
                frontier.push(FrontierNode {
                    pos: neighbor,
                    distance: candidate,
                });
            }
        }
    }

    reconstruct_path(&previous, start, goal)
}

/// Walk predecessor links back from the goal; empty if the chain breaks.
fn reconstruct_path(previous: &[Option<GridPos>], start: GridPos, goal: GridPos) -> Vec<Edge> {
    let mut path = Vec::new();
    let mut current = goal;

    while current != start {
        path.push(current);
        match previous[current.index()] {
            Some(prev) => current = prev,
            None => return Vec::new(),
        }
    }

    path.push(start);
    path.reverse();
    path
}
