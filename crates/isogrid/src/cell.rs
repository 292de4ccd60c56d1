//! Grid cells and their occupancy state.

use isogrid_core::{depth::Depth, geometry::Coord};

use crate::entity::EntityId;

/// A single grid coordinate with occupancy and depth state.
///
/// The coordinate never changes after the grid creates the cell. Occupancy
/// is written only by the grid: a cell has an occupant exactly when it lies
/// within that occupant's footprint, and `occupant_root` then points at the
/// entity's anchor cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    depth: Option<Depth>,
    occupant: Option<EntityId>,
    occupant_root: Option<Coord>,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Self {
        Self {
            coord,
            depth: None,
            occupant: None,
            occupant_root: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn x(&self) -> u32 {
        self.coord.x()
    }

    pub fn y(&self) -> u32 {
        self.coord.y()
    }

    /// Depth assigned by the last draw, `None` while unset.
    pub fn depth(&self) -> Option<Depth> {
        self.depth
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    /// Anchor cell of the occupant, if any.
    pub fn occupant_root(&self) -> Option<Coord> {
        self.occupant_root
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns `true` if this cell is the anchor of its occupant.
    pub fn is_root(&self) -> bool {
        self.occupant_root == Some(self.coord)
    }

    /// Sets (or clears) occupancy. Any previous depth is dropped so the next
    /// draw recomputes it.
    pub(crate) fn set_occupant(&mut self, occupant: Option<(EntityId, Coord)>) {
        self.occupant = occupant.map(|(id, _)| id);
        self.occupant_root = occupant.map(|(_, root)| root);
        self.depth = None;
    }

    pub(crate) fn set_depth(&mut self, depth: Option<Depth>) {
        self.depth = depth;
    }
}
