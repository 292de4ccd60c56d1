//! Depth resolution.
//!
//! Every attached entity gets a depth on its root cell. An entity must be
//! drawn after every entity whose root lies in its dependency zone, i.e. the
//! rectangle from the grid origin to the far edges of its footprint:
//!
//! ```text
//! zone(e) = [0, root.x + width) × [0, root.y + height)
//! ```
//!
//! A root's depth is one `step` above the deepest other root in its zone that
//! already has a depth, or `root.x + root.y + step` when none has.
//!
//! A full draw assigns every root in four raster-order passes. A partial draw
//! marks the roots inside the dirty rectangle and the roots without a depth
//! as stale, then every root whose zone holds a stale root, until nothing
//! changes. Stale roots are resolved in raster order; resolving a root first
//! walks the rows of its zone and resolves the stale roots found there.

use std::collections::HashSet;

use log::trace;

use isogrid_core::{
    depth::Depth,
    geometry::{Area, Coord, Footprint},
};

use crate::grid::Grid;

/// Working copy of the per-cell depths for a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DepthTable {
    columns: u32,
    depths: Vec<Option<Depth>>,
}

impl DepthTable {
    fn snapshot(grid: &Grid) -> Self {
        Self {
            columns: grid.columns(),
            depths: grid.cells().iter().map(|cell| cell.depth()).collect(),
        }
    }

    fn index(&self, coord: Coord) -> usize {
        coord.y() as usize * self.columns as usize + coord.x() as usize
    }

    fn get(&self, coord: Coord) -> Option<Depth> {
        self.depths.get(self.index(coord)).copied().flatten()
    }

    fn set(&mut self, coord: Coord, depth: Option<Depth>) {
        let idx = self.index(coord);
        if let Some(slot) = self.depths.get_mut(idx) {
            *slot = depth;
        }
    }

    fn clear(&mut self) {
        self.depths.fill(None);
    }

    /// Depths in raster order, ready to be written back to the cells.
    pub(crate) fn into_depths(self) -> Vec<Option<Depth>> {
        self.depths
    }
}

/// Render-path bookkeeping for one partial draw.
#[derive(Debug, Default)]
struct Walk {
    stale: HashSet<Coord>,
    assigned: HashSet<Coord>,
    expanded: HashSet<Coord>,
}

/// The rectangle whose roots must be drawn before `root`.
fn dependency_zone(root: Coord, footprint: Footprint) -> Area {
    Area::up_to(
        root.x().saturating_add(footprint.width()),
        root.y().saturating_add(footprint.height()),
    )
}

/// Computes depths for a grid without mutating it.
pub(crate) struct DepthResolver<'g> {
    grid: &'g Grid,
    table: DepthTable,
    step: u32,
}

impl<'g> DepthResolver<'g> {
    pub(crate) fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            table: DepthTable::snapshot(grid),
            step: grid.step(),
        }
    }

    /// Assigns every root from scratch.
    pub(crate) fn resolve_full(mut self) -> DepthTable {
        let grid = self.grid;
        self.table.clear();

        let roots: Vec<(Coord, Footprint)> = grid
            .entities_in_area(grid.bounds())
            .into_iter()
            .map(|entry| (entry.coord, entry.entity.footprint()))
            .collect();

        // Single-row entities first so taller neighbours see them.
        for &(coord, footprint) in roots.iter().filter(|(_, fp)| fp.height() == 1) {
            self.assign(coord, footprint);
        }
        for &(coord, footprint) in &roots {
            self.assign(coord, footprint);
        }
        for &(coord, footprint) in roots.iter().filter(|(_, fp)| fp.height() > 1) {
            self.assign(coord, footprint);
        }
        for &(coord, footprint) in &roots {
            self.assign(coord, footprint);
        }

        trace!(roots = roots.len(); "Full depth resolution finished");
        self.table
    }

    /// Reassigns the roots of `dirty` and every root that depends on them,
    /// leaving other depths untouched.
    pub(crate) fn resolve_partial(mut self, dirty: Area) -> DepthTable {
        let grid = self.grid;
        let roots: Vec<(Coord, Footprint)> = grid
            .entities_in_area(grid.bounds())
            .into_iter()
            .map(|entry| (entry.coord, entry.entity.footprint()))
            .collect();

        let mut walk = Walk::default();
        let mut pending: Vec<Coord> = roots
            .iter()
            .map(|&(coord, _)| coord)
            .filter(|&coord| dirty.contains(coord) || self.table.get(coord).is_none())
            .collect();
        walk.stale.extend(pending.iter().copied());

        while let Some(changed) = pending.pop() {
            for &(coord, footprint) in &roots {
                let depends = dependency_zone(coord, footprint).contains(changed);
                if depends && walk.stale.insert(coord) {
                    pending.push(coord);
                }
            }
        }
        for &coord in &walk.stale {
            self.table.set(coord, None);
        }

        for &(coord, footprint) in &roots {
            if walk.stale.contains(&coord) {
                self.render_path(coord, footprint, &mut walk);
            }
        }

        trace!(
            dirty:% = dirty,
            stale = walk.stale.len(),
            assigned = walk.assigned.len(),
            expanded = walk.expanded.len();
            "Partial depth resolution finished"
        );
        self.table
    }

    fn assign(&mut self, root: Coord, footprint: Footprint) {
        let grid = self.grid;
        let deepest = grid
            .entities_in_area(dependency_zone(root, footprint))
            .into_iter()
            .filter(|entry| entry.coord != root)
            .filter_map(|entry| self.table.get(entry.coord))
            .max();

        let depth = match deepest {
            Some(depth) => depth.above(self.step),
            None => Depth::new(root.diagonal()).above(self.step),
        };
        self.table.set(root, Some(depth));
    }

    /// Assigns the stale root `root` once its prerequisites are assigned.
    ///
    /// The rows of its zone are walked left to right and every stale root met
    /// on the way is resolved first. A root is expanded at most once per draw,
    /// which bounds the recursion by the number of stale roots.
    fn render_path(&mut self, root: Coord, footprint: Footprint, walk: &mut Walk) {
        if walk.assigned.contains(&root) || !walk.expanded.insert(root) {
            return;
        }

        let grid = self.grid;
        let obstructions: Vec<(Coord, Footprint)> = grid
            .entities_in_area(dependency_zone(root, footprint))
            .into_iter()
            .filter(|entry| entry.coord != root && walk.stale.contains(&entry.coord))
            .map(|entry| (entry.coord, entry.entity.footprint()))
            .collect();
        for (coord, obstruction) in obstructions {
            self.render_path(coord, obstruction, walk);
        }

        self.assign(root, footprint);
        walk.assigned.insert(root);
    }
}
