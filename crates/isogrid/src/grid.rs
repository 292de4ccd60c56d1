//! The grid: cell storage, entity arena, occupancy mutations and queries.
//!
//! # Ownership
//!
//! The grid owns every [`Cell`] and every entity it creates. Callers hold
//! [`EntityId`] handles. Entities survive [`Grid::remove`] in a detached
//! state and are only dropped by [`Grid::discard_entity`].
//!
//! # Example
//!
//! ```
//! use isogrid::{Catalog, GridBuilder, geometry::Footprint, kind::EntityKind};
//!
//! let catalog = Catalog::new()
//!     .with_kind(EntityKind::new("chair", Footprint::unit()))
//!     .with_kind(EntityKind::new("closet", Footprint::new(1, 2).unwrap()));
//!
//! let mut grid = GridBuilder::new(10, 10).with_catalog(catalog).build().unwrap();
//!
//! let chair = grid.add("chair", 2, 2).unwrap();
//! let closet = grid.add("closet", 2, 3).unwrap();
//! grid.draw(0, 0);
//!
//! assert!(grid.depth_of(closet) > grid.depth_of(chair));
//! ```

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};

use isogrid_core::{
    depth::Depth,
    geometry::{Area, Coord},
    orientation::{Orientation, RotationOrder},
};

use crate::{
    catalog::Catalog,
    cell::Cell,
    config::AppConfig,
    depth::DepthResolver,
    entity::{EntityId, PlacedEntity},
    error::GridError,
    event::{EventBus, EventKind, EventKinds, GridEvent, ListenerId},
    placement,
};

/// A root cell found by [`Grid::entities_in_area`].
#[derive(Debug, Clone, Copy)]
pub struct AreaEntry<'g> {
    pub coord: Coord,
    pub cell: &'g Cell,
    pub id: EntityId,
    pub entity: &'g PlacedEntity,
}

/// Outcome of a [`Grid::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSummary {
    /// Region whose depths were recomputed.
    pub area: Area,
    /// `true` for an incremental (render path) draw.
    pub partial: bool,
    /// Cells whose published depth changed.
    pub changed: usize,
}

/// Builder for [`Grid`].
///
/// Listeners registered here are attached before the cells are created and
/// therefore observe `beforeInit`, `cellCreated` and `afterInit`.
pub struct GridBuilder {
    columns: u32,
    rows: u32,
    step: u32,
    catalog: Catalog,
    rotation_order: RotationOrder,
    events: EventBus,
}

impl GridBuilder {
    /// Starts a grid of `columns × rows` cells with a depth step of 1, an
    /// empty catalog and the default rotation order.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            step: 1,
            catalog: Catalog::new(),
            rotation_order: RotationOrder::default(),
            events: EventBus::new(),
        }
    }

    /// Applies the depth step and rotation order from an [`AppConfig`].
    pub fn with_config(self, config: &AppConfig) -> Self {
        self.with_step(config.depth().step())
            .with_rotation_order(config.rotation().order().clone())
    }

    /// Sets the depth step separating stacked entities.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_rotation_order(mut self, order: RotationOrder) -> Self {
        self.rotation_order = order;
        self
    }

    /// Subscribes a listener before the grid exists.
    pub fn on<F>(mut self, kinds: impl Into<EventKinds>, listener: F) -> Self
    where
        F: Fn(&GridEvent, &Grid) + 'static,
    {
        self.events.on(kinds, listener);
        self
    }

    /// Creates the grid and all of its cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] for zero dimensions or a zero
    /// step.
    pub fn build(self) -> Result<Grid, GridError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GridError::InvalidConfig(format!(
                "grid must have at least one column and one row, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.step == 0 {
            return Err(GridError::InvalidConfig(
                "depth step must be positive".to_string(),
            ));
        }
        let cell_count = usize::try_from(u64::from(self.columns) * u64::from(self.rows))
            .map_err(|_| GridError::InvalidConfig("grid is too large".to_string()))?;

        let mut grid = Grid {
            columns: self.columns,
            rows: self.rows,
            step: self.step,
            cells: Vec::with_capacity(cell_count),
            published: vec![None; cell_count],
            catalog: self.catalog,
            rotation_order: self.rotation_order,
            entities: IndexMap::new(),
            attached: IndexSet::new(),
            next_entity: 0,
            events: self.events,
        };

        grid.emit(GridEvent::BeforeInit);
        for coord in grid.bounds().cells() {
            grid.cells.push(Cell::new(coord));
            grid.emit(GridEvent::CellCreated { coord });
        }
        grid.emit(GridEvent::AfterInit);

        info!(
            columns = grid.columns,
            rows = grid.rows,
            step = grid.step,
            kinds = grid.catalog.len();
            "Grid initialized"
        );

        Ok(grid)
    }
}

/// A fixed-size grid of cells holding placed entities.
#[derive(Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    step: u32,
    cells: Vec<Cell>,
    /// Depths last reported through `cellDepthAssigned`.
    published: Vec<Option<Depth>>,
    catalog: Catalog,
    rotation_order: RotationOrder,
    entities: IndexMap<EntityId, PlacedEntity>,
    attached: IndexSet<EntityId>,
    next_entity: u32,
    events: EventBus,
}

impl Grid {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Depth distance between an entity and the one it is stacked on.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rotation_order(&self) -> &RotationOrder {
        &self.rotation_order
    }

    /// The whole grid as an area.
    pub fn bounds(&self) -> Area {
        Area::up_to(self.columns, self.rows)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.bounds().contains(coord)
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.y() as usize * self.columns as usize + coord.x() as usize)
    }

    /// The cell at `(x, y)`, or `None` outside the grid.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cell(Coord::new(x, y))
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|idx| self.cells.get(idx))
    }

    fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).and_then(|idx| self.cells.get_mut(idx))
    }

    /// All cells in raster order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ---------------------------------------------------------------------
    // Entities
    // ---------------------------------------------------------------------

    /// Builds a detached entity of catalog kind `kind` facing the kind's
    /// default orientation.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownEntityKind`] if the catalog has no such kind, and
    /// [`GridError::InvalidOrientation`] if the kind's default orientation
    /// has no sprite.
    pub fn create_entity(&mut self, kind: &str) -> Result<EntityId, GridError> {
        let orientation = self
            .catalog
            .get(kind)
            .ok_or_else(|| GridError::UnknownEntityKind(kind.to_string()))?
            .default_orientation();
        self.create_entity_oriented(kind, orientation)
    }

    /// Builds a detached entity of kind `kind` facing `orientation`.
    pub fn create_entity_oriented(
        &mut self,
        kind: &str,
        orientation: Orientation,
    ) -> Result<EntityId, GridError> {
        let kind_def = self
            .catalog
            .get(kind)
            .cloned()
            .ok_or_else(|| GridError::UnknownEntityKind(kind.to_string()))?;
        if !kind_def.supports(orientation) {
            return Err(GridError::InvalidOrientation {
                kind: kind_def.id(),
                orientation,
            });
        }

        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        self.entities
            .insert(id, PlacedEntity::new(kind_def, orientation));

        trace!(entity:% = id, kind, orientation:% = orientation; "Entity created");
        Ok(id)
    }

    /// Creates an entity of `kind` and places it at `(x, y)`.
    ///
    /// On failure the freshly created entity is discarded again.
    pub fn add(&mut self, kind: &str, x: u32, y: u32) -> Result<EntityId, GridError> {
        let id = self.create_entity(kind)?;
        if let Err(err) = self.place(id, x, y) {
            self.entities.shift_remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    /// Removes the entity from the grid (if placed) and forgets it.
    ///
    /// Returns `false` if the handle was already stale.
    pub fn discard_entity(&mut self, id: EntityId) -> bool {
        self.remove(id);
        self.entities.shift_remove(&id).is_some()
    }

    pub fn entity(&self, id: EntityId) -> Option<&PlacedEntity> {
        self.entities.get(&id)
    }

    fn known_entity(&self, id: EntityId) -> Result<&PlacedEntity, GridError> {
        self.entities.get(&id).ok_or(GridError::UnknownEntity(id))
    }

    /// Attached entities in the order they were placed.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &PlacedEntity)> {
        self.attached
            .iter()
            .filter_map(move |id| self.entities.get(id).map(|entity| (*id, entity)))
    }

    /// Number of attached entities.
    pub fn entity_count(&self) -> usize {
        self.attached.len()
    }

    /// Depth of the entity's root cell.
    pub fn depth_of(&self, id: EntityId) -> Option<Depth> {
        let root = self.entity(id)?.root()?;
        self.cell(root)?.depth()
    }

    /// Cells occupied by the entity, in raster order. Empty while detached.
    pub fn find_entity_cells(&self, id: EntityId) -> Vec<&Cell> {
        let Some(entity) = self.entity(id) else {
            return Vec::new();
        };
        let Some(root) = entity.root() else {
            warn!(entity:% = id; "Entity is not attached to any cells");
            return Vec::new();
        };
        let Some(area) = Area::from_origin(root, entity.footprint()) else {
            return Vec::new();
        };
        area.cells()
            .filter_map(|coord| self.cell(coord))
            .filter(|cell| cell.occupant() == Some(id))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Places a detached entity with its anchor at `(x, y)`.
    ///
    /// # Errors
    ///
    /// - [`GridError::AlreadyPlaced`] if the entity is attached
    /// - [`GridError::OutOfBounds`] if the footprint leaves the grid
    /// - [`GridError::AreaTaken`] if any footprint cell is occupied
    ///
    /// The grid is unchanged on error.
    pub fn place(&mut self, id: EntityId, x: u32, y: u32) -> Result<(), GridError> {
        let entity = self.known_entity(id)?;
        if entity.is_attached() {
            return Err(GridError::AlreadyPlaced(id));
        }

        let root = Coord::new(x, y);
        let area = placement::validate(self, root, entity.footprint(), None)?;

        self.reassign_cells(id, None, Some((area, root)));
        self.attach(id, root);

        debug!(entity:% = id, root:% = root; "Entity placed");
        self.emit(GridEvent::EntityAdded { entity: id, root });
        Ok(())
    }

    /// Re-anchors an entity at `(x, y)`.
    ///
    /// Cells the entity already covers do not count as taken. A detached
    /// entity is placed instead.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] or [`GridError::AreaTaken`]; the grid is
    /// unchanged on error.
    pub fn move_entity(&mut self, id: EntityId, x: u32, y: u32) -> Result<(), GridError> {
        let entity = self.known_entity(id)?;
        let Some(from) = entity.root() else {
            return self.place(id, x, y);
        };

        let footprint = entity.footprint();
        let to = Coord::new(x, y);
        let area = placement::validate(self, to, footprint, Some(id))?;
        let old_area = Area::from_origin(from, footprint);

        self.reassign_cells(id, old_area, Some((area, to)));
        self.attach(id, to);

        debug!(entity:% = id, from:% = from, to:% = to; "Entity moved");
        self.emit(GridEvent::EntityMoved {
            entity: id,
            from,
            to,
        });
        Ok(())
    }

    /// Takes an entity off the grid, keeping it alive in a detached state.
    ///
    /// Removing a detached or unknown entity is a no-op and returns `false`.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entity(id) else {
            warn!(entity:% = id; "Cannot remove unknown entity");
            return false;
        };
        let Some(from) = entity.root() else {
            return false;
        };

        let old_area = Area::from_origin(from, entity.footprint());
        self.reassign_cells(id, old_area, None);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_root(None);
        }
        self.attached.shift_remove(&id);

        debug!(entity:% = id, from:% = from; "Entity removed");
        self.emit(GridEvent::EntityRemoved { entity: id, from });
        true
    }

    /// Turns an entity one step through the rotation order and returns its
    /// new orientation.
    ///
    /// # Errors
    ///
    /// Fails like [`Grid::orientate`]; the orientation is unchanged on error.
    pub fn rotate(&mut self, id: EntityId, clockwise: bool) -> Result<Orientation, GridError> {
        let current = self.known_entity(id)?.orientation();
        let next = self.rotation_order.next(current, clockwise);
        self.orientate(id, next)?;
        Ok(next)
    }

    /// Turns an entity to face `orientation`, re-validating its footprint in
    /// place when it is attached.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidOrientation`] if the kind has no sprite for it
    /// - [`GridError::OutOfBounds`] / [`GridError::AreaTaken`] if the turned
    ///   footprint no longer fits at the current anchor
    pub fn orientate(&mut self, id: EntityId, orientation: Orientation) -> Result<(), GridError> {
        let entity = self.known_entity(id)?;
        if !entity.kind().supports(orientation) {
            return Err(GridError::InvalidOrientation {
                kind: entity.kind_id(),
                orientation,
            });
        }

        if let Some(root) = entity.root() {
            let old_area = Area::from_origin(root, entity.footprint());
            let area = placement::validate(self, root, entity.footprint_facing(orientation), Some(id))?;
            self.reassign_cells(id, old_area, Some((area, root)));
            // The dependency zone changed with the footprint.
            if let Some(cell) = self.cell_mut(root) {
                cell.set_depth(None);
            }
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_orientation(orientation);
        }

        debug!(entity:% = id, orientation:% = orientation; "Entity rotated");
        self.emit(GridEvent::EntityRotated {
            entity: id,
            orientation,
        });
        Ok(())
    }

    fn attach(&mut self, id: EntityId, root: Coord) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_root(Some(root));
        }
        self.attached.insert(id);
    }

    /// Moves `id`'s occupancy from `old` to `new`, touching only the cells
    /// whose occupant or occupant root actually changes.
    fn reassign_cells(&mut self, id: EntityId, old: Option<Area>, new: Option<(Area, Coord)>) {
        if let Some(old) = old {
            for coord in old.cells() {
                if new.is_some_and(|(area, _)| area.contains(coord)) {
                    continue;
                }
                if let Some(cell) = self.cell_mut(coord) {
                    cell.set_occupant(None);
                }
            }
        }

        if let Some((area, root)) = new {
            for coord in area.cells() {
                let Some(cell) = self.cell_mut(coord) else {
                    continue;
                };
                if cell.occupant() != Some(id) || cell.occupant_root() != Some(root) {
                    cell.set_occupant(Some((id, root)));
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Area queries
    // ---------------------------------------------------------------------

    fn occupied_in(&self, area: Area, ignoring: Option<EntityId>) -> impl Iterator<Item = &Cell> {
        area.intersection(&self.bounds())
            .cells()
            .filter_map(move |coord| self.cell(coord))
            .filter(move |cell| cell.occupant().is_some_and(|id| Some(id) != ignoring))
    }

    /// Returns `true` if no cell of `area` is occupied by an entity other
    /// than `ignoring`. Cells outside the grid are ignored.
    pub fn is_area_free(&self, area: Area, ignoring: Option<EntityId>) -> bool {
        self.occupied_in(area, ignoring).next().is_none()
    }

    /// Occupied cells of `area` (raster order), skipping cells owned by
    /// `ignoring`.
    pub fn occupied_cells(&self, area: Area, ignoring: Option<EntityId>) -> Vec<&Cell> {
        self.occupied_in(area, ignoring).collect()
    }

    /// Root cells within `area`, in raster order.
    ///
    /// Each row is scanned left to right; after an occupied cell the scan
    /// jumps to the end of that entity's footprint on the row, so interior
    /// cells of wide entities are not revisited.
    pub fn entities_in_area(&self, area: Area) -> Vec<AreaEntry<'_>> {
        let area = area.intersection(&self.bounds());
        let mut found = Vec::new();

        for y in area.y0()..area.y1() {
            let mut x = area.x0();
            while x < area.x1() {
                let coord = Coord::new(x, y);
                let Some(cell) = self.cell(coord) else {
                    break;
                };
                let (Some(id), Some(root)) = (cell.occupant(), cell.occupant_root()) else {
                    x += 1;
                    continue;
                };
                let Some(entity) = self.entity(id) else {
                    x += 1;
                    continue;
                };

                if cell.is_root() {
                    found.push(AreaEntry {
                        coord,
                        cell,
                        id,
                        entity,
                    });
                }
                x = root.x() + entity.width();
            }
        }

        found
    }

    // ---------------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------------

    /// Recomputes entity depths and notifies listeners of every changed cell.
    ///
    /// `draw(0, 0)` recomputes the whole grid. Any other origin recomputes
    /// the roots of the dirty rectangle `[from_col, columns) × [from_row,
    /// rows)`, roots left without a depth and every root depending on
    /// either. Other depths stay as they were.
    pub fn draw(&mut self, from_col: u32, from_row: u32) -> DrawSummary {
        let partial = from_col > 0 || from_row > 0;
        let area = Area::new(
            from_col.min(self.columns),
            from_row.min(self.rows),
            self.columns,
            self.rows,
        );

        let resolver = DepthResolver::new(self);
        let table = if partial {
            resolver.resolve_partial(area)
        } else {
            resolver.resolve_full()
        };
        for (cell, depth) in self.cells.iter_mut().zip(table.into_depths()) {
            cell.set_depth(depth);
        }

        let changed = self.publish_depths();
        debug!(partial, area:% = area, changed; "Draw completed");
        self.emit(GridEvent::DrawCompleted { area, partial });

        DrawSummary {
            area,
            partial,
            changed,
        }
    }

    fn publish_depths(&mut self) -> usize {
        let mut changed = Vec::new();
        for (cell, published) in self.cells.iter().zip(self.published.iter_mut()) {
            if cell.depth() != *published {
                *published = cell.depth();
                changed.push((cell.coord(), cell.depth()));
            }
        }

        for (coord, depth) in &changed {
            self.emit(GridEvent::CellDepthAssigned {
                coord: *coord,
                depth: *depth,
            });
        }
        changed.len()
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Subscribes `listener` to one or more event kinds.
    pub fn on<F>(&mut self, kinds: impl Into<EventKinds>, listener: F) -> ListenerId
    where
        F: Fn(&GridEvent, &Grid) + 'static,
    {
        self.events.on(kinds, listener)
    }

    /// Unsubscribes a listener from `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    /// Unsubscribes a listener from every kind.
    pub fn off_all(&mut self, id: ListenerId) -> bool {
        self.events.off_all(id)
    }

    fn emit(&self, event: GridEvent) {
        self.events.emit(&event, self);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use isogrid_core::{
        geometry::Footprint,
        kind::{EntityKind, Sprite},
    };

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_kind(EntityKind::new("chair", Footprint::unit()))
            .with_kind(EntityKind::new("closet", Footprint::new(1, 2).unwrap()))
            .with_kind(EntityKind::new("table", Footprint::new(2, 2).unwrap()))
            .with_kind(
                EntityKind::new("lamp", Footprint::unit())
                    .with_sprite(Orientation::SouthWest, Sprite::new("lamp.png")),
            )
    }

    fn grid(columns: u32, rows: u32) -> Grid {
        GridBuilder::new(columns, rows)
            .with_catalog(catalog())
            .build()
            .unwrap()
    }

    fn occupant_map(grid: &Grid) -> Vec<Option<EntityId>> {
        grid.cells().iter().map(Cell::occupant).collect()
    }

    #[test]
    fn test_build_rejects_bad_dimensions() {
        assert!(matches!(
            GridBuilder::new(0, 3).build(),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridBuilder::new(3, 3).with_step(0).build(),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_cells_created_in_raster_order() {
        let grid = grid(3, 2);
        assert_eq!(grid.cells().len(), 6);
        assert_eq!(grid.cells()[4].coord(), Coord::new(1, 1));
        assert_eq!(grid.cell_at(2, 1).unwrap().coord(), Coord::new(2, 1));
        assert!(grid.cell_at(3, 0).is_none());
        assert!(grid.cell_at(0, 2).is_none());
    }

    #[test]
    fn test_place_marks_footprint() {
        let mut grid = grid(4, 4);
        let table = grid.add("table", 1, 1).unwrap();

        for coord in Area::new(1, 1, 3, 3).cells() {
            let cell = grid.cell(coord).unwrap();
            assert_eq!(cell.occupant(), Some(table));
            assert_eq!(cell.occupant_root(), Some(Coord::new(1, 1)));
        }
        assert!(grid.cell_at(1, 1).unwrap().is_root());
        assert!(!grid.cell_at(2, 2).unwrap().is_root());
        assert_eq!(grid.occupied_cells(grid.bounds(), None).len(), 4);
        assert_eq!(grid.find_entity_cells(table).len(), 4);
    }

    #[test]
    fn test_place_failures_leave_grid_unchanged() {
        let mut grid = grid(3, 3);
        grid.add("table", 0, 0).unwrap();
        let before = occupant_map(&grid);

        assert!(matches!(
            grid.add("chair", 1, 1),
            Err(GridError::AreaTaken { .. })
        ));
        assert!(matches!(
            grid.add("closet", 2, 2),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.add("sofa", 2, 2),
            Err(GridError::UnknownEntityKind(_))
        ));
        assert_eq!(occupant_map(&grid), before);
        assert_eq!(grid.entity_count(), 1);
    }

    #[test]
    fn test_place_attached_entity_fails() {
        let mut grid = grid(3, 3);
        let chair = grid.add("chair", 0, 0).unwrap();
        assert_eq!(grid.place(chair, 1, 1), Err(GridError::AlreadyPlaced(chair)));
    }

    #[test]
    fn test_move_may_overlap_itself() {
        let mut grid = grid(4, 4);
        let table = grid.add("table", 0, 0).unwrap();

        grid.move_entity(table, 1, 1).unwrap();
        assert_eq!(grid.entity(table).unwrap().root(), Some(Coord::new(1, 1)));
        assert!(!grid.cell_at(0, 0).unwrap().is_occupied());
        assert_eq!(grid.cell_at(1, 1).unwrap().occupant_root(), Some(Coord::new(1, 1)));
        assert_eq!(grid.cell_at(2, 2).unwrap().occupant(), Some(table));
        assert_eq!(grid.occupied_cells(grid.bounds(), None).len(), 4);
    }

    #[test]
    fn test_move_detached_places() {
        let mut grid = grid(4, 4);
        let chair = grid.create_entity("chair").unwrap();
        grid.move_entity(chair, 3, 3).unwrap();
        assert!(grid.entity(chair).unwrap().is_attached());
        assert_eq!(grid.cell_at(3, 3).unwrap().occupant(), Some(chair));
    }

    #[test]
    fn test_move_keeps_unchanged_cell_depths() {
        let mut grid = grid(5, 5);
        let table = grid.add("table", 0, 0).unwrap();
        grid.draw(0, 0);
        let depth = grid.depth_of(table);
        assert!(depth.is_some());

        // Same anchor: nothing changes, depth survives.
        grid.move_entity(table, 0, 0).unwrap();
        assert_eq!(grid.depth_of(table), depth);

        grid.move_entity(table, 1, 0).unwrap();
        assert_eq!(grid.depth_of(table), None);
    }

    #[test]
    fn test_remove_detaches_but_keeps_entity() {
        let mut grid = grid(3, 3);
        let closet = grid.add("closet", 0, 0).unwrap();

        assert!(grid.remove(closet));
        assert!(grid.is_area_free(grid.bounds(), None));
        assert!(!grid.entity(closet).unwrap().is_attached());
        assert_eq!(grid.entity_count(), 0);

        // Second removal is a no-op.
        assert!(!grid.remove(closet));

        grid.place(closet, 1, 1).unwrap();
        assert!(grid.discard_entity(closet));
        assert!(grid.entity(closet).is_none());
        assert!(grid.is_area_free(grid.bounds(), None));
        assert_eq!(grid.place(closet, 0, 0), Err(GridError::UnknownEntity(closet)));
    }

    #[test]
    fn test_rotate_transposes_footprint() {
        let mut grid = grid(4, 4);
        let closet = grid.add("closet", 0, 0).unwrap();

        assert_eq!(grid.rotate(closet, true), Ok(Orientation::NorthWest));
        assert_eq!(grid.cell_at(1, 0).unwrap().occupant(), Some(closet));
        assert!(!grid.cell_at(0, 1).unwrap().is_occupied());

        assert_eq!(grid.rotate(closet, false), Ok(Orientation::SouthWest));
        assert_eq!(grid.cell_at(0, 1).unwrap().occupant(), Some(closet));
        assert!(!grid.cell_at(1, 0).unwrap().is_occupied());
    }

    #[test]
    fn test_rotate_blocked_keeps_orientation() {
        let mut grid = grid(4, 4);
        let closet = grid.add("closet", 0, 0).unwrap();
        grid.add("chair", 1, 0).unwrap();

        assert!(matches!(
            grid.rotate(closet, true),
            Err(GridError::AreaTaken { .. })
        ));
        assert_eq!(grid.entity(closet).unwrap().orientation(), Orientation::SouthWest);

        let edge = grid.add("closet", 3, 2).unwrap();
        assert!(matches!(
            grid.rotate(edge, true),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_orientation_limited_by_sprites() {
        let mut grid = grid(3, 3);
        let lamp = grid.add("lamp", 0, 0).unwrap();

        assert!(matches!(
            grid.rotate(lamp, true),
            Err(GridError::InvalidOrientation { .. })
        ));
        assert!(matches!(
            grid.create_entity_oriented("lamp", Orientation::NorthEast),
            Err(GridError::InvalidOrientation { .. })
        ));
    }

    #[test]
    fn test_entities_in_area_skips_spans() {
        let mut grid = grid(6, 3);
        let table = grid.add("table", 0, 0).unwrap();
        let chair = grid.add("chair", 2, 1).unwrap();

        let all: Vec<_> = grid.entities_in_area(grid.bounds()).iter().map(|e| e.id).collect();
        assert_eq!(all, vec![table, chair]);

        // Starting inside the table still finds the chair right after it.
        let partial: Vec<_> = grid
            .entities_in_area(Area::new(1, 1, 6, 3))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(partial, vec![chair]);
    }

    #[test]
    fn test_events_in_operation_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);

        let mut grid = GridBuilder::new(3, 3)
            .with_catalog(catalog())
            .on(EventKind::ALL.as_slice(), move |event, _| {
                sink.borrow_mut().push(event.kind());
            })
            .build()
            .unwrap();

        let chair = grid.add("chair", 1, 1).unwrap();
        grid.move_entity(chair, 2, 2).unwrap();
        grid.rotate(chair, true).unwrap();
        grid.draw(0, 0);
        grid.remove(chair);

        let log = log.borrow();
        assert_eq!(log[0], EventKind::BeforeInit);
        assert_eq!(
            log.iter().filter(|k| **k == EventKind::CellCreated).count(),
            9
        );
        assert_eq!(log[10], EventKind::AfterInit);
        assert_eq!(
            &log[11..],
            &[
                EventKind::EntityAdded,
                EventKind::EntityMoved,
                EventKind::EntityRotated,
                EventKind::CellDepthAssigned,
                EventKind::DrawCompleted,
                EventKind::EntityRemoved,
            ]
        );
    }

    #[test]
    fn test_depth_events_only_for_changes() {
        let mut grid = grid(4, 4);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        grid.on(EventKind::CellDepthAssigned, move |event, grid| {
            if let GridEvent::CellDepthAssigned { coord, depth } = event {
                assert_eq!(grid.cell(*coord).unwrap().depth(), *depth);
                sink.borrow_mut().push(*coord);
            }
        });

        grid.add("chair", 1, 1).unwrap();
        assert_eq!(grid.draw(0, 0).changed, 1);
        assert_eq!(grid.draw(0, 0).changed, 0);
        assert_eq!(*changes.borrow(), vec![Coord::new(1, 1)]);
    }

    #[test]
    fn test_listener_removed() {
        let mut grid = grid(2, 2);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = grid.on(EventKind::EntityAdded, move |_, _| *sink.borrow_mut() += 1);

        grid.add("chair", 0, 0).unwrap();
        assert!(grid.off(EventKind::EntityAdded, id));
        grid.add("chair", 1, 1).unwrap();
        assert_eq!(*count.borrow(), 1);
    }
}
