//! Placement checks shared by every occupancy mutation.
//!
//! These are read-only: they answer whether a footprint would fit without
//! touching the grid, so callers can also use them for previews.

use isogrid_core::geometry::{Area, Coord, Footprint};

use crate::{entity::EntityId, error::GridError, grid::Grid};

/// The area a footprint covers when anchored at `origin`.
///
/// # Errors
///
/// [`GridError::OutOfBounds`] if the anchor or the far corner falls outside
/// the grid.
pub fn footprint_area(grid: &Grid, origin: Coord, footprint: Footprint) -> Result<Area, GridError> {
    let out_of_bounds = || GridError::OutOfBounds { origin, footprint };

    if grid.cell(origin).is_none() {
        return Err(out_of_bounds());
    }
    let area = Area::from_origin(origin, footprint).ok_or_else(out_of_bounds)?;
    let far = area.far_corner().ok_or_else(out_of_bounds)?;
    if grid.cell(far).is_none() {
        return Err(out_of_bounds());
    }
    Ok(area)
}

/// Checks that `footprint` fits at `origin` and that every cell it covers is
/// empty or owned by `ignoring`.
///
/// # Errors
///
/// [`GridError::OutOfBounds`] or [`GridError::AreaTaken`].
pub fn validate(
    grid: &Grid,
    origin: Coord,
    footprint: Footprint,
    ignoring: Option<EntityId>,
) -> Result<Area, GridError> {
    let area = footprint_area(grid, origin, footprint)?;
    if !grid.is_area_free(area, ignoring) {
        return Err(GridError::AreaTaken { area });
    }
    Ok(area)
}

/// Returns `true` if `entity` could be anchored at `(x, y)` in its current
/// orientation. Cells the entity already covers count as free.
pub fn can_place(grid: &Grid, entity: EntityId, x: u32, y: u32) -> bool {
    grid.entity(entity).is_some_and(|placed| {
        validate(grid, Coord::new(x, y), placed.footprint(), Some(entity)).is_ok()
    })
}
