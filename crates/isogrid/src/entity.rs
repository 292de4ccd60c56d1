//! Placed entities: multi-cell occupants with an orientation-dependent
//! footprint.

use std::{fmt, rc::Rc};

use isogrid_core::{
    geometry::{Coord, Footprint},
    identifier::Id,
    kind::{EntityKind, Sprite},
    orientation::Orientation,
};

/// Handle to an entity created by a [`crate::Grid`].
///
/// Handles stay valid after the entity is removed from the grid; they only
/// go stale once the entity is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity built from a catalog [`EntityKind`].
///
/// The entity knows where it is anchored only as a coordinate; the grid is
/// the authority on which cells it occupies.
#[derive(Debug, Clone)]
pub struct PlacedEntity {
    kind: Rc<EntityKind>,
    orientation: Orientation,
    root: Option<Coord>,
}

impl PlacedEntity {
    pub(crate) fn new(kind: Rc<EntityKind>, orientation: Orientation) -> Self {
        Self {
            kind,
            orientation,
            root: None,
        }
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn kind_id(&self) -> Id {
        self.kind.id()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Anchor cell while placed, `None` while detached.
    pub fn root(&self) -> Option<Coord> {
        self.root
    }

    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }

    /// Effective footprint at the current orientation.
    pub fn footprint(&self) -> Footprint {
        self.footprint_facing(self.orientation)
    }

    /// Footprint the entity would have when facing `orientation`.
    pub fn footprint_facing(&self, orientation: Orientation) -> Footprint {
        orientation.apply(self.kind.footprint())
    }

    pub fn width(&self) -> u32 {
        self.footprint().width()
    }

    pub fn height(&self) -> u32 {
        self.footprint().height()
    }

    /// Sprite a renderer should use for the current orientation.
    pub fn sprite(&self) -> Option<&Sprite> {
        self.kind.sprite(self.orientation)
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub(crate) fn set_root(&mut self, root: Option<Coord>) {
        self.root = root;
    }
}
