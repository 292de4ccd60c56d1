//! Error types for isogrid operations.
//!
//! [`GridError`] covers everything a single grid operation can reject.
//! [`IsogridError`] is the top-level error of the scene pipeline and wraps
//! grid errors together with I/O and scene parsing failures.

use std::io;

use thiserror::Error;

use isogrid_core::{
    geometry::{Area, Coord, Footprint},
    identifier::Id,
    orientation::Orientation,
};

use crate::entity::EntityId;

/// Errors returned by [`crate::Grid`] operations.
///
/// All of them are raised synchronously by the offending call and leave the
/// grid unchanged. None are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("entity {footprint} cannot be placed at {origin} as it would go out of bounds")]
    OutOfBounds { origin: Coord, footprint: Footprint },

    #[error("area {area} is taken by another entity")]
    AreaTaken { area: Area },

    #[error("invalid orientation `{orientation}` for `{kind}` entity")]
    InvalidOrientation { kind: Id, orientation: Orientation },

    #[error("entity kind `{0}` is not in the catalog")]
    UnknownEntityKind(String),

    #[error("entity {0} does not belong to this grid")]
    UnknownEntity(EntityId),

    #[error("entity {0} is already placed; move it instead")]
    AlreadyPlaced(EntityId),

    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),
}

/// The main error type of the scene pipeline.
#[derive(Debug, Error)]
pub enum IsogridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Scene error: {0}")]
    Scene(String),
}

impl IsogridError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
