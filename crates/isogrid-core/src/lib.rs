//! Isogrid Core Types
//!
//! This crate provides the value types shared by the isogrid scene model:
//!
//! - **Identifiers**: interned entity kind names ([`identifier::Id`])
//! - **Geometry**: cell coordinates, footprints and areas ([`geometry`] module)
//! - **Orientation**: facing directions and rotation order ([`orientation`] module)
//! - **Depth**: the stacking key handed to renderers ([`depth::Depth`])
//! - **Kinds**: entity templates with sprite tables ([`kind`] module)

pub mod depth;
pub mod geometry;
pub mod identifier;
pub mod kind;
pub mod orientation;
