//! Entity orientation and rotation order.
//!
//! An entity faces one of four isometric directions. Two of them (`SW` and
//! `NE`) keep the entity's base footprint; the other two are quarter turns
//! and swap its axes.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Footprint;

/// Errors raised when parsing orientations or building a rotation order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    #[error("unknown orientation `{0}`, expected one of sw, nw, ne, se")]
    Unknown(String),

    #[error("rotation order must contain at least one orientation")]
    EmptyOrder,

    #[error("orientation `{0}` appears more than once in the rotation order")]
    Duplicate(Orientation),
}

/// The direction an entity faces.
///
/// The names match external configuration strings (lowercase compass
/// abbreviations).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Orientation {
    /// ↙ (default)
    #[default]
    #[serde(rename = "sw", alias = "SW")]
    SouthWest,
    /// ↖
    #[serde(rename = "nw", alias = "NW")]
    NorthWest,
    /// ↗
    #[serde(rename = "ne", alias = "NE")]
    NorthEast,
    /// ↘
    #[serde(rename = "se", alias = "SE")]
    SouthEast,
}

impl Orientation {
    /// All orientations in the default rotation order.
    pub const ALL: [Orientation; 4] = [
        Orientation::SouthWest,
        Orientation::NorthWest,
        Orientation::NorthEast,
        Orientation::SouthEast,
    ];

    /// Short uppercase name, e.g. `"SW"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SouthWest => "SW",
            Self::NorthWest => "NW",
            Self::NorthEast => "NE",
            Self::SouthEast => "SE",
        }
    }

    /// Returns `true` for the orientations that swap the footprint axes.
    pub fn is_rotated(&self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthEast)
    }

    /// The footprint `base` takes when facing this way.
    pub fn apply(&self, base: Footprint) -> Footprint {
        if self.is_rotated() {
            base.transposed()
        } else {
            base
        }
    }
}

impl FromStr for Orientation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sw" => Ok(Self::SouthWest),
            "nw" => Ok(Self::NorthWest),
            "ne" => Ok(Self::NorthEast),
            "se" => Ok(Self::SouthEast),
            _ => Err(OrientationError::Unknown(s.to_owned())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cyclic order `rotate` steps through.
///
/// Each orientation appears at most once. Orientations missing from the
/// order are still valid placements, but rotating away from them restarts
/// at the front of the order.
///
/// # Examples
///
/// ```
/// use isogrid_core::orientation::{Orientation, RotationOrder};
///
/// let order = RotationOrder::default();
/// assert_eq!(order.next(Orientation::SouthEast, true), Orientation::SouthWest);
/// assert_eq!(order.next(Orientation::SouthWest, false), Orientation::SouthEast);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Orientation>")]
pub struct RotationOrder(Vec<Orientation>);

impl RotationOrder {
    /// Builds a rotation order.
    ///
    /// # Errors
    ///
    /// Returns [`OrientationError::EmptyOrder`] for an empty list and
    /// [`OrientationError::Duplicate`] if an orientation repeats.
    pub fn new(order: Vec<Orientation>) -> Result<Self, OrientationError> {
        if order.is_empty() {
            return Err(OrientationError::EmptyOrder);
        }
        for (idx, orientation) in order.iter().enumerate() {
            if order[..idx].contains(orientation) {
                return Err(OrientationError::Duplicate(*orientation));
            }
        }
        Ok(Self(order))
    }

    pub fn as_slice(&self) -> &[Orientation] {
        &self.0
    }

    /// The orientation after `current`, stepping forward when `clockwise`
    /// and backward otherwise, wrapping at both ends.
    pub fn next(&self, current: Orientation, clockwise: bool) -> Orientation {
        let len = self.0.len();
        let Some(idx) = self.0.iter().position(|o| *o == current) else {
            return self.0[0];
        };
        let next = if clockwise {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.0[next]
    }
}

impl Default for RotationOrder {
    fn default() -> Self {
        Self(Orientation::ALL.to_vec())
    }
}

impl TryFrom<Vec<Orientation>> for RotationOrder {
    type Error = OrientationError;

    fn try_from(order: Vec<Orientation>) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_orientations_transpose() {
        let base = Footprint::new(1, 2).unwrap();

        assert_eq!(Orientation::SouthWest.apply(base), base);
        assert_eq!(Orientation::NorthEast.apply(base), base);
        assert_eq!(Orientation::NorthWest.apply(base), base.transposed());
        assert_eq!(Orientation::SouthEast.apply(base), base.transposed());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ne".parse::<Orientation>(), Ok(Orientation::NorthEast));
        assert_eq!("SE".parse::<Orientation>(), Ok(Orientation::SouthEast));
        assert!(matches!(
            "north".parse::<Orientation>(),
            Err(OrientationError::Unknown(_))
        ));
    }

    #[test]
    fn test_default_order_cycles_clockwise() {
        let order = RotationOrder::default();
        let mut current = Orientation::SouthWest;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = order.next(current, true);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Orientation::NorthWest,
                Orientation::NorthEast,
                Orientation::SouthEast,
                Orientation::SouthWest,
            ]
        );
    }

    #[test]
    fn test_counter_clockwise_is_inverse() {
        let order = RotationOrder::default();
        for orientation in Orientation::ALL {
            let there = order.next(orientation, true);
            assert_eq!(order.next(there, false), orientation);
        }
    }

    #[test]
    fn test_custom_order_validation() {
        assert_eq!(RotationOrder::new(vec![]), Err(OrientationError::EmptyOrder));
        assert_eq!(
            RotationOrder::new(vec![Orientation::NorthEast, Orientation::NorthEast]),
            Err(OrientationError::Duplicate(Orientation::NorthEast))
        );

        let order = RotationOrder::new(vec![Orientation::SouthWest, Orientation::NorthEast]).unwrap();
        assert_eq!(order.next(Orientation::NorthEast, true), Orientation::SouthWest);
    }

    #[test]
    fn test_next_from_orientation_outside_order() {
        let order = RotationOrder::new(vec![Orientation::NorthEast, Orientation::SouthEast]).unwrap();
        assert_eq!(order.next(Orientation::SouthWest, true), Orientation::NorthEast);
    }
}
