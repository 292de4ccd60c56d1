//! Entity kinds: the catalog entries entities are built from.
//!
//! A kind carries everything that is shared by all entities of the same
//! name: the base footprint, the orientation new entities face, and the
//! sprite a renderer should pick for each orientation. The core never looks
//! inside a [`Sprite`]; it only uses the sprite table to decide which
//! orientations are valid.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{geometry::Footprint, identifier::Id, orientation::Orientation};

/// Renderer-facing image reference for one orientation.
///
/// `offset` is `[top, left]` in renderer units, applied when the sprite is
/// anchored on its root cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Sprite {
    image: String,
    #[serde(default)]
    offset: [i32; 2],
}

impl Sprite {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            offset: [0, 0],
        }
    }

    pub fn with_offset(mut self, top: i32, left: i32) -> Self {
        self.offset = [top, left];
        self
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn offset_top(&self) -> i32 {
        self.offset[0]
    }

    pub fn offset_left(&self) -> i32 {
        self.offset[1]
    }
}

/// A named entity template.
///
/// # Examples
///
/// ```
/// use isogrid_core::{
///     geometry::Footprint,
///     kind::{EntityKind, Sprite},
///     orientation::Orientation,
/// };
///
/// let closet = EntityKind::new("closet", Footprint::new(1, 2).unwrap())
///     .with_orientation(Orientation::NorthWest)
///     .with_sprite(Orientation::NorthWest, Sprite::new("closet-nw.png"));
///
/// assert!(closet.supports(Orientation::NorthWest));
/// assert!(!closet.supports(Orientation::SouthEast));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKind {
    id: Id,
    footprint: Footprint,
    orientation: Orientation,
    sprites: IndexMap<Orientation, Sprite>,
}

impl EntityKind {
    /// Creates a kind facing [`Orientation::SouthWest`] with no sprites.
    pub fn new(name: &str, footprint: Footprint) -> Self {
        Self {
            id: Id::new(name),
            footprint,
            orientation: Orientation::default(),
            sprites: IndexMap::new(),
        }
    }

    /// Sets the orientation new entities of this kind face.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Adds (or replaces) the sprite for `orientation`.
    pub fn with_sprite(mut self, orientation: Orientation, sprite: Sprite) -> Self {
        self.sprites.insert(orientation, sprite);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Footprint at a non-rotated orientation.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Orientation new entities face unless told otherwise.
    pub fn default_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn sprites(&self) -> &IndexMap<Orientation, Sprite> {
        &self.sprites
    }

    pub fn sprite(&self, orientation: Orientation) -> Option<&Sprite> {
        self.sprites.get(&orientation)
    }

    /// Returns `true` if an entity of this kind may face `orientation`.
    ///
    /// A kind without any sprites accepts every orientation.
    pub fn supports(&self, orientation: Orientation) -> bool {
        self.sprites.is_empty() || self.sprites.contains_key(&orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rack() -> EntityKind {
        EntityKind::new("rack", Footprint::new(1, 2).unwrap())
    }

    #[test]
    fn test_defaults() {
        let kind = rack();
        assert_eq!(kind.id(), "rack");
        assert_eq!(kind.default_orientation(), Orientation::SouthWest);
        assert!(kind.sprites().is_empty());
    }

    #[test]
    fn test_without_sprites_supports_everything() {
        let kind = rack();
        assert!(Orientation::ALL.iter().all(|o| kind.supports(*o)));
    }

    #[test]
    fn test_sprites_restrict_orientations() {
        let kind = rack()
            .with_sprite(Orientation::SouthWest, Sprite::new("rack-sw.png"))
            .with_sprite(
                Orientation::NorthEast,
                Sprite::new("rack-ne.png").with_offset(-20, 4),
            );

        assert!(kind.supports(Orientation::SouthWest));
        assert!(kind.supports(Orientation::NorthEast));
        assert!(!kind.supports(Orientation::NorthWest));

        let sprite = kind.sprite(Orientation::NorthEast).unwrap();
        assert_eq!(sprite.image(), "rack-ne.png");
        assert_eq!(sprite.offset_top(), -20);
        assert_eq!(sprite.offset_left(), 4);
    }
}
