//! The entity catalog: named kinds a grid can build entities from.

use std::rc::Rc;

use indexmap::IndexMap;

use isogrid_core::{identifier::Id, kind::EntityKind};

/// Insertion-ordered collection of [`EntityKind`]s keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    kinds: IndexMap<Id, Rc<EntityKind>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a kind, replacing any previous kind of the same name.
    pub fn insert(&mut self, kind: EntityKind) {
        self.kinds.insert(kind.id(), Rc::new(kind));
    }

    /// Builder-style [`Catalog::insert`].
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.insert(kind);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Rc<EntityKind>> {
        self.kinds.get(&Id::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(&Id::new(name))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityKind> {
        self.kinds.values().map(Rc::as_ref)
    }
}

impl FromIterator<EntityKind> for Catalog {
    fn from_iter<T: IntoIterator<Item = EntityKind>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for kind in iter {
            catalog.insert(kind);
        }
        catalog
    }
}
