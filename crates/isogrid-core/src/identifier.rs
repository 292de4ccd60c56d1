//! Interned names for entity kinds.
//!
//! Catalog lookups compare kind names on every entity construction, so names
//! are interned once and carried around as a copyable [`Id`].

use std::{
    convert::Infallible,
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Name of an entity kind in a [`crate::kind::EntityKind`] catalog.
///
/// Two ids are equal exactly when they were created from the same string.
///
/// # Examples
///
/// ```
/// use isogrid_core::identifier::Id;
///
/// let rack = Id::new("rack");
/// assert_eq!(rack, Id::new("rack"));
/// assert_eq!(rack, "rack");
/// assert_eq!(rack.to_string(), "rack");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the interned name as an owned string.
    pub fn name(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = Id::new("bench-red");
        let b = Id::new("bench-red");
        let c = Id::new("glass-wall");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_roundtrips_name() {
        let id = Id::new("closet");
        assert_eq!(format!("{id}"), "closet");
        assert_eq!(id.name(), "closet");
    }

    #[test]
    fn test_from_str_and_from() {
        let parsed: Id = "rack".parse().unwrap();
        let converted: Id = "rack".into();
        assert_eq!(parsed, converted);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("window");
        assert!(id == "window");
        assert!(id != "door");

        let name = String::from("window");
        assert!(id == name.as_str());
    }

    #[test]
    fn test_usable_as_map_key() {
        use std::collections::HashMap;

        let mut sizes = HashMap::new();
        sizes.insert(Id::new("rack"), (1, 2));
        sizes.insert(Id::new("chair"), (1, 1));

        assert_eq!(sizes.get(&Id::new("rack")), Some(&(1, 2)));
        assert_eq!(sizes.len(), 2);
    }
}
