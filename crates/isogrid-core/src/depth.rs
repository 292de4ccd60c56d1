use std::fmt;

/// Stacking key assigned to an entity's root cell.
///
/// Higher values are drawn in front of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Depth(u32);

impl Depth {
    #[inline]
    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The key one `step` in front of this one.
    #[inline]
    pub const fn above(self, step: u32) -> Self {
        Self(self.0.saturating_add(step))
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
