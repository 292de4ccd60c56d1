//! Integer grid geometry.
//!
//! - [`Coord`]: a cell coordinate, ordered in raster order (row, then column)
//! - [`Footprint`]: the width and height an entity covers, in cells
//! - [`Area`]: a half-open rectangle of cells

use std::{cmp::Ordering, fmt};

use serde::Deserialize;

/// A cell coordinate on the grid.
///
/// `x` is the column and `y` the row. The [`Ord`] implementation follows
/// raster order: rows first, then columns, which is the scan order used by
/// the depth resolver.
///
/// # Examples
///
/// ```
/// use isogrid_core::geometry::Coord;
///
/// let a = Coord::new(5, 0);
/// let b = Coord::new(0, 1);
/// assert!(a < b); // earlier row wins
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u32; 2]")]
pub struct Coord {
    x: u32,
    y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Sum of both axes; the baseline depth of a cell with no dependencies.
    pub fn diagonal(&self) -> u32 {
        self.x + self.y
    }
}

impl From<[u32; 2]> for Coord {
    fn from([x, y]: [u32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The rectangular span of cells an entity covers.
///
/// Both dimensions are at least one cell. Deserializes from a `[width,
/// height]` pair and rejects zero dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "[u32; 2]")]
pub struct Footprint {
    width: u32,
    height: u32,
}

impl Footprint {
    /// Creates a footprint, or `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// A single-cell footprint.
    pub const fn unit() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The same footprint with its axes swapped.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl TryFrom<[u32; 2]> for Footprint {
    type Error = String;

    fn try_from([width, height]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(width, height)
            .ok_or_else(|| format!("footprint [{width}, {height}] must be at least 1x1"))
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A half-open rectangle of cells, `[x0, x1) × [y0, y1)`.
///
/// Areas with `x1 <= x0` or `y1 <= y0` are empty and contain no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Area {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Area {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// The area covered by `footprint` anchored at `origin`.
    ///
    /// Returns `None` if the far edge does not fit in `u32`.
    pub fn from_origin(origin: Coord, footprint: Footprint) -> Option<Self> {
        let x1 = origin.x.checked_add(footprint.width)?;
        let y1 = origin.y.checked_add(footprint.height)?;
        Some(Self::new(origin.x, origin.y, x1, y1))
    }

    /// The area spanning from the grid origin up to (excluding) `x1, y1`.
    pub const fn up_to(x1: u32, y1: u32) -> Self {
        Self::new(0, 0, x1, y1)
    }

    pub fn x0(&self) -> u32 {
        self.x0
    }

    pub fn y0(&self) -> u32 {
        self.y0
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn origin(&self) -> Coord {
        Coord::new(self.x0, self.y0)
    }

    /// The last cell inside the area, or `None` if the area is empty.
    pub fn far_corner(&self) -> Option<Coord> {
        if self.is_empty() {
            return None;
        }
        Some(Coord::new(self.x1 - 1, self.y1 - 1))
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.x0..self.x1).contains(&coord.x) && (self.y0..self.y1).contains(&coord.y)
    }

    /// Returns `true` if both areas share at least one cell.
    pub fn intersects(&self, other: &Area) -> bool {
        !self.intersection(other).is_empty()
    }

    /// The cells shared by both areas; may be empty.
    pub fn intersection(&self, other: &Area) -> Area {
        Area::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// Iterates the cells of the area in raster order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let Area { x0, y0, x1, y1 } = *self;
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| Coord::new(x, y)))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.far_corner() {
            Some(far) => write!(f, "{{{}, {}}}", self.origin(), far),
            None => write!(f, "{{empty at {}}}", self.origin()),
        }
    }
}
