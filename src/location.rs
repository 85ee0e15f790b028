use std::num::NonZero;

use itertools::Itertools;
use strum::VariantArray;

/// One board axis coordinate.
pub type Coord = usize;
/// A board dimension; boards always have at least one row and one column.
pub type Dimension = NonZero<Coord>;

/// A cell position on the board, in `(x, y)` order with the origin at the
/// top-left corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row-major cell index of this location on a board `width` cells wide.
    pub fn index(&self, width: Coord) -> usize {
        self.0 + self.1 * width
    }

    /// The location with row-major cell index `index` on a board `width` cells wide.
    pub fn from_index(index: usize, width: Coord) -> Self {
        Self(index % width, index / width)
    }

    /// Offset this location by a signed step, wrapping on underflow.
    ///
    /// Out-of-range results are filtered by bounds checks at the use site;
    /// wrapping turns a step off the top or left edge into a huge coordinate
    /// which no bounds check accepts.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn in_bounds(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

/// A cardinal step between cells of the rectangular grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Toward smaller `y`.
    Up,
    /// Toward greater `y`.
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward greater `x`.
    Right,
}

impl Direction {
    /// Attempt the step from `location` in the direction specified by `self`
    /// and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// All in-bounds neighbours of `location`, with the direction leading to each.
    pub(crate) fn neighbors_of(location: Location, dims: (Dimension, Dimension)) -> Vec<(Self, Location)> {
        Self::VARIANTS
            .iter()
            .map(|dir| (*dir, dir.attempt_from(location)))
            .filter(|(_, loc)| loc.in_bounds(dims))
            .collect_vec()
    }
}

/// Every boundary cell of a `width` by `height` board, each listed exactly
/// once: the top and bottom rows first, then the remainder of the left and
/// right columns.
pub fn edge_cells(width: Dimension, height: Dimension) -> Vec<Location> {
    let (w, h) = (width.get(), height.get());
    let mut cells = Vec::with_capacity(2 * (w + h).saturating_sub(2));

    for x in 0..w {
        cells.push(Location(x, 0));
        if h > 1 {
            cells.push(Location(x, h - 1));
        }
    }
    for y in 1..h.saturating_sub(1) {
        cells.push(Location(0, y));
        if w > 1 {
            cells.push(Location(w - 1, y));
        }
    }

    cells
}
