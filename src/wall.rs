use unordered_pair::UnorderedPair;

use crate::location::{Coord, Dimension, Direction, Location};

/// The two ways a wall segment can lie on the grid.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Orientation {
    /// A segment between two vertically adjacent cells (or on the top/bottom border).
    Horizontal,
    /// A segment between two horizontally adjacent cells (or on the left/right border).
    Vertical,
}

/// A single wall segment, identified by position and orientation.
///
/// A vertical wall at `(x, y)` occupies the segment between cells `(x-1, y)`
/// and `(x, y)`, so valid positions have `x` in `0..=width` and `y` in
/// `0..height`; `x` of `0` or `width` puts the segment on the border.
/// A horizontal wall at `(x, y)` occupies the segment between cells
/// `(x, y-1)` and `(x, y)`, with `x` in `0..width`, `y` in `0..=height`, and
/// `y` of `0` or `height` on the border.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Wall {
    /// Anchor cell position of the segment.
    pub position: Location,
    /// Which way the segment lies.
    pub orientation: Orientation,
}

impl Wall {
    /// A horizontal wall anchored at `(x, y)`.
    pub fn horizontal(x: Coord, y: Coord) -> Self {
        Self { position: Location(x, y), orientation: Orientation::Horizontal }
    }

    /// A vertical wall anchored at `(x, y)`.
    pub fn vertical(x: Coord, y: Coord) -> Self {
        Self { position: Location(x, y), orientation: Orientation::Vertical }
    }

    /// Whether this position/orientation combination names a real segment of
    /// a `dims` board.
    pub fn in_bounds(&self, dims: (Dimension, Dimension)) -> bool {
        let (w, h) = (dims.0.get(), dims.1.get());
        match self.orientation {
            Orientation::Horizontal => self.position.0 < w && self.position.1 <= h,
            Orientation::Vertical => self.position.0 <= w && self.position.1 < h,
        }
    }

    /// Whether this segment lies on the outer perimeter of a `dims` board.
    pub fn is_border(&self, dims: (Dimension, Dimension)) -> bool {
        match self.orientation {
            Orientation::Horizontal => self.position.1 == 0 || self.position.1 == dims.1.get(),
            Orientation::Vertical => self.position.0 == 0 || self.position.0 == dims.0.get(),
        }
    }

    /// The two cells this segment separates, or [`None`] for a border
    /// segment, which has a cell on only one side.
    pub fn separated_cells(&self, dims: (Dimension, Dimension)) -> Option<UnorderedPair<Location>> {
        if self.is_border(dims) {
            return None;
        }

        let Location(x, y) = self.position;
        Some(match self.orientation {
            Orientation::Horizontal => UnorderedPair(Location(x, y - 1), Location(x, y)),
            Orientation::Vertical => UnorderedPair(Location(x - 1, y), Location(x, y)),
        })
    }

    /// The single in-board cell a border segment touches.
    ///
    /// For non-border segments this is the higher-indexed of the two
    /// separated cells and not meaningful on its own.
    pub(crate) fn inner_cell(&self, dims: (Dimension, Dimension)) -> Location {
        let (w, h) = (dims.0.get(), dims.1.get());
        let Location(x, y) = self.position;
        match self.orientation {
            Orientation::Horizontal => Location(x, if y == h { h - 1 } else { y }),
            Orientation::Vertical => Location(if x == w { w - 1 } else { x }, y),
        }
    }

    /// The wall crossed when stepping from `cell` toward `direction`.
    pub fn between(cell: Location, direction: Direction) -> Self {
        let Location(x, y) = cell;
        match direction {
            Direction::Up => Self::horizontal(x, y),
            Direction::Down => Self::horizontal(x, y + 1),
            Direction::Left => Self::vertical(x, y),
            Direction::Right => Self::vertical(x + 1, y),
        }
    }
}

/// Every wall segment of a `width` by `height` board exactly once, in a fixed
/// canonical order: vertical segments row by row, then horizontal segments
/// row by row.
pub fn all_walls(width: Dimension, height: Dimension) -> Vec<Wall> {
    let (w, h) = (width.get(), height.get());
    let mut walls = Vec::with_capacity(w * (h + 1) + (w + 1) * h);

    for y in 0..h {
        for x in 0..=w {
            walls.push(Wall::vertical(x, y));
        }
    }
    for y in 0..=h {
        for x in 0..w {
            walls.push(Wall::horizontal(x, y));
        }
    }

    walls
}
