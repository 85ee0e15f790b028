use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::location::{Dimension, Direction, Location};
use crate::wall::{all_walls, Wall};

/// A generated Alcazar board.
///
/// The board knows its dimensions, the two door cells, and the set of
/// installed interior walls. Border segments are implicitly walls, except
/// next to the entry and exit cells where they stay open as doors. A board
/// produced by [`Generator`](crate::Generator) admits exactly one Hamiltonian
/// path consistent with its walls.
pub struct Board {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) entry: Location,
    pub(crate) exit: Location,
    pub(crate) walls: HashSet<Wall>,
}

impl Board {
    /// Width of the board in cells.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Height of the board in cells.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Both dimensions, in `(width, height)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The door cell where the path enters. Always an edge cell, indexed
    /// strictly below [`exit`](Self::exit).
    pub fn entry(&self) -> Location {
        self.entry
    }

    /// The door cell where the path leaves.
    pub fn exit(&self) -> Location {
        self.exit
    }

    /// The installed interior walls.
    pub fn walls(&self) -> &HashSet<Wall> {
        &self.walls
    }

    /// Whether `wall` is installed on this board.
    pub fn has_wall(&self, wall: Wall) -> bool {
        self.walls.contains(&wall)
    }

    /// Every wall segment that may be installed on a board of these
    /// dimensions: all non-border segments.
    pub fn possible_walls(&self) -> Vec<Wall> {
        all_walls(self.dims.0, self.dims.1)
            .into_iter()
            .filter(|wall| !wall.is_border(self.dims))
            .collect()
    }

    /// Whether `wall`'s segment acts as a barrier: an installed wall, or a
    /// border segment away from the doors.
    pub fn is_barrier(&self, wall: Wall) -> bool {
        if self.walls.contains(&wall) {
            return true;
        }

        wall.is_border(self.dims) && {
            let cell = wall.inner_cell(self.dims);
            cell != self.entry && cell != self.exit
        }
    }

    /// The open-adjacency graph of the board: one node per cell, one edge per
    /// pair of adjacent cells not separated by an installed wall. Edges carry
    /// the step direction from the lower-indexed cell.
    pub fn graph(&self) -> UnGraphMap<Location, Direction> {
        let (w, h) = (self.width(), self.height());
        let mut graph = UnGraphMap::with_capacity(w * h, (w - 1) * h + w * (h - 1));

        for y in 0..h {
            for x in 0..w {
                graph.add_node(Location(x, y));
            }
        }

        for y in 0..h {
            for x in 0..w {
                let location = Location(x, y);
                // add edges down and to the right, unless walled off
                for direction in [Direction::Down, Direction::Right] {
                    let neighbor = direction.attempt_from(location);
                    if !neighbor.in_bounds(self.dims) {
                        continue;
                    }
                    if !self.walls.contains(&Wall::between(location, direction)) {
                        graph.add_edge(location, neighbor, direction);
                    }
                }
            }
        }

        graph
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (w, h) = (self.width(), self.height());
        let mut grid = Array2::from_elem((2 * h + 1, 3 * w + 1), ' ');

        for y in 0..=h {
            for x in 0..w {
                grid[[2 * y, 3 * x]] = '+';
                if self.is_barrier(Wall::horizontal(x, y)) {
                    grid[[2 * y, 3 * x + 1]] = '-';
                    grid[[2 * y, 3 * x + 2]] = '-';
                }
            }
            grid[[2 * y, 3 * w]] = '+';
        }

        for y in 0..h {
            for x in 0..=w {
                if self.is_barrier(Wall::vertical(x, y)) {
                    grid[[2 * y + 1, 3 * x]] = '|';
                }
            }
        }

        let mut out = String::with_capacity(grid.nrows() * (grid.ncols() + 1));
        for row in grid.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
