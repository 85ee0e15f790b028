use std::collections::HashSet;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::location::{Dimension, Location};
use crate::wall::Wall;

/// A Hamiltonian path over the board, as a position-ordered list of cells.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    cells: Vec<Location>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Location>) -> Self {
        Self { cells }
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells of the path, entry first.
    pub fn cells(&self) -> &[Location] {
        &self.cells
    }

    /// The first cell of the path.
    pub fn entry(&self) -> Location {
        self.cells[0]
    }

    /// The last cell of the path.
    pub fn exit(&self) -> Location {
        self.cells[self.cells.len() - 1]
    }

    /// Filter `walls` down to those whose installation would not sever two
    /// consecutive cells of this path.
    pub fn nonblocking_walls(&self, walls: Vec<Wall>, dims: (Dimension, Dimension)) -> Vec<Wall> {
        let crossed: HashSet<UnorderedPair<Location>> = self
            .cells
            .windows(2)
            .map(|step| UnorderedPair(step[0], step[1]))
            .collect();

        walls
            .into_iter()
            .filter(|wall| match wall.separated_cells(dims) {
                Some(pair) => !crossed.contains(&pair),
                // a border segment never lies between two path cells
                None => true,
            })
            .collect_vec()
    }
}
