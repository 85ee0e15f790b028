#![warn(missing_docs)]

//! # `alcazar`
//!
//! A generator for [Alcazar](https://www.theincrediblecompany.com/alcazar) puzzles: rectangular
//! boards on which the solver must draw a path entering through one door, visiting every cell
//! exactly once, and leaving through the other door, without crossing any wall.
//! Begin by building a [`Generator`] with [`Generator::with_dims`], optionally fix a seed with
//! [`Generator::seed`], and call [`Generator::generate`] to obtain a [`Board`] that is
//! guaranteed to have exactly one solution.
//!
//! # Internals
//! This crate is driven by expressing board validity as a Boolean satisfiability problem (a
//! "SAT") and querying an incremental solver about it, rather than by searching over the board
//! directly.
//!
//! A high level overview is as follows:
//!
//! One block of variables places cells on path positions, so that a model of the formula is a
//! Hamiltonian path across the grid. Two more literals per wall segment state whether the
//! segment is installed and whether it acts as a barrier, and a small per-cell "node
//! orientation" block forces every cell to sit between exactly two barriers while keeping the
//! overall wall pattern geometrically consistent. Installed walls forbid the path from crossing
//! them, and installed border segments close cells off from serving as doors.
//!
//! Generation then works in two phases over a single growing formula. Random doors are assumed
//! together with "no walls installed" until the solver yields a path; a blocking clause excludes
//! that path from every later query. Each wall that would not sever the sampled path is then
//! tested under assumptions: if a second path appears as soon as the wall is dropped, the wall
//! is essential to uniqueness and is kept, otherwise it is committed to be absent. The walls
//! that survive are installed on the returned board.
//!
//! Boards much larger than 8×8 are impractical: the Hamiltonian encoding grows with the cube of
//! the cell count.

pub use board::Board;
pub use generator::{GenerateError, Generator};
pub use location::{edge_cells, Coord, Dimension, Direction, Location};
pub use path::Path;
pub use sat::SolverError;
pub use wall::{all_walls, Orientation, Wall};

pub(crate) mod board;
mod tests;
pub(crate) mod encode;
pub(crate) mod generator;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod path;
pub(crate) mod sat;
pub(crate) mod wall;
