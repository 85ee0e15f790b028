use std::collections::HashMap;

use itertools::Itertools;
use varisat::Lit;

use crate::location::{edge_cells, Dimension, Direction, Location};
use crate::logic::{at_least_two, at_most_two};
use crate::path::Path;
use crate::sat::SatProblem;
use crate::wall::{all_walls, Wall};

/// The CNF characterization of valid boards and paths on one grid, together
/// with the registries mapping cells, positions and walls to literals.
///
/// Two literals exist per wall segment: the `wall` literal says the segment
/// is installed on the final board, the `edge` literal says the segment acts
/// as a barrier (installed, or part of the implicitly walled border). The
/// former implies the latter. A pair of node literals per cell orients that
/// cell's interior lattice corner toward one of its four incident segments,
/// which ties the barrier pattern into a consistent region structure.
pub(crate) struct Encoding {
    dims: (Dimension, Dimension),
    field_pos: Vec<Lit>,
    wall_lits: HashMap<Wall, Lit>,
    edge_lits: HashMap<Wall, Lit>,
    // (nw, ne) per cell, row-major
    node_lits: Vec<(Lit, Lit)>,
}

impl Encoding {
    /// Allocate every variable and emit the full formula into `sat`.
    pub(crate) fn build(dims: (Dimension, Dimension), sat: &mut SatProblem) -> Self {
        let (w, h) = (dims.0.get(), dims.1.get());
        let len = w * h;

        let mut field_pos = Vec::with_capacity(len * len);
        for _field in 0..len {
            for _pos in 0..len {
                field_pos.push(sat.new_lit());
            }
        }

        let mut wall_lits = HashMap::new();
        let mut edge_lits = HashMap::new();
        for wall in all_walls(dims.0, dims.1) {
            let wall_lit = sat.new_lit();
            let edge_lit = sat.new_lit();
            // an installed wall is always a barrier
            sat.add_clause(&[!wall_lit, edge_lit]);
            wall_lits.insert(wall, wall_lit);
            edge_lits.insert(wall, edge_lit);
        }

        let mut node_lits = Vec::with_capacity(len);
        for _cell in 0..len {
            node_lits.push((sat.new_lit(), sat.new_lit()));
        }

        let encoding = Self { dims, field_pos, wall_lits, edge_lits, node_lits };
        encoding.cell_barrier_count(sat);
        encoding.corner_seeding(sat);
        encoding.node_orientation(sat);
        encoding.wall_coverage(sat);
        encoding.interior_corners(sat);
        encoding.path_positions(sat);
        encoding.path_adjacency(sat);
        encoding.walls_block_path(sat);
        encoding.path_endpoints(sat);
        encoding.walls_block_doors(sat);
        encoding
    }

    pub(crate) fn width(&self) -> usize {
        self.dims.0.get()
    }

    pub(crate) fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Number of cells, which is also the number of path positions.
    pub(crate) fn path_length(&self) -> usize {
        self.width() * self.height()
    }

    /// The literal for "cell `field` occupies path position `pos`".
    pub(crate) fn field_lit(&self, field: usize, pos: usize) -> Lit {
        self.field_pos[field * self.path_length() + pos]
    }

    /// The literal for "this segment is installed on the final board".
    pub(crate) fn wall_lit(&self, wall: Wall) -> Lit {
        *self.wall_lits.get(&wall).unwrap()
    }

    /// The barrier literal of a segment, or [`None`] for a position outside
    /// the grid. Treating segments beyond the border as unconstrained leaves
    /// their clauses vacuous, which matches the geometry: the region outside
    /// the grid is walled.
    pub(crate) fn edge_lit(&self, wall: Wall) -> Option<Lit> {
        self.edge_lits.get(&wall).copied()
    }

    fn node_nw(&self, x: usize, y: usize) -> Lit {
        self.node_lits[y * self.width() + x].0
    }

    fn node_ne(&self, x: usize, y: usize) -> Lit {
        self.node_lits[y * self.width() + x].1
    }

    // every cell is surrounded by exactly two barriers and two openings
    fn cell_barrier_count(&self, sat: &mut SatProblem) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let surrounding = [
                    self.edge_lit(Wall::horizontal(x, y)).unwrap(),
                    self.edge_lit(Wall::vertical(x + 1, y)).unwrap(),
                    self.edge_lit(Wall::horizontal(x, y + 1)).unwrap(),
                    self.edge_lit(Wall::vertical(x, y)).unwrap(),
                ];

                for clause in at_most_two(&surrounding) {
                    sat.add_clause(&clause);
                }
                for clause in at_least_two(&surrounding) {
                    sat.add_clause(&clause);
                }
            }
        }
    }

    // each grid corner carries at least one of its two border segments, so
    // the two-barrier count stays reachable there
    fn corner_seeding(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());
        let corner_segments = [
            (Wall::horizontal(0, 0), Wall::vertical(0, 0)),
            (Wall::horizontal(w - 1, 0), Wall::vertical(w, 0)),
            (Wall::horizontal(0, h), Wall::vertical(0, h - 1)),
            (Wall::horizontal(w - 1, h), Wall::vertical(w, h - 1)),
        ];

        for (first, second) in corner_segments {
            sat.add_clause(&[self.edge_lit(first).unwrap(), self.edge_lit(second).unwrap()]);
        }
    }

    // the node of cell (x, y) sits on the lattice corner (x+1, y+1); its
    // orientation must point along a barrier and away from convex corners
    fn node_orientation(&self, sat: &mut SatProblem) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let nw = self.node_nw(x, y);
                let ne = self.node_ne(x, y);
                let sw = !ne;
                let se = !nw;

                let wall_n = self.edge_lit(Wall::vertical(x + 1, y)).unwrap();
                let wall_w = self.edge_lit(Wall::horizontal(x, y + 1)).unwrap();
                let wall_e = self.edge_lit(Wall::horizontal(x + 1, y + 1));
                let wall_s = self.edge_lit(Wall::vertical(x + 1, y + 1));

                // the oriented direction points at a barrier
                sat.add_clause(&[!nw, !ne, wall_n]);
                if let Some(wall_s) = wall_s {
                    sat.add_clause(&[!sw, !se, wall_s]);
                }
                if let Some(wall_e) = wall_e {
                    sat.add_clause(&[!ne, !se, wall_e]);
                }
                sat.add_clause(&[!nw, !sw, wall_w]);

                // the orientation is not into a corner
                if let Some(wall_e) = wall_e {
                    sat.add_clause(&[wall_n, wall_e, !ne]);
                    if let Some(wall_s) = wall_s {
                        sat.add_clause(&[wall_s, wall_e, !se]);
                    }
                }
                sat.add_clause(&[wall_n, wall_w, !nw]);
                if let Some(wall_s) = wall_s {
                    sat.add_clause(&[wall_s, wall_w, !sw]);
                }
            }
        }
    }

    // every interior wall must be claimed by a node pointing along it, and
    // the nodes at its two ends must not both point inward
    fn wall_coverage(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());

        for y in 1..h {
            for x in 1..w.saturating_sub(1) {
                let wall = self.edge_lit(Wall::horizontal(x, y)).unwrap();
                let wall_n = self.edge_lit(Wall::horizontal(x, y - 1)).unwrap();
                let wall_s = self.edge_lit(Wall::horizontal(x, y + 1)).unwrap();
                let west_ne = self.node_ne(x - 1, y - 1);
                let west_se = !self.node_nw(x - 1, y - 1);
                let east_nw = self.node_nw(x, y - 1);
                let east_sw = !self.node_ne(x, y - 1);

                // opposing nodes don't orient toward each other
                sat.add_clause(&[!west_ne, !west_se, !east_nw, !east_sw]);

                // at least one opposing node points away from each parallel wall
                sat.add_clause(&[!west_ne, !east_nw, !wall_n]);
                sat.add_clause(&[!west_se, !east_sw, !wall_s]);

                // the wall is covered by some pointing node
                sat.add_clause(&[!wall, west_ne, east_nw]);
                sat.add_clause(&[!wall, west_ne, east_sw]);
                sat.add_clause(&[!wall, west_se, east_nw]);
                sat.add_clause(&[!wall, west_se, east_sw]);
            }
        }

        for y in 1..h.saturating_sub(1) {
            for x in 1..w {
                let wall = self.edge_lit(Wall::vertical(x, y)).unwrap();
                let wall_w = self.edge_lit(Wall::vertical(x - 1, y)).unwrap();
                let wall_e = self.edge_lit(Wall::vertical(x + 1, y)).unwrap();
                let north_se = !self.node_nw(x - 1, y - 1);
                let north_sw = !self.node_ne(x - 1, y - 1);
                let south_ne = self.node_ne(x - 1, y);
                let south_nw = self.node_nw(x - 1, y);

                sat.add_clause(&[!north_se, !north_sw, !south_ne, !south_nw]);

                sat.add_clause(&[!north_se, !south_ne, !wall_e]);
                sat.add_clause(&[!north_sw, !south_nw, !wall_w]);

                sat.add_clause(&[!wall, north_se, south_ne]);
                sat.add_clause(&[!wall, north_se, south_nw]);
                sat.add_clause(&[!wall, north_sw, south_ne]);
                sat.add_clause(&[!wall, north_sw, south_nw]);
            }
        }
    }

    // the four nodes around a non-border cell must not all point inward
    fn interior_corners(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());

        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let inward = [
                    !self.node_nw(x, y),
                    self.node_ne(x, y + 1),
                    !self.node_ne(x + 1, y),
                    self.node_nw(x + 1, y + 1),
                ];

                for clause in at_most_two(&inward) {
                    sat.add_clause(&clause);
                }
            }
        }
    }

    // every cell appears at exactly one position, every position holds
    // exactly one cell
    fn path_positions(&self, sat: &mut SatProblem) {
        let len = self.path_length();

        // (f@0 + f@1 + ... + f@L-1) for all f
        for field in 0..len {
            let clause = (0..len).map(|pos| self.field_lit(field, pos)).collect_vec();
            sat.add_clause(&clause);
        }

        // f@i -> !f@j for all f, i != j
        for field in 0..len {
            for pos1 in 0..len {
                for pos2 in pos1 + 1..len {
                    sat.add_clause(&[!self.field_lit(field, pos1), !self.field_lit(field, pos2)]);
                }
            }
        }

        // (0@p + 1@p + ... + L-1@p) for all p
        for pos in 0..len {
            let clause = (0..len).map(|field| self.field_lit(field, pos)).collect_vec();
            sat.add_clause(&clause);
        }

        // i@p -> !j@p for all p, i != j
        for pos in 0..len {
            for field1 in 0..len {
                for field2 in field1 + 1..len {
                    sat.add_clause(&[!self.field_lit(field1, pos), !self.field_lit(field2, pos)]);
                }
            }
        }
    }

    // consecutive path positions occur only between grid neighbours
    fn path_adjacency(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());
        let len = self.path_length();

        for y in 0..h {
            for x in 0..w {
                let cell = Location(x, y);
                let field = cell.index(w);

                let neighbours = Direction::neighbors_of(cell, self.dims)
                    .into_iter()
                    .map(|(_, loc)| loc.index(w))
                    .collect_vec();
                let non_neighbours = (0..len)
                    .filter(|f| *f != field && !neighbours.contains(f))
                    .collect_vec();

                for p in 0..len - 1 {
                    // f@p -> some neighbour at p+1
                    let mut clause = vec![!self.field_lit(field, p)];
                    clause.extend(neighbours.iter().map(|n| self.field_lit(*n, p + 1)));
                    sat.add_clause(&clause);

                    // f@p+1 -> some neighbour at p
                    let mut clause = vec![!self.field_lit(field, p + 1)];
                    clause.extend(neighbours.iter().map(|n| self.field_lit(*n, p)));
                    sat.add_clause(&clause);

                    // f@p -> !g@p+1 for all non-neighbours g
                    for g in &non_neighbours {
                        sat.add_clause(&[!self.field_lit(field, p), !self.field_lit(*g, p + 1)]);
                    }
                }
            }
        }
    }

    // an installed wall forbids the path from crossing its segment
    fn walls_block_path(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());
        let len = self.path_length();

        for y in 0..h {
            for x in 0..w {
                let cell = Location(x, y);
                let field = cell.index(w);

                for (direction, neighbour) in Direction::neighbors_of(cell, self.dims) {
                    let wall = self.wall_lit(Wall::between(cell, direction));
                    let neighbour_field = neighbour.index(w);

                    for p in 0..len - 1 {
                        sat.add_clause(&[
                            !wall,
                            !self.field_lit(field, p),
                            !self.field_lit(neighbour_field, p + 1),
                        ]);
                    }
                }
            }
        }
    }

    // the path starts and ends on the boundary, with the entry cell indexed
    // strictly below the exit cell to break the reversal symmetry
    fn path_endpoints(&self, sat: &mut SatProblem) {
        let w = self.width();
        let last = self.path_length() - 1;
        let boundary = edge_cells(self.dims.0, self.dims.1);

        let entry_clause = boundary.iter().map(|c| self.field_lit(c.index(w), 0)).collect_vec();
        let exit_clause = boundary.iter().map(|c| self.field_lit(c.index(w), last)).collect_vec();
        sat.add_clause(&entry_clause);
        sat.add_clause(&exit_clause);

        for first in &boundary {
            for second in &boundary {
                if second.index(w) < first.index(w) {
                    sat.add_clause(&[
                        !self.field_lit(first.index(w), 0),
                        !self.field_lit(second.index(w), last),
                    ]);
                }
            }
        }
    }

    // an installed border segment closes its cell off from being a door
    fn walls_block_doors(&self, sat: &mut SatProblem) {
        let (w, h) = (self.width(), self.height());
        let last = self.path_length() - 1;

        let mut blocks = Vec::new();

        for x in 1..w.saturating_sub(2) {
            blocks.push((vec![Wall::horizontal(x, 0)], Location(x, 0)));
            blocks.push((vec![Wall::horizontal(x, h)], Location(x, h - 1)));
        }
        for y in 1..h.saturating_sub(2) {
            blocks.push((vec![Wall::vertical(0, y)], Location(0, y)));
            blocks.push((vec![Wall::vertical(w, y)], Location(w - 1, y)));
        }

        // a corner cell is only closed off once both its border segments are
        blocks.push((vec![Wall::vertical(0, 0), Wall::horizontal(0, 0)], Location(0, 0)));
        blocks.push((vec![Wall::vertical(w, 0), Wall::horizontal(w - 1, 0)], Location(w - 1, 0)));
        blocks.push((vec![Wall::vertical(0, h - 1), Wall::horizontal(0, h)], Location(0, h - 1)));
        blocks.push((
            vec![Wall::vertical(w, h - 1), Wall::horizontal(w - 1, h)],
            Location(w - 1, h - 1),
        ));

        for (walls, cell) in blocks {
            let field = cell.index(w);
            for pos in [0, last] {
                let mut clause = walls.iter().map(|wall| !self.wall_lit(*wall)).collect_vec();
                clause.push(!self.field_lit(field, pos));
                sat.add_clause(&clause);
            }
        }
    }

    /// Read the path out of the current model and add the blocking clause
    /// that excludes exactly this assignment of cells to positions from all
    /// future solves.
    pub(crate) fn extract_path(&self, sat: &mut SatProblem) -> Path {
        let w = self.width();
        let len = self.path_length();

        let mut cells = vec![Location(0, 0); len];
        let mut blocking = Vec::with_capacity(len);
        for field in 0..len {
            for pos in 0..len {
                let lit = self.field_lit(field, pos);
                if sat.value(lit) == Some(true) {
                    cells[pos] = Location::from_index(field, w);
                    blocking.push(!lit);
                }
            }
        }

        sat.add_clause(&blocking);
        Path::new(cells)
    }
}
