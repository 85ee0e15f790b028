use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::encode::Encoding;
use crate::location::{edge_cells, Dimension};
use crate::sat::{SatProblem, SolverError};
use crate::wall::{all_walls, Wall};

// ample for any board the encoding can express; on valid dimensions some
// endpoint pair always admits a path
const MAX_ENDPOINT_ATTEMPTS: usize = 10_000;

/// Reasons generation may fail.
#[derive(Debug)]
pub enum GenerateError {
    /// The board has fewer than two cells, so no entry/exit pair exists.
    BoardTooSmall,
    /// The backing SAT solver reported an internal failure.
    Solver(SolverError),
    /// No sampled endpoint pair admitted a path within the attempt budget.
    /// A sound formula on valid dimensions never reaches this.
    Unsolvable,
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoardTooSmall => write!(f, "board must have at least two cells"),
            Self::Solver(e) => write!(f, "{}", e),
            Self::Unsolvable => write!(f, "no endpoint pair admitted a path"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            _ => None,
        }
    }
}

/// A puzzle generator for boards of one fixed size.
///
/// Construct with [`with_dims`](Self::with_dims), optionally pin the PRNG
/// seed with [`seed`](Self::seed), then call [`generate`](Self::generate) to
/// produce a [`Board`] whose Hamiltonian path is unique.
///
/// Generation runs in two phases against a single incrementally solved
/// formula. First, random entry/exit cells are assumed together with "no
/// walls" until the solver produces a path; that path is then excluded from
/// the formula by a blocking clause. Second, every wall that would not sever
/// the sampled path is tested under assumptions that hold the remaining
/// candidates in place: if a second path shows up the moment the wall is
/// dropped, the wall is essential and stays, otherwise it is committed to be
/// absent. The surviving walls are exactly what the board needs to keep its
/// solution unique.
#[derive(Clone)]
pub struct Generator {
    dims: (Dimension, Dimension),
    seed: Option<u64>,
}

impl Generator {
    /// A generator for boards of the given dimensions, in `(width, height)`
    /// order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self { dims, seed: None }
    }

    /// Fix the PRNG seed, making generation reproducible. Without a seed,
    /// one is drawn from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate a board with a unique solution.
    pub fn generate(&self) -> Result<Board, GenerateError> {
        let w = self.dims.0.get();
        let h = self.dims.1.get();
        if w * h < 2 {
            return Err(GenerateError::BoardTooSmall);
        }

        let mut sat = SatProblem::new();
        let encoding = Encoding::build(self.dims, &mut sat);
        let len = encoding.path_length();

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };

        let boundary = edge_cells(self.dims.0, self.dims.1);
        let walls = all_walls(self.dims.0, self.dims.1);

        // fix random entry and exit cells, retrying until some path connects
        // them on the open board
        let mut attempts = 0;
        let (entry, exit) = loop {
            attempts += 1;
            if attempts > MAX_ENDPOINT_ATTEMPTS {
                return Err(GenerateError::Unsolvable);
            }

            let (entry, exit) = loop {
                let entry = boundary[rng.random_range(0..boundary.len())];
                let exit = boundary[rng.random_range(0..boundary.len())];
                if entry.index(w) < exit.index(w) {
                    break (entry, exit);
                }
            };

            let mut assumptions = vec![
                encoding.field_lit(entry.index(w), 0),
                encoding.field_lit(exit.index(w), len - 1),
            ];
            assumptions.extend(walls.iter().map(|wall| !encoding.wall_lit(*wall)));

            if sat.solve(&assumptions).map_err(GenerateError::Solver)? {
                break (entry, exit);
            }
        };

        let path = encoding.extract_path(&mut sat);

        // every wall starts out absent; walls that would sever the sampled
        // path, and the implicitly walled border, are never candidates
        let mut open: BTreeSet<Wall> = walls.iter().copied().collect();
        let interior = walls
            .iter()
            .copied()
            .filter(|wall| !wall.is_border(self.dims))
            .collect();
        let mut candidates = path.nonblocking_walls(interior, self.dims);
        for wall in &candidates {
            open.remove(wall);
        }

        let mut essential: Vec<Wall> = Vec::new();
        while !candidates.is_empty() {
            let picked = candidates.swap_remove(rng.random_range(0..candidates.len()));

            let mut assumptions = vec![!encoding.wall_lit(picked)];
            assumptions.extend(candidates.iter().map(|wall| encoding.wall_lit(*wall)));
            assumptions.extend(essential.iter().map(|wall| encoding.wall_lit(*wall)));
            assumptions.extend(open.iter().map(|wall| !encoding.wall_lit(*wall)));

            // the sampled path is blocked, so a model here is a second path
            // that only the picked wall was ruling out
            if sat.solve(&assumptions).map_err(GenerateError::Solver)? {
                essential.push(picked);
            } else {
                open.insert(picked);
            }
        }

        Ok(Board {
            dims: self.dims,
            entry,
            exit,
            walls: essential.into_iter().collect(),
        })
    }
}
