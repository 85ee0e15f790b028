#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use unordered_pair::UnorderedPair;
    use varisat::Var;

    use crate::board::Board;
    use crate::encode::Encoding;
    use crate::generator::{GenerateError, Generator};
    use crate::location::{edge_cells, Dimension, Direction, Location};
    use crate::logic::{at_least_two, at_most_two};
    use crate::path::Path;
    use crate::sat::SatProblem;
    use crate::wall::{all_walls, Wall};

    fn dims(w: usize, h: usize) -> (Dimension, Dimension) {
        (NonZero::new(w).unwrap(), NonZero::new(h).unwrap())
    }

    /// Exhaustive backtracking search for Hamiltonian paths between edge
    /// cells, independent of the SAT machinery. Each undirected path is
    /// counted once by requiring the start cell's index below the end's.
    struct PathSearch {
        dims: (Dimension, Dimension),
        blocked: HashSet<UnorderedPair<Location>>,
        boundary: HashSet<Location>,
        target: Option<Location>,
        total: usize,
        cap: usize,
        found: Vec<Vec<Location>>,
    }

    impl PathSearch {
        fn extend(&mut self, path: &mut Vec<Location>, visited: &mut HashSet<Location>) {
            if self.found.len() >= self.cap {
                return;
            }

            let current = *path.last().unwrap();
            if path.len() == self.total {
                let accepted = match self.target {
                    Some(target) => current == target,
                    None => {
                        self.boundary.contains(&current)
                            && path[0].index(self.dims.0.get()) < current.index(self.dims.0.get())
                    }
                };
                if accepted {
                    self.found.push(path.clone());
                }
                return;
            }

            for (_, neighbour) in Direction::neighbors_of(current, self.dims) {
                if visited.contains(&neighbour)
                    || self.blocked.contains(&UnorderedPair(current, neighbour))
                {
                    continue;
                }

                path.push(neighbour);
                visited.insert(neighbour);
                self.extend(path, visited);
                path.pop();
                visited.remove(&neighbour);
            }
        }
    }

    /// All Hamiltonian paths on `board` (up to `cap`), optionally pretending
    /// `without` is not installed, with the given or any edge endpoints.
    fn hamiltonian_paths(
        board: &Board,
        without: Option<Wall>,
        endpoints: Option<(Location, Location)>,
        cap: usize,
    ) -> Vec<Vec<Location>> {
        let blocked = board
            .walls()
            .iter()
            .filter(|wall| Some(**wall) != without)
            .filter_map(|wall| wall.separated_cells(board.dims()))
            .collect();

        let boundary = edge_cells(board.dims().0, board.dims().1);
        let starts = match endpoints {
            Some((entry, _)) => vec![entry],
            None => boundary.clone(),
        };

        let mut search = PathSearch {
            dims: board.dims(),
            blocked,
            boundary: boundary.into_iter().collect(),
            target: endpoints.map(|(_, exit)| exit),
            total: board.width() * board.height(),
            cap,
            found: Vec::new(),
        };

        for start in starts {
            let mut path = vec![start];
            let mut visited = HashSet::from([start]);
            search.extend(&mut path, &mut visited);
        }

        search.found
    }

    /// The board's solutions through its two doors.
    fn solutions(board: &Board, cap: usize) -> Vec<Vec<Location>> {
        hamiltonian_paths(board, None, Some((board.entry(), board.exit())), cap)
    }

    fn assert_valid(board: &Board) {
        let w = board.width();
        let boundary = edge_cells(board.dims().0, board.dims().1);

        assert!(boundary.contains(&board.entry()));
        assert!(boundary.contains(&board.exit()));
        assert!(board.entry().index(w) < board.exit().index(w));

        for wall in board.walls() {
            assert!(wall.in_bounds(board.dims()));
            assert!(!wall.is_border(board.dims()));
        }

        // exactly one path through the doors, and no alternative path even
        // with other endpoint pairs
        assert_eq!(solutions(board, 2).len(), 1);
        assert_eq!(hamiltonian_paths(board, None, None, 2).len(), 1);
    }

    #[test]
    fn walls_enumerated_once() {
        for (w, h) in [(2, 2), (3, 2), (5, 4)] {
            let walls = all_walls(dims(w, h).0, dims(w, h).1);
            assert_eq!(walls.len(), w * (h + 1) + (w + 1) * h);
            assert_eq!(walls.iter().collect::<HashSet<_>>().len(), walls.len());
            assert!(walls.iter().all(|wall| wall.in_bounds(dims(w, h))));
        }
    }

    #[test]
    fn edge_cells_cover_boundary() {
        let cells = edge_cells(dims(4, 3).0, dims(4, 3).1);
        assert_eq!(cells.len(), 2 * 4 + 2 * 3 - 4);
        assert_eq!(cells.iter().collect::<HashSet<_>>().len(), cells.len());
        assert!(cells.iter().all(|c| c.0 == 0 || c.0 == 3 || c.1 == 0 || c.1 == 2));

        assert_eq!(edge_cells(dims(2, 2).0, dims(2, 2).1).len(), 4);

        // degenerate single-row and single-column boards still list every
        // cell exactly once
        assert_eq!(edge_cells(dims(2, 1).0, dims(2, 1).1), vec![Location(0, 0), Location(1, 0)]);
        assert_eq!(
            edge_cells(dims(1, 3).0, dims(1, 3).1),
            vec![Location(0, 0), Location(0, 2), Location(0, 1)]
        );
    }

    #[test]
    fn location_index_roundtrip() {
        for index in 0..20 {
            let location = Location::from_index(index, 5);
            assert_eq!(location.index(5), index);
        }
        assert_eq!(Location(3, 2).index(4), 11);
    }

    #[test]
    fn walls_between_cells() {
        let cell = Location(1, 1);
        assert_eq!(Wall::between(cell, Direction::Up), Wall::horizontal(1, 1));
        assert_eq!(Wall::between(cell, Direction::Down), Wall::horizontal(1, 2));
        assert_eq!(Wall::between(cell, Direction::Left), Wall::vertical(1, 1));
        assert_eq!(Wall::between(cell, Direction::Right), Wall::vertical(2, 1));

        assert_eq!(
            Wall::vertical(1, 1).separated_cells(dims(3, 3)),
            Some(UnorderedPair(Location(0, 1), Location(1, 1)))
        );
        // unordered identity
        assert_eq!(
            Wall::vertical(1, 1).separated_cells(dims(3, 3)),
            Some(UnorderedPair(Location(1, 1), Location(0, 1)))
        );
        assert_eq!(Wall::vertical(0, 1).separated_cells(dims(3, 3)), None);
        assert_eq!(Wall::horizontal(1, 3).separated_cells(dims(3, 3)), None);
    }

    #[test]
    fn nonblocking_walls_spare_the_path() {
        let path = Path::new(vec![Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]);
        let interior = all_walls(dims(2, 2).0, dims(2, 2).1)
            .into_iter()
            .filter(|wall| !wall.is_border(dims(2, 2)))
            .collect_vec();

        assert_eq!(path.nonblocking_walls(interior, dims(2, 2)), vec![Wall::horizontal(0, 1)]);
    }

    #[test]
    fn two_of_four_clauses() {
        let lits = (0..4).map(|i| Var::from_index(i).positive()).collect_vec();

        let upper = at_most_two(&lits);
        assert_eq!(upper.len(), 4);
        assert!(upper.iter().all(|clause| clause.len() == 3));
        assert!(upper.iter().flatten().all(|lit| lit.is_negative()));

        let lower = at_least_two(&lits);
        assert_eq!(lower.len(), 4);
        assert!(lower.iter().all(|clause| clause.len() == 3));
        assert!(lower.iter().flatten().all(|lit| lit.is_positive()));
    }

    #[test]
    fn formula_satisfiable_without_walls() {
        let mut sat = SatProblem::new();
        let encoding = Encoding::build(dims(2, 2), &mut sat);

        let no_walls = all_walls(dims(2, 2).0, dims(2, 2).1)
            .into_iter()
            .map(|wall| !encoding.wall_lit(wall))
            .collect_vec();
        assert!(sat.solve(&no_walls).unwrap());

        // two cells pinned to position 0 is a contradiction
        let mut conflicting = no_walls.clone();
        conflicting.push(encoding.field_lit(0, 0));
        conflicting.push(encoding.field_lit(3, 3));
        conflicting.push(encoding.field_lit(1, 0));
        assert!(!sat.solve(&conflicting).unwrap());
    }

    #[test]
    fn extracted_path_is_blocked() {
        let mut sat = SatProblem::new();
        let encoding = Encoding::build(dims(2, 2), &mut sat);

        // doors at (0, 0) and (0, 1) admit exactly one path geometrically
        let mut assumptions = vec![encoding.field_lit(0, 0), encoding.field_lit(2, 3)];
        assumptions.extend(
            all_walls(dims(2, 2).0, dims(2, 2).1)
                .into_iter()
                .map(|wall| !encoding.wall_lit(wall)),
        );
        assert!(sat.solve(&assumptions).unwrap());

        let path = encoding.extract_path(&mut sat);
        assert_eq!(
            path.cells(),
            &[Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]
        );

        // the blocking clause rules the only path out
        assert!(!sat.solve(&assumptions).unwrap());
    }

    #[test]
    fn models_have_two_barriers_per_cell() {
        let mut sat = SatProblem::new();
        let encoding = Encoding::build(dims(3, 3), &mut sat);

        let no_walls = all_walls(dims(3, 3).0, dims(3, 3).1)
            .into_iter()
            .map(|wall| !encoding.wall_lit(wall))
            .collect_vec();
        assert!(sat.solve(&no_walls).unwrap());

        for y in 0..3 {
            for x in 0..3 {
                let barriers = [
                    Wall::horizontal(x, y),
                    Wall::vertical(x + 1, y),
                    Wall::horizontal(x, y + 1),
                    Wall::vertical(x, y),
                ]
                .into_iter()
                .filter(|wall| sat.value(encoding.edge_lit(*wall).unwrap()) == Some(true))
                .count();

                assert_eq!(barriers, 2, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut first = SatProblem::new();
        Encoding::build(dims(3, 2), &mut first);
        let mut second = SatProblem::new();
        Encoding::build(dims(3, 2), &mut second);

        assert_eq!(first.num_variables(), second.num_variables());
        assert_eq!(first.num_clauses(), second.num_clauses());
    }

    #[test]
    fn rejects_single_cell_board() {
        assert!(matches!(
            Generator::with_dims(dims(1, 1)).generate(),
            Err(GenerateError::BoardTooSmall)
        ));
    }

    #[test]
    fn generates_smallest_board() {
        let board = Generator::with_dims(dims(2, 1)).seed(7).generate().unwrap();

        // only one admissible door pair exists
        assert_eq!(board.entry(), Location(0, 0));
        assert_eq!(board.exit(), Location(1, 0));
        assert!(board.walls().is_empty());

        let paths = solutions(&board, 2);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn generates_2x2_board() {
        let board = Generator::with_dims(dims(2, 2)).seed(1).generate().unwrap();
        assert_valid(&board);

        let paths = solutions(&board, 2);
        assert_eq!(paths[0].len(), 4);
        assert_eq!(paths[0].iter().collect::<HashSet<_>>().len(), 4);
    }

    #[test]
    fn generates_2x3_board() {
        let board = Generator::with_dims(dims(2, 3)).seed(11).generate().unwrap();
        assert_valid(&board);

        let paths = solutions(&board, 2);
        assert_eq!(paths[0].len(), 6);
    }

    #[test]
    fn generated_walls_are_all_essential() {
        let board = Generator::with_dims(dims(3, 3)).seed(5).generate().unwrap();
        assert_valid(&board);

        // an unconstrained 3x3 grid has many paths, so at least one wall is
        // needed to single one out
        assert!(!board.walls().is_empty());

        // dropping any single wall must re-admit a second path; this also
        // means a second minimization pass could not remove anything
        for wall in board.walls() {
            let reopened = hamiltonian_paths(&board, Some(*wall), None, 2);
            assert_eq!(reopened.len(), 2, "wall {:?} is not essential", wall);
        }
    }

    #[test]
    fn generates_unique_4x4_boards_across_seeds() {
        for seed in 0..10 {
            let board = Generator::with_dims(dims(4, 4)).seed(seed).generate().unwrap();
            assert_valid(&board);

            for wall in board.walls() {
                assert_eq!(hamiltonian_paths(&board, Some(*wall), None, 2).len(), 2);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let first = Generator::with_dims(dims(3, 3)).seed(42).generate().unwrap();
        let second = Generator::with_dims(dims(3, 3)).seed(42).generate().unwrap();

        assert_eq!(first.entry(), second.entry());
        assert_eq!(first.exit(), second.exit());
        assert_eq!(first.walls(), second.walls());
    }

    #[test]
    fn board_graph_omits_walled_edges() {
        let board = Board {
            dims: dims(2, 2),
            entry: Location(0, 0),
            exit: Location(1, 1),
            walls: HashSet::from([Wall::horizontal(0, 1)]),
        };

        let graph = board.graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.contains_edge(Location(0, 0), Location(0, 1)));
        assert!(graph.contains_edge(Location(0, 0), Location(1, 0)));
    }

    #[test]
    fn renders_walls_and_doors() {
        let board = Board {
            dims: dims(2, 2),
            entry: Location(0, 0),
            exit: Location(1, 1),
            walls: HashSet::from([Wall::horizontal(0, 1)]),
        };

        assert_eq!(
            format!("{}", board),
            "+  +--+\n      |\n+--+  +\n|      \n+--+  +\n"
        );
    }
}
