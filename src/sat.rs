use std::fmt::{Display, Formatter};

use varisat::{ExtendFormula, Lit, Solver};

/// The backing solver reported an internal failure.
#[derive(Debug)]
pub struct SolverError(String);

impl Display for SolverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sat solver failure: {}", self.0)
    }
}

impl std::error::Error for SolverError {}

/// A thin incremental front onto a CDCL solver.
///
/// Variables are allocated through [`new_lit`](Self::new_lit) and clauses
/// only ever accumulate; learned clauses are shared between consecutive
/// [`solve`](Self::solve) calls, while assumptions apply to a single call.
pub(crate) struct SatProblem<'a> {
    solver: Solver<'a>,
    model: Vec<Lit>,
    variables: usize,
    clauses: usize,
}

impl SatProblem<'_> {
    pub(crate) fn new() -> Self {
        Self {
            solver: Solver::new(),
            model: Vec::new(),
            variables: 0,
            clauses: 0,
        }
    }

    /// Allocate a fresh variable and return its positive literal.
    pub(crate) fn new_lit(&mut self) -> Lit {
        self.variables += 1;
        self.solver.new_var().positive()
    }

    pub(crate) fn add_clause(&mut self, lits: &[Lit]) {
        self.clauses += 1;
        self.solver.add_clause(lits);
    }

    /// Solve under `assumptions`, which hold for this call only.
    ///
    /// On a satisfiable outcome the model is retained for
    /// [`value`](Self::value) queries until the next call.
    pub(crate) fn solve(&mut self, assumptions: &[Lit]) -> Result<bool, SolverError> {
        self.solver.assume(assumptions);
        let satisfiable = self
            .solver
            .solve()
            .map_err(|e| SolverError(e.to_string()))?;

        self.model = match satisfiable {
            true => self.solver.model().unwrap_or_default(),
            false => Vec::new(),
        };
        Ok(satisfiable)
    }

    /// The value `lit` takes in the most recent model, or [`None`] if the
    /// variable is unassigned or the last solve was unsatisfiable.
    pub(crate) fn value(&self, lit: Lit) -> Option<bool> {
        self.model
            .get(lit.var().index())
            .map(|assigned| assigned.is_positive() == lit.is_positive())
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.variables
    }

    pub(crate) fn num_clauses(&self) -> usize {
        self.clauses
    }
}
