use itertools::Itertools;
use varisat::Lit;

// at most two are true; for every choice of three, at least one is false
pub(crate) fn at_most_two(lits: &[Lit]) -> Vec<Vec<Lit>> {
    lits.iter()
        .combinations(3)
        .map(|trio| trio.into_iter().map(|l| !*l).collect_vec())
        .collect_vec()
}

// at least two are true; for every choice of all but one, at least one is true
pub(crate) fn at_least_two(lits: &[Lit]) -> Vec<Vec<Lit>> {
    lits.iter()
        .combinations(lits.len() - 1)
        .map(|sub| sub.into_iter().copied().collect_vec())
        .collect_vec()
}
