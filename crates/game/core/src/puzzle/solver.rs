use super::model::{Assignment, Puzzle, VarId};

/// Counters from one [`CspSolver::solve_with_stats`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverStats {
    /// Recursive calls, i.e. partial assignments visited.
    pub nodes_expanded: usize,
    /// Values undone after failing, whether inconsistent or a dead end below.
    pub backtracks: usize,
}

/// Chronological backtracking over a borrowed puzzle.
///
/// Variables are tried in declaration order and values in domain order, so
/// the first solution found is deterministic. Termination follows from the
/// finite domains.
#[derive(Clone, Copy, Debug)]
pub struct CspSolver<'p> {
    puzzle: &'p Puzzle,
}

impl<'p> CspSolver<'p> {
    pub fn new(puzzle: &'p Puzzle) -> Self {
        Self { puzzle }
    }

    pub fn puzzle(&self) -> &'p Puzzle {
        self.puzzle
    }

    pub fn solve(&self) -> Option<Assignment> {
        self.solve_with_stats().0
    }

    pub fn solve_with_stats(&self) -> (Option<Assignment>, SolverStats) {
        let mut stats = SolverStats::default();
        let mut assignment = Assignment::new();
        let solved = self.backtrack(&mut assignment, &mut stats);
        (solved.then_some(assignment), stats)
    }

    fn backtrack(&self, assignment: &mut Assignment, stats: &mut SolverStats) -> bool {
        stats.nodes_expanded += 1;

        let Some(var) = self.next_unassigned(assignment) else {
            return self.puzzle.is_consistent(assignment);
        };

        let Some(variable) = self.puzzle.variable(var) else {
            return false;
        };
        for &value in variable.domain() {
            assignment.set(var, value);
            if self.puzzle.is_consistent(assignment) && self.backtrack(assignment, stats) {
                return true;
            }
            stats.backtracks += 1;
            assignment.unset(var);
        }

        false
    }

    fn next_unassigned(&self, assignment: &Assignment) -> Option<VarId> {
        (0..self.puzzle.variables().len())
            .map(|index| VarId(index as u8))
            .find(|var| assignment.get(*var).is_none())
    }

    /// Checks a candidate: exactly the declared variables, each inside its
    /// domain, every constraint satisfied.
    pub fn verify(&self, candidate: &Assignment) -> bool {
        if !self.puzzle.is_complete(candidate) {
            return false;
        }
        let in_domain = candidate.assigned().all(|(var, value)| {
            self.puzzle
                .variable(var)
                .is_some_and(|variable| variable.domain().contains(&value))
        });
        in_domain && self.puzzle.is_consistent(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Constraint, Difficulty, PuzzleGenerator};
    use crate::rng::PcgRng;

    /// Every complete assignment in the domain product.
    fn brute_force(puzzle: &Puzzle) -> Vec<Assignment> {
        let mut out = vec![Assignment::new()];
        for (index, variable) in puzzle.variables().iter().enumerate() {
            out = out
                .into_iter()
                .flat_map(|partial| {
                    variable.domain().iter().map(move |&value| {
                        let mut next = partial;
                        next.set(VarId(index as u8), value);
                        next
                    })
                })
                .collect();
        }
        out.retain(|a| puzzle.is_consistent(a));
        out
    }

    #[test]
    fn solutions_verify_for_generated_puzzles() {
        let mut rng = PcgRng::new(11);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for _ in 0..20 {
                let puzzle = PuzzleGenerator::generate(difficulty, &mut rng);
                let solver = CspSolver::new(&puzzle);
                let solution = solver.solve().expect("generated puzzles are solvable");
                assert!(solver.verify(&solution), "{}", puzzle.description());
            }
        }
    }

    #[test]
    fn first_solution_is_first_in_domain_order() {
        let mut rng = PcgRng::new(5);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let puzzle = PuzzleGenerator::generate(difficulty, &mut rng);
            let expected = brute_force(&puzzle).into_iter().next();
            assert_eq!(CspSolver::new(&puzzle).solve(), expected);
        }
    }

    #[test]
    fn unsatisfiable_puzzle_reports_no_solution() {
        let mut puzzle = Puzzle::new(Difficulty::Easy);
        let x = puzzle.add_variable("X", 1..=3).unwrap();
        let y = puzzle.add_variable("Y", 1..=3).unwrap();
        puzzle.add_constraint(Constraint::sum(&[x, y], 9)).unwrap();

        assert!(brute_force(&puzzle).is_empty());
        let (solution, stats) = CspSolver::new(&puzzle).solve_with_stats();
        assert_eq!(solution, None);
        // Every value of X and every value of Y under each X is undone.
        assert_eq!(stats.backtracks, 3 + 3 * 3);
    }

    #[test]
    fn overflowing_product_has_no_solution() {
        let mut puzzle = Puzzle::new(Difficulty::Hard);
        let x = puzzle.add_variable("X", [50_000]).unwrap();
        let y = puzzle.add_variable("Y", [50_000]).unwrap();
        puzzle.add_constraint(Constraint::product(&[x, y], 1)).unwrap();
        let solver = CspSolver::new(&puzzle);

        assert_eq!(solver.solve(), None);
        let candidate = puzzle.assignment([("X", 50_000), ("Y", 50_000)]).unwrap();
        assert!(!solver.verify(&candidate));
    }

    #[test]
    fn verify_rejects_out_of_domain_and_partial_candidates() {
        let mut puzzle = Puzzle::new(Difficulty::Easy);
        let x = puzzle.add_variable("X", 1..=4).unwrap();
        let y = puzzle.add_variable("Y", 1..=4).unwrap();
        puzzle.add_constraint(Constraint::sum(&[x, y], 5)).unwrap();
        let solver = CspSolver::new(&puzzle);

        let good = puzzle.assignment([("X", 2), ("Y", 3)]).unwrap();
        assert!(solver.verify(&good));

        let outside = puzzle.assignment([("X", 0), ("Y", 5)]).unwrap();
        assert!(!solver.verify(&outside));

        let partial = puzzle.assignment([("X", 2)]).unwrap();
        assert!(!solver.verify(&partial));

        let mut extra = good;
        extra.set(VarId(3), 1);
        assert!(!solver.verify(&extra));
    }
}
