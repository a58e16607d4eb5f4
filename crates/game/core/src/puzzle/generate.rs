use super::model::{Constraint, Puzzle, VarId};
use super::Difficulty;
use crate::rng::PcgRng;

/// Pre-solved hard-tier parameters: `(w, x, y, z, w * x, y + z)`.
const HARD_COMBINATIONS: [(i32, i32, i32, i32, i32, i32); 5] = [
    (2, 6, 1, 5, 12, 6),
    (3, 4, 1, 5, 12, 6),
    (2, 5, 1, 6, 10, 7),
    (3, 5, 1, 4, 15, 5),
    (4, 5, 1, 3, 20, 4),
];

/// Builds the three puzzle tiers. Every generated puzzle has a solution.
pub struct PuzzleGenerator;

impl PuzzleGenerator {
    pub fn generate(difficulty: Difficulty, rng: &mut PcgRng) -> Puzzle {
        match difficulty {
            Difficulty::Easy => Self::easy(rng),
            Difficulty::Medium => Self::medium(rng),
            Difficulty::Hard => Self::hard(rng),
        }
    }

    /// X, Y in 1..=4 with X + Y = t (t in 4..=7) and X != Y.
    fn easy(rng: &mut PcgRng) -> Puzzle {
        let target = rng.range(4, 7) as i32;
        let (x, y) = (VarId(0), VarId(1));
        Puzzle::from_parts(
            Difficulty::Easy,
            &[("X", 1..=4), ("Y", 1..=4)],
            vec![Constraint::sum(&[x, y], target), Constraint::NotEqual(x, y)],
        )
    }

    /// A, B, C in 1..=5, summing to t (t in 8..=12), all different, A < B.
    fn medium(rng: &mut PcgRng) -> Puzzle {
        let target = rng.range(8, 12) as i32;
        let (a, b, c) = (VarId(0), VarId(1), VarId(2));
        Puzzle::from_parts(
            Difficulty::Medium,
            &[("A", 1..=5), ("B", 1..=5), ("C", 1..=5)],
            vec![
                Constraint::sum(&[a, b, c], target),
                Constraint::AllDifferent,
                Constraint::LessThan(a, b),
            ],
        )
    }

    /// W, X, Y, Z in 1..=6 with W * X = p, Y + Z = s, all different, W <= X.
    fn hard(rng: &mut PcgRng) -> Puzzle {
        let (_, _, _, _, product, sum) =
            HARD_COMBINATIONS[rng.index(HARD_COMBINATIONS.len())];
        let (w, x, y, z) = (VarId(0), VarId(1), VarId(2), VarId(3));
        Puzzle::from_parts(
            Difficulty::Hard,
            &[("W", 1..=6), ("X", 1..=6), ("Y", 1..=6), ("Z", 1..=6)],
            vec![
                Constraint::product(&[w, x], product),
                Constraint::sum(&[y, z], sum),
                Constraint::AllDifferent,
                Constraint::LessOrEqual(w, x),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::CspSolver;

    #[test]
    fn tiers_have_expected_shape() {
        let mut rng = PcgRng::new(1);
        let easy = PuzzleGenerator::generate(Difficulty::Easy, &mut rng);
        assert_eq!(easy.variables().len(), 2);
        assert_eq!(easy.variables()[0].domain(), &[1, 2, 3, 4]);

        let medium = PuzzleGenerator::generate(Difficulty::Medium, &mut rng);
        assert_eq!(medium.variables().len(), 3);
        assert_eq!(medium.constraints().len(), 3);

        let hard = PuzzleGenerator::generate(Difficulty::Hard, &mut rng);
        assert_eq!(hard.variables().len(), 4);
        assert_eq!(hard.variables()[3].domain().len(), 6);
        assert!(hard.description().starts_with("[HARD PUZZLE] Find W, X, Y, Z where:"));
    }

    #[test]
    fn hard_combinations_are_genuine_solutions() {
        for (w, x, y, z, product, sum) in HARD_COMBINATIONS {
            let puzzle = Puzzle::from_parts(
                Difficulty::Hard,
                &[("W", 1..=6), ("X", 1..=6), ("Y", 1..=6), ("Z", 1..=6)],
                vec![
                    Constraint::product(&[VarId(0), VarId(1)], product),
                    Constraint::sum(&[VarId(2), VarId(3)], sum),
                    Constraint::AllDifferent,
                    Constraint::LessOrEqual(VarId(0), VarId(1)),
                ],
            );
            let candidate = puzzle
                .assignment([("W", w), ("X", x), ("Y", y), ("Z", z)])
                .unwrap();
            assert!(CspSolver::new(&puzzle).verify(&candidate));
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let a = PuzzleGenerator::generate(Difficulty::Medium, &mut PcgRng::new(9));
        let b = PuzzleGenerator::generate(Difficulty::Medium, &mut PcgRng::new(9));
        assert_eq!(a, b);
    }
}
