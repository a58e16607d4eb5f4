//! Constraint puzzles gating locked doors.
//!
//! A [`Puzzle`] is a tiny finite-domain CSP: at most [`MAX_VARIABLES`]
//! integer variables with at most [`MAX_DOMAIN`] values each, plus a list of
//! [`Constraint`]s. [`CspSolver`] solves it by chronological backtracking and
//! [`PuzzleGenerator`] produces the three difficulty tiers from a seed.
mod error;
mod generate;
mod model;
mod solver;

pub use error::PuzzleError;
pub use generate::PuzzleGenerator;
pub use model::{Assignment, Constraint, MAX_DOMAIN, MAX_VARIABLES, Puzzle, VarId, Variable};
pub use solver::{CspSolver, SolverStats};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// How the session picks a tier for each new puzzle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DifficultyPolicy {
    Easy,
    Medium,
    Hard,
    /// First puzzle easy, the next two medium, hard afterwards.
    #[default]
    Progressive,
}

impl DifficultyPolicy {
    /// Tier for a puzzle when `encountered` puzzles were already presented.
    pub const fn difficulty_for(self, encountered: u32) -> Difficulty {
        match self {
            DifficultyPolicy::Easy => Difficulty::Easy,
            DifficultyPolicy::Medium => Difficulty::Medium,
            DifficultyPolicy::Hard => Difficulty::Hard,
            DifficultyPolicy::Progressive => match encountered {
                0 => Difficulty::Easy,
                1 | 2 => Difficulty::Medium,
                _ => Difficulty::Hard,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progressive_policy_ramps_up() {
        let tiers: Vec<_> = (0..5)
            .map(|n| DifficultyPolicy::Progressive.difficulty_for(n))
            .collect();
        assert_eq!(
            tiers,
            vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Hard
            ]
        );
        assert_eq!(
            DifficultyPolicy::Medium.difficulty_for(9),
            Difficulty::Medium
        );
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "Progressive".parse::<DifficultyPolicy>().unwrap(),
            DifficultyPolicy::Progressive
        );
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }
}
