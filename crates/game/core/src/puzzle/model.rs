use std::fmt;
use std::ops::RangeInclusive;

use arrayvec::ArrayVec;

use super::{Difficulty, PuzzleError};

pub const MAX_VARIABLES: usize = 4;
pub const MAX_DOMAIN: usize = 6;

/// Position of a variable in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u8);

impl VarId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    name: String,
    domain: ArrayVec<i32, MAX_DOMAIN>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate values in the order the solver tries them.
    pub fn domain(&self) -> &[i32] {
        &self.domain
    }
}

/// A predicate over a partial assignment.
///
/// Every variant except [`Constraint::AllDifferent`] holds vacuously until all
/// of its variables are assigned. `AllDifferent` spans every variable of the
/// puzzle and is checked on whatever subset is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    SumEquals {
        vars: ArrayVec<VarId, MAX_VARIABLES>,
        target: i32,
    },
    ProductEquals {
        vars: ArrayVec<VarId, MAX_VARIABLES>,
        target: i32,
    },
    AllDifferent,
    LessThan(VarId, VarId),
    LessOrEqual(VarId, VarId),
    NotEqual(VarId, VarId),
}

impl Constraint {
    pub fn sum(vars: &[VarId], target: i32) -> Self {
        Constraint::SumEquals {
            vars: vars.iter().copied().take(MAX_VARIABLES).collect(),
            target,
        }
    }

    pub fn product(vars: &[VarId], target: i32) -> Self {
        Constraint::ProductEquals {
            vars: vars.iter().copied().take(MAX_VARIABLES).collect(),
            target,
        }
    }

    fn referenced(&self) -> ArrayVec<VarId, MAX_VARIABLES> {
        match self {
            Constraint::SumEquals { vars, .. } | Constraint::ProductEquals { vars, .. } => {
                vars.clone()
            }
            Constraint::AllDifferent => ArrayVec::new(),
            Constraint::LessThan(a, b)
            | Constraint::LessOrEqual(a, b)
            | Constraint::NotEqual(a, b) => [*a, *b].into_iter().collect(),
        }
    }

    /// Sums and products that overflow `i32` never satisfy their target.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        match self {
            Constraint::SumEquals { vars, target } => {
                Self::all_assigned(vars, assignment).is_none_or(|values| {
                    values
                        .iter()
                        .try_fold(0i32, |acc, v| acc.checked_add(*v))
                        .is_some_and(|sum| sum == *target)
                })
            }
            Constraint::ProductEquals { vars, target } => {
                Self::all_assigned(vars, assignment).is_none_or(|values| {
                    values
                        .iter()
                        .try_fold(1i32, |acc, v| acc.checked_mul(*v))
                        .is_some_and(|product| product == *target)
                })
            }
            Constraint::AllDifferent => {
                let mut seen = ArrayVec::<i32, MAX_VARIABLES>::new();
                for (_, value) in assignment.assigned() {
                    if seen.contains(&value) {
                        return false;
                    }
                    seen.push(value);
                }
                true
            }
            Constraint::LessThan(a, b) => Self::pair(*a, *b, assignment, |x, y| x < y),
            Constraint::LessOrEqual(a, b) => Self::pair(*a, *b, assignment, |x, y| x <= y),
            Constraint::NotEqual(a, b) => Self::pair(*a, *b, assignment, |x, y| x != y),
        }
    }

    fn all_assigned(
        vars: &[VarId],
        assignment: &Assignment,
    ) -> Option<ArrayVec<i32, MAX_VARIABLES>> {
        vars.iter().map(|var| assignment.get(*var)).collect()
    }

    fn pair(a: VarId, b: VarId, assignment: &Assignment, check: fn(i32, i32) -> bool) -> bool {
        match (assignment.get(a), assignment.get(b)) {
            (Some(x), Some(y)) => check(x, y),
            _ => true,
        }
    }
}

/// Values for a subset of a puzzle's variables, indexed by [`VarId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: [Option<i32>; MAX_VARIABLES],
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: VarId) -> Option<i32> {
        self.values.get(var.index()).copied().flatten()
    }

    pub fn set(&mut self, var: VarId, value: i32) {
        if let Some(slot) = self.values.get_mut(var.index()) {
            *slot = Some(value);
        }
    }

    pub fn unset(&mut self, var: VarId) {
        if let Some(slot) = self.values.get_mut(var.index()) {
            *slot = None;
        }
    }

    pub fn assigned(&self) -> impl Iterator<Item = (VarId, i32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|v| (VarId(index as u8), v)))
    }

    pub fn assigned_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

/// A finite-domain constraint puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    difficulty: Difficulty,
    variables: ArrayVec<Variable, MAX_VARIABLES>,
    constraints: Vec<Constraint>,
}

impl Puzzle {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            variables: ArrayVec::new(),
            constraints: Vec::new(),
        }
    }

    /// Assembles a puzzle from trusted parts. Variables and domains beyond the
    /// fixed capacities are dropped.
    pub(super) fn from_parts(
        difficulty: Difficulty,
        variables: &[(&str, RangeInclusive<i32>)],
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            difficulty,
            variables: variables
                .iter()
                .take(MAX_VARIABLES)
                .map(|(name, range)| Variable {
                    name: (*name).to_owned(),
                    domain: range.clone().take(MAX_DOMAIN).collect(),
                })
                .collect(),
            constraints,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Declares a variable. Domain values are kept in the given order.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        domain: impl IntoIterator<Item = i32>,
    ) -> Result<VarId, PuzzleError> {
        let name = name.into();
        if self.var_id(&name).is_some() {
            return Err(PuzzleError::DuplicateVariable(name));
        }
        if self.variables.is_full() {
            return Err(PuzzleError::TooManyVariables { max: MAX_VARIABLES });
        }

        let values: Vec<i32> = domain.into_iter().collect();
        if values.is_empty() {
            return Err(PuzzleError::EmptyDomain(name));
        }
        if values.len() > MAX_DOMAIN {
            return Err(PuzzleError::DomainTooLarge {
                name,
                len: values.len(),
                max: MAX_DOMAIN,
            });
        }

        let id = VarId(self.variables.len() as u8);
        self.variables.push(Variable {
            name,
            domain: values.into_iter().collect(),
        });
        Ok(id)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), PuzzleError> {
        if let Some(unknown) = constraint
            .referenced()
            .into_iter()
            .find(|var| var.index() >= self.variables.len())
        {
            return Err(PuzzleError::UnknownVariableIndex(unknown.index()));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn var_id(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|var| var.name == name)
            .map(|index| VarId(index as u8))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Builds an assignment from `(name, value)` pairs.
    pub fn assignment<'n>(
        &self,
        pairs: impl IntoIterator<Item = (&'n str, i32)>,
    ) -> Result<Assignment, PuzzleError> {
        let mut assignment = Assignment::new();
        for (name, value) in pairs {
            let id = self
                .var_id(name)
                .ok_or_else(|| PuzzleError::UnknownVariable(name.to_owned()))?;
            assignment.set(id, value);
        }
        Ok(assignment)
    }

    /// Whether every constraint holds on the assigned subset.
    pub fn is_consistent(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Whether exactly the declared variables are assigned.
    pub fn is_complete(&self, assignment: &Assignment) -> bool {
        let declared = self.variables.len();
        assignment
            .assigned()
            .all(|(var, _)| var.index() < declared)
            && assignment.assigned_count() == declared
    }

    /// Human-readable statement of the puzzle.
    pub fn description(&self) -> String {
        let names: Vec<&str> = self.variables.iter().map(Variable::name).collect();
        let listed = match names.as_slice() {
            [] => String::new(),
            [only] => (*only).to_owned(),
            [init @ .., last] if init.len() == 1 => format!("{} and {last}", init[0]),
            [init @ .., last] => format!("{}, {last}", init.join(", ")),
        };

        let mut out = format!(
            "[{} PUZZLE] Find {listed} where:",
            self.difficulty.as_ref().to_uppercase()
        );
        for constraint in &self.constraints {
            out.push_str(&format!("\n  - {}", self.display_constraint(constraint)));
        }
        if let Some((min, max)) = self.common_range() {
            out.push_str(&format!("\n  - Each is between {min}-{max}"));
        }
        out
    }

    /// Renders `X=1, Y=3` for the assigned variables.
    pub fn format_assignment(&self, assignment: &Assignment) -> String {
        assignment
            .assigned()
            .map(|(var, value)| format!("{}={value}", self.name_of(var)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn name_of(&self, var: VarId) -> &str {
        self.variable(var).map_or("?", Variable::name)
    }

    fn common_range(&self) -> Option<(i32, i32)> {
        let first = self.variables.first()?;
        let min = *first.domain.iter().min()?;
        let max = *first.domain.iter().max()?;
        self.variables
            .iter()
            .all(|var| var.domain == first.domain)
            .then_some((min, max))
    }

    fn display_constraint<'a>(&'a self, constraint: &'a Constraint) -> ConstraintDisplay<'a> {
        ConstraintDisplay {
            puzzle: self,
            constraint,
        }
    }
}

struct ConstraintDisplay<'a> {
    puzzle: &'a Puzzle,
    constraint: &'a Constraint,
}

impl fmt::Display for ConstraintDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |var: &VarId| self.puzzle.name_of(*var);
        let join = |vars: &[VarId], op: &str| vars.iter().map(name).collect::<Vec<_>>().join(op);

        match self.constraint {
            Constraint::SumEquals { vars, target } => {
                write!(f, "{} = {target}", join(vars.as_slice(), " + "))
            }
            Constraint::ProductEquals { vars, target } => {
                write!(f, "{} = {target}", join(vars.as_slice(), " × "))
            }
            Constraint::AllDifferent => f.write_str("All different values"),
            Constraint::LessThan(a, b) => write!(f, "{} < {}", name(a), name(b)),
            Constraint::LessOrEqual(a, b) => write!(f, "{} ≤ {}", name(a), name(b)),
            Constraint::NotEqual(a, b) => write!(f, "{} ≠ {}", name(a), name(b)),
        }
    }
}
