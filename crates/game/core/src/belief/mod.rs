//! Bayesian trap beliefs.
//!
//! Every room starts at the configured prior. Visiting a room yields a direct
//! observation that is folded in with Bayes' rule; the outcome also nudges the
//! estimate of nearby rooms that have not been observed yet. Observed rooms are
//! pinned: propagation never touches them again.
//!
//! "Nearby" is measured by id difference ([`RoomId::id_distance`]), not by
//! graph distance. Generated maps chain rooms in id order, so the two agree on
//! the backbone but diverge across shortcut doors.
mod summary;

use std::collections::BTreeMap;

pub use summary::{BeliefSummary, RiskLevel};

use crate::error::{ErrorSeverity, GameError};
use crate::graph::RoomId;

/// What the agent learned on entering a room.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Observation {
    /// Entered without anything going off.
    Safe,
    /// A trap fired.
    Trap,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BeliefError {
    #[error("room {0} is not tracked by the belief model")]
    UnknownRoom(RoomId),
}

impl GameError for BeliefError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            BeliefError::UnknownRoom(_) => "BELIEF_UNKNOWN_ROOM",
        }
    }
}

/// Per-room trap probabilities plus the set of directly observed rooms.
#[derive(Clone, Debug, PartialEq)]
pub struct BeliefModel {
    probabilities: Vec<f64>,
    observations: BTreeMap<RoomId, Observation>,
    reliability: f64,
}

impl BeliefModel {
    /// Rooms farther than this (by id difference) are unaffected by propagation.
    pub const PROPAGATION_RADIUS: u32 = 2;
    pub const TRAP_SPREAD: f64 = 0.1;
    pub const SAFE_SPREAD: f64 = 0.05;
    pub const CEILING: f64 = 0.95;
    pub const FLOOR: f64 = 0.05;

    /// Creates a model for rooms `0..room_count`.
    ///
    /// `prior` is clamped into `[0, 1]`; `reliability` into the open interval
    /// so the safe-observation likelihoods never degenerate.
    pub fn new(room_count: usize, prior: f64, reliability: f64) -> Self {
        let prior = prior.clamp(0.0, 1.0);
        Self {
            probabilities: vec![prior; room_count],
            observations: BTreeMap::new(),
            reliability: reliability.clamp(f64::EPSILON, 1.0 - f64::EPSILON),
        }
    }

    pub fn room_count(&self) -> usize {
        self.probabilities.len()
    }

    pub fn reliability(&self) -> f64 {
        self.reliability
    }

    /// Current trap probability. Unknown rooms read as `0.0`.
    pub fn probability(&self, room: RoomId) -> f64 {
        self.probabilities.get(room.index()).copied().unwrap_or(0.0)
    }

    pub fn observation(&self, room: RoomId) -> Option<Observation> {
        self.observations.get(&room).copied()
    }

    pub fn is_observed(&self, room: RoomId) -> bool {
        self.observations.contains_key(&room)
    }

    pub fn observations(&self) -> impl Iterator<Item = (RoomId, Observation)> + '_ {
        self.observations.iter().map(|(&room, &obs)| (room, obs))
    }

    /// Folds a direct observation of `room` into the model and propagates it to
    /// unobserved rooms within [`Self::PROPAGATION_RADIUS`].
    ///
    /// A trap observation is conclusive: the posterior is exactly `1.0`.
    pub fn update(&mut self, room: RoomId, observation: Observation) -> Result<(), BeliefError> {
        let prior = *self
            .probabilities
            .get(room.index())
            .ok_or(BeliefError::UnknownRoom(room))?;

        self.observations.insert(room, observation);
        self.probabilities[room.index()] = self.posterior(prior, observation);
        self.propagate(room, observation);
        Ok(())
    }

    fn posterior(&self, prior: f64, observation: Observation) -> f64 {
        let (likelihood_trap, likelihood_clear) = match observation {
            Observation::Trap => return 1.0,
            Observation::Safe => (1.0 - self.reliability, self.reliability),
        };

        let evidence = likelihood_trap * prior + likelihood_clear * (1.0 - prior);
        if evidence > 0.0 {
            likelihood_trap * prior / evidence
        } else {
            0.0
        }
    }

    fn propagate(&mut self, origin: RoomId, observation: Observation) {
        for index in 0..self.probabilities.len() {
            let room = RoomId::from(index);
            if room == origin || self.observations.contains_key(&room) {
                continue;
            }

            let distance = room.id_distance(origin);
            if distance > Self::PROPAGATION_RADIUS {
                continue;
            }

            let weight = 1.0 / f64::from(distance);
            let current = self.probabilities[index];
            self.probabilities[index] = match observation {
                Observation::Trap => (current + Self::TRAP_SPREAD * weight).min(Self::CEILING),
                Observation::Safe => (current - Self::SAFE_SPREAD * weight).max(Self::FLOOR),
            };
        }
    }

    /// Up to `n` rooms from `rooms`, lowest probability first.
    ///
    /// The sort is stable, so equally likely rooms keep their input order.
    /// Unknown rooms are treated as certainly trapped.
    pub fn safest(&self, rooms: &[RoomId], n: usize) -> Vec<RoomId> {
        let mut sorted = rooms.to_vec();
        sorted.sort_by(|a, b| self.ranked(*a, 1.0).total_cmp(&self.ranked(*b, 1.0)));
        sorted.truncate(n);
        sorted
    }

    /// Up to `n` rooms from `rooms`, highest probability first.
    ///
    /// The sort is stable, so equally likely rooms keep their input order.
    /// Unknown rooms are treated as certainly safe.
    pub fn riskiest(&self, rooms: &[RoomId], n: usize) -> Vec<RoomId> {
        let mut sorted = rooms.to_vec();
        sorted.sort_by(|a, b| self.ranked(*b, 0.0).total_cmp(&self.ranked(*a, 0.0)));
        sorted.truncate(n);
        sorted
    }

    fn ranked(&self, room: RoomId, unknown: f64) -> f64 {
        self.probabilities
            .get(room.index())
            .copied()
            .unwrap_or(unknown)
    }

    /// Sum of probabilities over the unobserved rooms of `path`.
    ///
    /// Observed rooms contribute nothing: their outcome is already known.
    pub fn path_risk(&self, path: &[RoomId]) -> f64 {
        path.iter()
            .filter(|room| !self.observations.contains_key(room))
            .map(|&room| self.probability(room))
            .sum()
    }

    pub fn risk_level(&self, room: RoomId) -> RiskLevel {
        RiskLevel::from_probability(self.probability(room))
    }

    pub fn summary(&self) -> BeliefSummary {
        BeliefSummary::from_model(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BeliefModel {
        BeliefModel::new(10, 0.2, 0.9)
    }

    #[test]
    fn safe_observation_applies_bayes_rule() {
        let mut beliefs = model();
        beliefs.update(RoomId(3), Observation::Safe).unwrap();

        let expected = (1.0 - 0.9) * 0.2 / ((1.0 - 0.9) * 0.2 + 0.9 * 0.8);
        assert!((beliefs.probability(RoomId(3)) - expected).abs() < 1e-12);
        assert!((beliefs.probability(RoomId(3)) - 0.027).abs() < 1e-3);
    }

    #[test]
    fn trap_observation_is_certain() {
        let mut beliefs = model();
        beliefs.update(RoomId(7), Observation::Trap).unwrap();
        assert_eq!(beliefs.probability(RoomId(7)), 1.0);
    }

    #[test]
    fn trap_observation_is_certain_even_with_zero_prior() {
        let mut beliefs = BeliefModel::new(4, 0.0, 0.9);
        beliefs.update(RoomId(1), Observation::Trap).unwrap();
        assert_eq!(beliefs.probability(RoomId(1)), 1.0);
    }

    #[test]
    fn trap_propagates_to_nearby_rooms() {
        let mut beliefs = model();
        beliefs.update(RoomId(3), Observation::Safe).unwrap();
        beliefs.update(RoomId(7), Observation::Trap).unwrap();

        assert!((beliefs.probability(RoomId(6)) - 0.3).abs() < 1e-12);
        assert!((beliefs.probability(RoomId(8)) - 0.3).abs() < 1e-12);
        assert!((beliefs.probability(RoomId(9)) - 0.25).abs() < 1e-12);
        // Room 5 received -0.025 from the safe observation in room 3 first.
        assert!((beliefs.probability(RoomId(5)) - 0.225).abs() < 1e-12);
        // Out of radius.
        assert_eq!(beliefs.probability(RoomId(0)), 0.2);
    }

    #[test]
    fn propagation_is_capped_and_floored() {
        let mut beliefs = BeliefModel::new(5, 0.9, 0.9);
        beliefs.update(RoomId(2), Observation::Trap).unwrap();
        assert_eq!(beliefs.probability(RoomId(1)), BeliefModel::CEILING);

        let mut beliefs = BeliefModel::new(5, 0.06, 0.9);
        beliefs.update(RoomId(2), Observation::Safe).unwrap();
        assert_eq!(beliefs.probability(RoomId(1)), BeliefModel::FLOOR);
    }

    #[test]
    fn observed_rooms_are_pinned() {
        let mut beliefs = model();
        beliefs.update(RoomId(3), Observation::Safe).unwrap();
        let pinned = beliefs.probability(RoomId(3));

        beliefs.update(RoomId(4), Observation::Trap).unwrap();
        beliefs.update(RoomId(2), Observation::Trap).unwrap();
        assert_eq!(beliefs.probability(RoomId(3)), pinned);
    }

    #[test]
    fn probabilities_stay_in_unit_interval() {
        let mut beliefs = model();
        let sequence = [
            (7, Observation::Trap),
            (6, Observation::Safe),
            (8, Observation::Trap),
            (6, Observation::Safe),
            (0, Observation::Safe),
            (9, Observation::Trap),
            (7, Observation::Safe),
        ];
        for (room, obs) in sequence {
            beliefs.update(RoomId(room), obs).unwrap();
            for index in 0..beliefs.room_count() {
                let p = beliefs.probability(RoomId::from(index));
                assert!((0.0..=1.0).contains(&p), "room {index} left [0,1]: {p}");
            }
        }
    }

    #[test]
    fn unknown_room_is_rejected() {
        let mut beliefs = model();
        assert_eq!(
            beliefs.update(RoomId(10), Observation::Safe),
            Err(BeliefError::UnknownRoom(RoomId(10)))
        );
    }

    #[test]
    fn safest_and_riskiest_keep_ties_in_input_order() {
        let mut beliefs = model();
        beliefs.update(RoomId(7), Observation::Trap).unwrap();
        let rooms = [RoomId(0), RoomId(6), RoomId(1), RoomId(7), RoomId(2)];

        assert_eq!(
            beliefs.safest(&rooms, 3),
            vec![RoomId(0), RoomId(1), RoomId(2)]
        );
        assert_eq!(beliefs.riskiest(&rooms, 2), vec![RoomId(7), RoomId(6)]);
    }

    #[test]
    fn path_risk_skips_observed_rooms() {
        let mut beliefs = model();
        beliefs.update(RoomId(0), Observation::Safe).unwrap();
        let risk = beliefs.path_risk(&[RoomId(0), RoomId(5), RoomId(6)]);
        assert!((risk - 0.4).abs() < 1e-12);
    }
}
