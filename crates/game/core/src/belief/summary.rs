use super::{BeliefModel, Observation};
use crate::graph::RoomId;

/// Coarse bucket for a trap probability.
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
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const HIGH_THRESHOLD: f64 = 0.6;
    pub const MEDIUM_THRESHOLD: f64 = 0.3;

    pub fn from_probability(p: f64) -> Self {
        if p > Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if p > Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Snapshot of the model for reporting.
///
/// Observed rooms are listed under `verified`; the remaining rooms are bucketed
/// by [`RiskLevel`], highest probability first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeliefSummary {
    pub verified: Vec<(RoomId, Observation)>,
    pub high_risk: Vec<(RoomId, f64)>,
    pub medium_risk: Vec<(RoomId, f64)>,
    pub low_risk_count: usize,
}

impl BeliefSummary {
    pub(super) fn from_model(model: &BeliefModel) -> Self {
        let mut summary = Self {
            verified: model.observations().collect(),
            high_risk: Vec::new(),
            medium_risk: Vec::new(),
            low_risk_count: 0,
        };

        for (index, &p) in model.probabilities.iter().enumerate() {
            let room = RoomId::from(index);
            if model.is_observed(room) {
                continue;
            }
            match RiskLevel::from_probability(p) {
                RiskLevel::High => summary.high_risk.push((room, p)),
                RiskLevel::Medium => summary.medium_risk.push((room, p)),
                RiskLevel::Low => summary.low_risk_count += 1,
            }
        }

        summary.high_risk.sort_by(|a, b| b.1.total_cmp(&a.1));
        summary.medium_risk.sort_by(|a, b| b.1.total_cmp(&a.1));
        summary
    }

    pub fn traps_found(&self) -> usize {
        self.verified
            .iter()
            .filter(|(_, obs)| *obs == Observation::Trap)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.61), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.31), RiskLevel::Medium);
    }

    #[test]
    fn summary_buckets_unobserved_rooms() {
        let mut model = BeliefModel::new(10, 0.58, 0.9);
        model.update(RoomId(0), Observation::Safe).unwrap();
        model.update(RoomId(5), Observation::Trap).unwrap();

        let summary = model.summary();
        assert_eq!(
            summary.verified,
            vec![(RoomId(0), Observation::Safe), (RoomId(5), Observation::Trap)]
        );
        assert_eq!(summary.traps_found(), 1);

        let high: Vec<_> = summary.high_risk.iter().map(|(room, _)| *room).collect();
        assert_eq!(high, vec![RoomId(4), RoomId(6), RoomId(3), RoomId(7)]);
        let medium: Vec<_> = summary.medium_risk.iter().map(|(room, _)| *room).collect();
        assert_eq!(medium, vec![RoomId(8), RoomId(9), RoomId(2), RoomId(1)]);
        assert_eq!(summary.low_risk_count, 0);
    }
}
