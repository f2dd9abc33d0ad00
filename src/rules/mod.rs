//! Phase safety rules and the validator that combines them.
//!
//! Each [`Rule`] is an independent predicate over a [`Phase`] and a [`ConflictModel`]. A phase
//! is [`Verdict::Safe`] iff every rule holds. Rules are listed in a fixed order so that
//! diagnostics are reproducible:
//!
//! 1. crossing through movements are mutually exclusive
//! 2. crossing left turns are mutually exclusive
//! 3. a left turn excludes the oncoming through
//! 4. a left turn excludes the through leaving the arm it turns into
//! 5. movements sharing an approach lane are both active or both red
//! 6. at most one movement arrives in each departure lane
//! 7. through movements are never minor green
//! 8. a minor-green left needs a major green on its own approach's through
//! 9. a minor-green right needs a major green on its shared-lane through
//! 10. a minor-green left needs the standard green on its own approach, not on the oncoming one

pub mod conflicts;
pub mod minor;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::phase::Phase;
use crate::model::ConflictModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    CrossingAheads,
    CrossingLefts,
    LeftOpposingAhead,
    LeftCrossArmAhead,
    SharedLaneCoupling,
    LaneOccupancy,
    NoMinorAheads,
    MinorLeftApproach,
    MinorRightSharedLane,
    MinorLeftOpposing,
}

pub const RULE_COUNT: usize = 10;

impl Rule {
    pub const ALL: [Rule; RULE_COUNT] = [
        Rule::CrossingAheads,
        Rule::CrossingLefts,
        Rule::LeftOpposingAhead,
        Rule::LeftCrossArmAhead,
        Rule::SharedLaneCoupling,
        Rule::LaneOccupancy,
        Rule::NoMinorAheads,
        Rule::MinorLeftApproach,
        Rule::MinorRightSharedLane,
        Rule::MinorLeftOpposing,
    ];

    /// 1-based position in the diagnostic order.
    #[inline]
    pub fn number(self) -> usize {
        self as usize + 1
    }

    #[inline]
    pub fn holds(self, phase: &Phase, model: &ConflictModel) -> bool {
        let check: fn(&Phase, &ConflictModel) -> bool = match self {
            Rule::CrossingAheads => conflicts::crossing_aheads,
            Rule::CrossingLefts => conflicts::crossing_lefts,
            Rule::LeftOpposingAhead => conflicts::left_opposing_aheads,
            Rule::LeftCrossArmAhead => conflicts::left_cross_arm_aheads,
            Rule::SharedLaneCoupling => conflicts::shared_lanes,
            Rule::LaneOccupancy => conflicts::lane_occupancy,
            Rule::NoMinorAheads => minor::no_minor_aheads,
            Rule::MinorLeftApproach => minor::minor_left_approach,
            Rule::MinorRightSharedLane => minor::minor_right_shared_lane,
            Rule::MinorLeftOpposing => minor::minor_left_opposing,
        };
        check(phase, model)
    }

    pub fn description(self) -> &'static str {
        match self {
            Rule::CrossingAheads => "crossing through movements both active",
            Rule::CrossingLefts => "crossing left turns both active",
            Rule::LeftOpposingAhead => "left turn active beside the oncoming through",
            Rule::LeftCrossArmAhead => "left turn active beside the through leaving its exit arm",
            Rule::SharedLaneCoupling => "shared approach lane open to only one movement",
            Rule::LaneOccupancy => "more than one movement arriving in a departure lane",
            Rule::NoMinorAheads => "minor green on a through movement",
            Rule::MinorLeftApproach => "minor-green left without a major green on its approach",
            Rule::MinorRightSharedLane => {
                "minor-green right without a major green on its shared lane"
            }
            Rule::MinorLeftOpposing => {
                "minor-green left without the standard green on its own approach"
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}: {}", self.number(), self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Safe,
    Unsafe,
}

impl Verdict {
    #[inline]
    pub fn is_safe(self) -> bool {
        matches!(self, Verdict::Safe)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Safe => "safe",
            Verdict::Unsafe => "unsafe",
        })
    }
}

/// Every rule a phase breaks, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub phase: Phase,
    pub failed: Vec<Rule>,
}

impl Diagnosis {
    #[inline]
    pub fn verdict(&self) -> Verdict {
        if self.failed.is_empty() {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        }
    }
}

/// A rule set bound to a movement model.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'m> {
    model: &'m ConflictModel,
    rules: &'m [Rule],
}

impl<'m> Validator<'m> {
    /// All rules over `model`.
    pub fn new(model: &'m ConflictModel) -> Self {
        Self {
            model,
            rules: &Rule::ALL,
        }
    }

    /// A subset of the rules, evaluated in the given order.
    pub fn with_rules(model: &'m ConflictModel, rules: &'m [Rule]) -> Self {
        Self { model, rules }
    }

    #[inline]
    pub fn model(&self) -> &'m ConflictModel {
        self.model
    }

    #[inline]
    pub fn rules(&self) -> &'m [Rule] {
        self.rules
    }

    /// Stops at the first failing rule.
    #[inline]
    pub fn classify(&self, phase: &Phase) -> Verdict {
        if self.rules.iter().all(|r| r.holds(phase, self.model)) {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        }
    }

    /// Evaluates every rule.
    pub fn diagnose(&self, phase: &Phase) -> Diagnosis {
        Diagnosis {
            phase: *phase,
            failed: self
                .rules
                .iter()
                .copied()
                .filter(|r| !r.holds(phase, self.model))
                .collect(),
        }
    }

    /// First failing rule, if any.
    pub fn first_violation(&self, phase: &Phase) -> Option<Rule> {
        self.rules
            .iter()
            .copied()
            .find(|r| !r.holds(phase, self.model))
    }
}

impl Validator<'static> {
    /// All rules over [`ConflictModel::standard`].
    pub fn standard() -> Self {
        Self::new(ConflictModel::standard())
    }
}

/// Classify a phase against the standard intersection.
pub fn classify(phase: &Phase) -> Verdict {
    Validator::standard().classify(phase)
}

/// List every standard rule the phase breaks.
pub fn diagnose(phase: &Phase) -> Diagnosis {
    Validator::standard().diagnose(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::movement::Movement::*;
    use crate::core::signal::SignalState::*;

    #[test]
    fn rule_numbers_follow_declaration_order() {
        for (i, r) in Rule::ALL.iter().enumerate() {
            assert_eq!(r.number(), i + 1);
        }
        assert_eq!(
            Rule::MinorLeftOpposing.to_string(),
            "rule 10: minor-green left without the standard green on its own approach"
        );
    }

    #[test]
    fn diagnose_agrees_with_classify() {
        let p = Phase::from_assignments(&[(NorthSouth, MajorGreen), (EastWest, MajorGreen)]);
        let d = diagnose(&p);
        assert_eq!(d.verdict(), classify(&p));
        assert_eq!(d.verdict(), Verdict::Unsafe);
        // Both throughs also open their shared lanes without the right turns.
        assert_eq!(d.failed, vec![Rule::CrossingAheads, Rule::SharedLaneCoupling]);
        assert_eq!(
            Validator::standard().first_violation(&p),
            Some(Rule::CrossingAheads)
        );
    }

    #[test]
    fn rule_subset_only_checks_its_rules() {
        let rules = [Rule::NoMinorAheads];
        let v = Validator::with_rules(ConflictModel::standard(), &rules);
        let p = Phase::from_assignments(&[(NorthSouth, MajorGreen), (EastWest, MajorGreen)]);
        assert_eq!(v.classify(&p), Verdict::Safe);
        assert_eq!(classify(&p), Verdict::Unsafe);
    }

    #[test]
    fn verdict_serializes_in_snake_case() {
        assert_eq!(serde_json::to_string(&Verdict::Unsafe).unwrap(), "\"unsafe\"");
        assert_eq!(
            serde_json::to_string(&Rule::MinorRightSharedLane).unwrap(),
            "\"minor_right_shared_lane\""
        );
    }
}
