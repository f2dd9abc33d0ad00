//! Minor-green preconditions (rules 7–10).
//!
//! A minor green is a filtered indication. It is never legal for a through movement, and for
//! turns it is only legal beside a major green on a specific through movement.

use crate::core::movement::AHEADS;
use crate::core::phase::Phase;
use crate::core::signal::SignalState;
use crate::model::{ConflictModel, MovementPair};

#[inline]
fn minor_requires_major(phase: &Phase, pairs: &[MovementPair]) -> bool {
    pairs.iter().all(|&(turn, ahead)| {
        phase.state(turn) != SignalState::MinorGreen
            || phase.state(ahead) == SignalState::MajorGreen
    })
}

pub fn no_minor_aheads(phase: &Phase, _model: &ConflictModel) -> bool {
    AHEADS
        .iter()
        .all(|&m| phase.state(m) != SignalState::MinorGreen)
}

/// A filtered left needs a major green on the through of its own approach.
pub fn minor_left_approach(phase: &Phase, model: &ConflictModel) -> bool {
    minor_requires_major(phase, model.left_approach_aheads())
}

/// A filtered right needs a major green on the through sharing its lane.
pub fn minor_right_shared_lane(phase: &Phase, model: &ConflictModel) -> bool {
    minor_requires_major(phase, model.shared_lanes())
}

/// A filtered left, located through its oncoming through `O`: the through travelling against
/// `O` must show a major green and `O` itself must not.
pub fn minor_left_opposing(phase: &Phase, model: &ConflictModel) -> bool {
    model.left_opposing_aheads().iter().all(|&(left, opposing)| {
        if phase.state(left) != SignalState::MinorGreen {
            return true;
        }
        let standard_green = opposing
            .reversed()
            .is_some_and(|own| phase.state(own) == SignalState::MajorGreen);
        standard_green && phase.state(opposing) != SignalState::MajorGreen
    })
}
