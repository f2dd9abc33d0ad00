//! Path and lane conflicts (rules 1–6).

use crate::core::phase::Phase;
use crate::model::{ConflictModel, MovementPair};

#[inline]
fn at_most_one_active(phase: &Phase, pairs: &[MovementPair]) -> bool {
    pairs
        .iter()
        .all(|&(a, b)| !(phase.is_active(a) && phase.is_active(b)))
}

pub fn crossing_aheads(phase: &Phase, model: &ConflictModel) -> bool {
    at_most_one_active(phase, model.crossing_aheads())
}

pub fn crossing_lefts(phase: &Phase, model: &ConflictModel) -> bool {
    at_most_one_active(phase, model.crossing_lefts())
}

pub fn left_opposing_aheads(phase: &Phase, model: &ConflictModel) -> bool {
    at_most_one_active(phase, model.left_opposing_aheads())
}

pub fn left_cross_arm_aheads(phase: &Phase, model: &ConflictModel) -> bool {
    at_most_one_active(phase, model.left_cross_arm_aheads())
}

/// A shared lane is either open to both of its movements or to neither.
pub fn shared_lanes(phase: &Phase, model: &ConflictModel) -> bool {
    model
        .shared_lanes()
        .iter()
        .all(|&(right, ahead)| phase.is_active(right) == phase.is_active(ahead))
}

pub fn lane_occupancy(phase: &Phase, model: &ConflictModel) -> bool {
    model.lane_groups().iter().all(|group| {
        group
            .members
            .iter()
            .filter(|&&m| phase.is_active(m))
            .count()
            <= 1
    })
}
