//! The standard relation tables for a four-arm, right-hand-traffic intersection.

use crate::core::movement::Arm;
use crate::core::movement::Movement::*;
use crate::model::{LaneGroup, MovementPair, RelationTables};

/// Through movements on perpendicular roads.
pub const CROSSING_AHEADS: [MovementPair; 4] = [
    (NorthSouth, EastWest),
    (NorthSouth, WestEast),
    (SouthNorth, EastWest),
    (SouthNorth, WestEast),
];

/// Left turns from adjacent arms. Opposing lefts pass in front of each other.
pub const CROSSING_LEFTS: [MovementPair; 4] = [
    (SouthWest, EastSouth),
    (EastSouth, NorthEast),
    (NorthEast, WestNorth),
    (WestNorth, SouthWest),
];

/// `(left, oncoming through)`.
pub const LEFT_OPPOSING_AHEADS: [MovementPair; 4] = [
    (SouthWest, NorthSouth),
    (EastSouth, WestEast),
    (NorthEast, SouthNorth),
    (WestNorth, EastWest),
];

/// `(left, through leaving the arm the left turns into)`.
///
/// The through travels against the left's exit direction.
pub const LEFT_CROSS_ARM_AHEADS: [MovementPair; 4] = [
    (SouthWest, WestEast),
    (EastSouth, SouthNorth),
    (NorthEast, EastWest),
    (WestNorth, NorthSouth),
];

/// `(right, ahead)` sharing lane 0 of one arm.
pub const SHARED_LANES: [MovementPair; 4] = [
    (SouthEast, SouthNorth),
    (EastNorth, EastWest),
    (NorthWest, NorthSouth),
    (WestSouth, WestEast),
];

/// `(left, through on the same approach)`.
pub const LEFT_APPROACH_AHEADS: [MovementPair; 4] = [
    (SouthWest, SouthNorth),
    (EastSouth, EastWest),
    (NorthEast, NorthSouth),
    (WestNorth, WestEast),
];

/// Movements arriving in lane 2 of each arm.
pub const LANE_GROUPS: [LaneGroup; 4] = [
    LaneGroup {
        arrival: Arm::South,
        members: &[NorthSouth, WestSouth, EastSouth],
    },
    LaneGroup {
        arrival: Arm::West,
        members: &[EastWest, NorthWest, SouthWest],
    },
    LaneGroup {
        arrival: Arm::North,
        members: &[SouthNorth, EastNorth, WestNorth],
    },
    LaneGroup {
        arrival: Arm::East,
        members: &[WestEast, SouthEast, NorthEast],
    },
];

pub const STANDARD: RelationTables = RelationTables {
    crossing_aheads: &CROSSING_AHEADS,
    crossing_lefts: &CROSSING_LEFTS,
    left_opposing_aheads: &LEFT_OPPOSING_AHEADS,
    left_cross_arm_aheads: &LEFT_CROSS_ARM_AHEADS,
    shared_lanes: &SHARED_LANES,
    left_approach_aheads: &LEFT_APPROACH_AHEADS,
    lane_groups: &LANE_GROUPS,
};
