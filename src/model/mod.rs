//! The movement model: which movements cross, share a lane, or compete for a departure lane.
//!
//! The relations are constant data ([`tables`]). [`ConflictModel::new`] validates a set of
//! tables against the movement geometry and indexes them by movement, so that rules can ask
//! "what is the shared-lane partner of M?" without any lookup that can miss.
//!
//! Validation failures are programming errors. [`ConflictModel::standard`] builds the model
//! for [`tables::STANDARD`] once per process and panics if those tables are inconsistent.

pub mod tables;

use std::sync::OnceLock;

use crate::core::movement::{
    Arm, Movement, Turn, AHEADS, LEFTS, MOVEMENTS, MOVEMENT_COUNT, RIGHTS,
};
use crate::error::ModelConsistencyError;

pub type MovementPair = (Movement, Movement);

/// Movements that arrive in the same departure lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneGroup {
    pub arrival: Arm,
    pub members: &'static [Movement],
}

/// Raw relation tables, before validation.
#[derive(Debug, Clone, Copy)]
pub struct RelationTables {
    pub crossing_aheads: &'static [MovementPair],
    pub crossing_lefts: &'static [MovementPair],
    pub left_opposing_aheads: &'static [MovementPair],
    pub left_cross_arm_aheads: &'static [MovementPair],
    pub shared_lanes: &'static [MovementPair],
    pub left_approach_aheads: &'static [MovementPair],
    pub lane_groups: &'static [LaneGroup],
}

/// Validated, indexed relation tables.
#[derive(Debug, Clone)]
pub struct ConflictModel {
    tables: RelationTables,
    shared_partner: [Option<Movement>; MOVEMENT_COUNT],
    approach_ahead: [Option<Movement>; MOVEMENT_COUNT],
    opposing_ahead: [Option<Movement>; MOVEMENT_COUNT],
    cross_arm_ahead: [Option<Movement>; MOVEMENT_COUNT],
    lane_group: [usize; MOVEMENT_COUNT],
}

type Lookup = [Option<Movement>; MOVEMENT_COUNT];

impl ConflictModel {
    pub fn new(tables: RelationTables) -> Result<Self, ModelConsistencyError> {
        check_pairs(
            "crossing aheads",
            tables.crossing_aheads,
            (Turn::Ahead, Turn::Ahead),
            perpendicular,
        )?;
        check_pairs(
            "crossing lefts",
            tables.crossing_lefts,
            (Turn::Left, Turn::Left),
            perpendicular,
        )?;
        require_pairs("crossing aheads", tables.crossing_aheads, &AHEADS, perpendicular)?;
        require_pairs("crossing lefts", tables.crossing_lefts, &LEFTS, perpendicular)?;
        check_pairs(
            "left/opposing aheads",
            tables.left_opposing_aheads,
            (Turn::Left, Turn::Ahead),
            |left, ahead| ahead.origin() == left.origin().opposite(),
        )?;
        check_pairs(
            "left/cross-arm aheads",
            tables.left_cross_arm_aheads,
            (Turn::Left, Turn::Ahead),
            |left, ahead| ahead.origin() == left.destination(),
        )?;
        check_pairs(
            "left/approach aheads",
            tables.left_approach_aheads,
            (Turn::Left, Turn::Ahead),
            |left, ahead| ahead.origin() == left.origin(),
        )?;

        let opposing_ahead = index_lefts("left/opposing aheads", tables.left_opposing_aheads)?;
        let cross_arm_ahead = index_lefts("left/cross-arm aheads", tables.left_cross_arm_aheads)?;
        let approach_ahead = index_lefts("left/approach aheads", tables.left_approach_aheads)?;
        let shared_partner = index_shared_lanes(tables.shared_lanes)?;
        let lane_group = index_lane_groups(tables.lane_groups)?;

        Ok(Self {
            tables,
            shared_partner,
            approach_ahead,
            opposing_ahead,
            cross_arm_ahead,
            lane_group,
        })
    }

    /// Process-wide model for the standard intersection.
    pub fn standard() -> &'static ConflictModel {
        static MODEL: OnceLock<ConflictModel> = OnceLock::new();
        MODEL.get_or_init(|| {
            ConflictModel::new(tables::STANDARD)
                .unwrap_or_else(|e| panic!("standard movement model is inconsistent: {e}"))
        })
    }

    #[inline]
    pub fn crossing_aheads(&self) -> &[MovementPair] {
        self.tables.crossing_aheads
    }

    #[inline]
    pub fn crossing_lefts(&self) -> &[MovementPair] {
        self.tables.crossing_lefts
    }

    #[inline]
    pub fn left_opposing_aheads(&self) -> &[MovementPair] {
        self.tables.left_opposing_aheads
    }

    #[inline]
    pub fn left_cross_arm_aheads(&self) -> &[MovementPair] {
        self.tables.left_cross_arm_aheads
    }

    /// `(right, ahead)` pairs.
    #[inline]
    pub fn shared_lanes(&self) -> &[MovementPair] {
        self.tables.shared_lanes
    }

    #[inline]
    pub fn left_approach_aheads(&self) -> &[MovementPair] {
        self.tables.left_approach_aheads
    }

    #[inline]
    pub fn lane_groups(&self) -> &[LaneGroup] {
        self.tables.lane_groups
    }

    /// The other movement using the same approach lane (right turn ↔ ahead).
    ///
    /// `None` for left turns, which have their own lane.
    #[inline]
    pub fn shared_lane_partner(&self, movement: Movement) -> Option<Movement> {
        self.shared_partner[movement.index()]
    }

    /// Through movement on the same approach as a left turn.
    #[inline]
    pub fn approach_ahead(&self, left: Movement) -> Option<Movement> {
        self.approach_ahead[left.index()]
    }

    /// Oncoming through movement for a left turn.
    #[inline]
    pub fn opposing_ahead(&self, left: Movement) -> Option<Movement> {
        self.opposing_ahead[left.index()]
    }

    /// Through movement leaving the arm a left turn enters.
    #[inline]
    pub fn cross_arm_ahead(&self, left: Movement) -> Option<Movement> {
        self.cross_arm_ahead[left.index()]
    }

    /// Departure-lane group the movement arrives in.
    #[inline]
    pub fn lane_group(&self, movement: Movement) -> &LaneGroup {
        &self.tables.lane_groups[self.lane_group[movement.index()]]
    }
}

fn perpendicular(a: Movement, b: Movement) -> bool {
    a.origin() != b.origin() && a.origin() != b.origin().opposite()
}

fn expect_turn(
    table: &'static str,
    movement: Movement,
    expected: Turn,
) -> Result<(), ModelConsistencyError> {
    let found = movement.turn();
    if found != expected {
        return Err(ModelConsistencyError::WrongTurn {
            table,
            movement,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_pairs(
    table: &'static str,
    pairs: &[MovementPair],
    turns: (Turn, Turn),
    geometry: impl Fn(Movement, Movement) -> bool,
) -> Result<(), ModelConsistencyError> {
    for (i, &(a, b)) in pairs.iter().enumerate() {
        expect_turn(table, a, turns.0)?;
        expect_turn(table, b, turns.1)?;
        if a == b {
            return Err(ModelConsistencyError::SelfPair { table, movement: a });
        }
        if !geometry(a, b) {
            return Err(ModelConsistencyError::WrongPairing { table, a, b });
        }
        let repeated = pairs[..i]
            .iter()
            .any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a));
        if repeated {
            return Err(ModelConsistencyError::DuplicatePair { table, a, b });
        }
    }
    Ok(())
}

/// Every perpendicular pair drawn from `candidates` must be listed, in either order.
fn require_pairs(
    table: &'static str,
    pairs: &[MovementPair],
    candidates: &[Movement],
    geometry: impl Fn(Movement, Movement) -> bool,
) -> Result<(), ModelConsistencyError> {
    for (i, &a) in candidates.iter().enumerate() {
        for &b in &candidates[i + 1..] {
            if geometry(a, b) && !pairs.iter().any(|&p| p == (a, b) || p == (b, a)) {
                return Err(ModelConsistencyError::MissingPair { table, a, b });
            }
        }
    }
    Ok(())
}

/// Index a `(left, ahead)` table by its left turn; every left needs exactly one entry.
fn index_lefts(
    table: &'static str,
    pairs: &[MovementPair],
) -> Result<Lookup, ModelConsistencyError> {
    let mut out: Lookup = [None; MOVEMENT_COUNT];
    for &(left, ahead) in pairs {
        let slot = &mut out[left.index()];
        if slot.is_some() {
            return Err(ModelConsistencyError::RepeatedMovement {
                table,
                movement: left,
            });
        }
        *slot = Some(ahead);
    }
    if let Some(&movement) = LEFTS.iter().find(|m| out[m.index()].is_none()) {
        return Err(ModelConsistencyError::MissingMovement { table, movement });
    }
    Ok(out)
}

fn index_shared_lanes(pairs: &[MovementPair]) -> Result<Lookup, ModelConsistencyError> {
    const TABLE: &str = "shared lanes";
    let mut out: Lookup = [None; MOVEMENT_COUNT];
    for &(right, ahead) in pairs {
        expect_turn(TABLE, right, Turn::Right)?;
        expect_turn(TABLE, ahead, Turn::Ahead)?;
        if right.origin() != ahead.origin() || right.approach_lane() != ahead.approach_lane() {
            return Err(ModelConsistencyError::LaneNotShared { right, ahead });
        }
        for (m, partner) in [(right, ahead), (ahead, right)] {
            let slot = &mut out[m.index()];
            if slot.is_some() {
                return Err(ModelConsistencyError::RepeatedMovement {
                    table: TABLE,
                    movement: m,
                });
            }
            *slot = Some(partner);
        }
    }
    if let Some(&movement) = RIGHTS.iter().find(|m| out[m.index()].is_none()) {
        return Err(ModelConsistencyError::MissingMovement {
            table: TABLE,
            movement,
        });
    }
    Ok(out)
}

fn index_lane_groups(
    groups: &[LaneGroup],
) -> Result<[usize; MOVEMENT_COUNT], ModelConsistencyError> {
    const TABLE: &str = "lane groups";
    let mut out: [Option<usize>; MOVEMENT_COUNT] = [None; MOVEMENT_COUNT];
    for (group, lane) in groups.iter().enumerate() {
        for &movement in lane.members {
            if movement.destination() != lane.arrival {
                return Err(ModelConsistencyError::ForeignLaneMember { group, movement });
            }
            let slot = &mut out[movement.index()];
            if slot.is_some() {
                return Err(ModelConsistencyError::RepeatedMovement {
                    table: TABLE,
                    movement,
                });
            }
            *slot = Some(group);
        }
    }

    let mut indexed = [0usize; MOVEMENT_COUNT];
    for m in MOVEMENTS {
        indexed[m.index()] = out[m.index()].ok_or(ModelConsistencyError::MissingMovement {
            table: TABLE,
            movement: m,
        })?;
    }
    Ok(indexed)
}
