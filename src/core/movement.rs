use std::fmt;

use serde::{Deserialize, Serialize};

/// One arm of the four-arm intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arm {
    North,
    East,
    South,
    West,
}

impl Arm {
    #[inline]
    pub const fn opposite(self) -> Arm {
        match self {
            Arm::North => Arm::South,
            Arm::East => Arm::West,
            Arm::South => Arm::North,
            Arm::West => Arm::East,
        }
    }

    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Arm::North => 'N',
            Arm::East => 'E',
            Arm::South => 'S',
            Arm::West => 'W',
        }
    }
}

/// Path shape of a movement, seen from the approaching driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Turn {
    Ahead,
    Right,
    Left,
}

/// The twelve vehicle movements, in catalogue order.
///
/// Traffic drives on the right. Ahead and right-turn movements leave from lane 0 of their
/// arm (a shared lane); left turns leave from the dedicated lane 1. Every movement arrives in
/// lane 2 of its destination arm.
///
/// The discriminant is the movement's position in the catalogue, which is also its character
/// position in the textual phase encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Movement {
    NorthSouth = 0,
    EastWest = 1,
    SouthNorth = 2,
    WestEast = 3,
    SouthEast = 4,
    EastNorth = 5,
    NorthWest = 6,
    WestSouth = 7,
    SouthWest = 8,
    EastSouth = 9,
    NorthEast = 10,
    WestNorth = 11,
}

pub const MOVEMENT_COUNT: usize = 12;

pub const MOVEMENTS: [Movement; MOVEMENT_COUNT] = [
    Movement::NorthSouth,
    Movement::EastWest,
    Movement::SouthNorth,
    Movement::WestEast,
    Movement::SouthEast,
    Movement::EastNorth,
    Movement::NorthWest,
    Movement::WestSouth,
    Movement::SouthWest,
    Movement::EastSouth,
    Movement::NorthEast,
    Movement::WestNorth,
];

pub const AHEADS: [Movement; 4] = [
    Movement::NorthSouth,
    Movement::EastWest,
    Movement::SouthNorth,
    Movement::WestEast,
];

pub const RIGHTS: [Movement; 4] = [
    Movement::SouthEast,
    Movement::EastNorth,
    Movement::NorthWest,
    Movement::WestSouth,
];

pub const LEFTS: [Movement; 4] = [
    Movement::SouthWest,
    Movement::EastSouth,
    Movement::NorthEast,
    Movement::WestNorth,
];

impl Movement {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Movement> {
        MOVEMENTS.get(index).copied()
    }

    /// Arm the vehicle approaches from.
    pub const fn origin(self) -> Arm {
        use Movement::*;
        match self {
            NorthSouth | NorthWest | NorthEast => Arm::North,
            EastWest | EastNorth | EastSouth => Arm::East,
            SouthNorth | SouthEast | SouthWest => Arm::South,
            WestEast | WestSouth | WestNorth => Arm::West,
        }
    }

    /// Arm the vehicle leaves through.
    pub const fn destination(self) -> Arm {
        use Movement::*;
        match self {
            NorthSouth | WestSouth | EastSouth => Arm::South,
            EastWest | NorthWest | SouthWest => Arm::West,
            SouthNorth | EastNorth | WestNorth => Arm::North,
            WestEast | SouthEast | NorthEast => Arm::East,
        }
    }

    pub const fn turn(self) -> Turn {
        match self.index() {
            0..=3 => Turn::Ahead,
            4..=7 => Turn::Right,
            _ => Turn::Left,
        }
    }

    #[inline]
    pub const fn is_ahead(self) -> bool {
        matches!(self.turn(), Turn::Ahead)
    }

    /// Approach lane number on the origin arm (0 = rightmost).
    #[inline]
    pub const fn approach_lane(self) -> u8 {
        match self.turn() {
            Turn::Ahead | Turn::Right => 0,
            Turn::Left => 1,
        }
    }

    /// The ahead movement travelling the other way between the same two arms.
    ///
    /// `None` for turns: the turn between the same arms in the other direction is a turn of the
    /// other hand, not a reversal.
    pub fn reversed(self) -> Option<Movement> {
        if !self.is_ahead() {
            return None;
        }
        AHEADS
            .iter()
            .copied()
            .find(|m| m.origin() == self.destination())
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.origin().letter(), self.destination().letter())
    }
}
