use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::movement::{Movement, MOVEMENTS, MOVEMENT_COUNT};
use crate::core::signal::{SignalState, ALPHABET};
use crate::error::InvalidPhaseShape;

/// Number of distinct phases: `3^12`.
pub const PHASE_COUNT: usize = 3usize.pow(MOVEMENT_COUNT as u32);

/// One signal state per movement, indexed by [`Movement::index`].
///
/// A phase is a snapshot, not a controller: it is `Copy` and never changes after it is built.
/// Its textual form is 12 symbols in catalogue order (`r`, `G`, `g`), which is also how it
/// serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phase([SignalState; MOVEMENT_COUNT]);

impl Phase {
    pub const ALL_RED: Phase = Phase([SignalState::Red; MOVEMENT_COUNT]);

    #[inline]
    pub const fn new(states: [SignalState; MOVEMENT_COUNT]) -> Self {
        Self(states)
    }

    /// Build from a slice, which must hold exactly one state per movement.
    pub fn from_states(states: &[SignalState]) -> Result<Self, InvalidPhaseShape> {
        let arr: [SignalState; MOVEMENT_COUNT] =
            states
                .try_into()
                .map_err(|_| InvalidPhaseShape::WrongLength {
                    expected: MOVEMENT_COUNT,
                    found: states.len(),
                })?;
        Ok(Self(arr))
    }

    /// All-red phase with the given movements set.
    pub fn from_assignments(assignments: &[(Movement, SignalState)]) -> Self {
        let mut phase = Self::ALL_RED;
        for &(m, s) in assignments {
            phase.0[m.index()] = s;
        }
        phase
    }

    #[inline]
    pub fn state(&self, movement: Movement) -> SignalState {
        self.0[movement.index()]
    }

    #[inline]
    pub fn is_active(&self, movement: Movement) -> bool {
        self.state(movement).is_active()
    }

    /// Copy of this phase with one movement changed.
    #[inline]
    #[must_use]
    pub fn with(mut self, movement: Movement, state: SignalState) -> Self {
        self.0[movement.index()] = state;
        self
    }

    /// `(movement, state)` pairs in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Movement, SignalState)> + '_ {
        MOVEMENTS.iter().copied().zip(self.0.iter().copied())
    }

    /// Movements showing any green.
    pub fn active_movements(&self) -> impl Iterator<Item = Movement> + '_ {
        self.iter().filter(|(_, s)| s.is_active()).map(|(m, _)| m)
    }

    /// Lexicographic position of this phase in the full phase space.
    ///
    /// Base-3 number with movement 0 as the most significant digit and
    /// [`SignalState::digit`] as the digit value.
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0usize, |acc, s| acc * 3 + s.digit() as usize)
    }

    /// Inverse of [`Phase::index`].
    pub fn from_index(index: usize) -> Result<Self, InvalidPhaseShape> {
        if index >= PHASE_COUNT {
            return Err(InvalidPhaseShape::IndexOutOfRange {
                index,
                count: PHASE_COUNT,
            });
        }
        Ok(Self::from_index_in_range(index))
    }

    /// [`Phase::from_index`] for callers that already hold `index < PHASE_COUNT`.
    pub(crate) fn from_index_in_range(index: usize) -> Self {
        debug_assert!(index < PHASE_COUNT);
        let mut states = [SignalState::Red; MOVEMENT_COUNT];
        let mut rest = index;
        for slot in states.iter_mut().rev() {
            *slot = ALPHABET[rest % 3];
            rest /= 3;
        }
        Self(states)
    }

    /// Canonical 12-symbol encoding.
    pub fn encode(&self) -> String {
        self.0.iter().map(|s| s.symbol()).collect()
    }

    /// Parse the 12-symbol encoding.
    pub fn decode(text: &str) -> Result<Self, InvalidPhaseShape> {
        let found = text.chars().count();
        if found != MOVEMENT_COUNT {
            return Err(InvalidPhaseShape::WrongLength {
                expected: MOVEMENT_COUNT,
                found,
            });
        }
        let mut states = [SignalState::Red; MOVEMENT_COUNT];
        for (position, (slot, symbol)) in states.iter_mut().zip(text.chars()).enumerate() {
            *slot = SignalState::from_symbol(symbol)
                .ok_or(InvalidPhaseShape::UnknownSymbol { position, symbol })?;
        }
        Ok(Self(states))
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::ALL_RED
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Phase {
    type Err = InvalidPhaseShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for Phase {
    type Error = InvalidPhaseShape;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signal::SignalState::*;

    #[test]
    fn index_is_base3_with_first_movement_most_significant() {
        assert_eq!(Phase::ALL_RED.index(), 0);
        let last = Phase::ALL_RED.with(Movement::WestNorth, MajorGreen);
        assert_eq!(last.index(), 1);
        let first = Phase::ALL_RED.with(Movement::NorthSouth, MajorGreen);
        assert_eq!(first.index(), 3usize.pow(11));
        assert_eq!(Phase::new([MinorGreen; MOVEMENT_COUNT]).index(), PHASE_COUNT - 1);
    }

    #[test]
    fn from_index_inverts_index() {
        for i in [0, 1, 2, 3, 30, 6642, 199_260, PHASE_COUNT - 1] {
            assert_eq!(Phase::from_index(i).unwrap().index(), i);
        }
        assert_eq!(
            Phase::from_index(PHASE_COUNT),
            Err(InvalidPhaseShape::IndexOutOfRange {
                index: PHASE_COUNT,
                count: PHASE_COUNT
            })
        );
    }

    #[test]
    fn decode_reports_shape_errors() {
        assert_eq!(
            Phase::decode("rrr"),
            Err(InvalidPhaseShape::WrongLength {
                expected: 12,
                found: 3
            })
        );
        assert_eq!(
            Phase::decode("rrrrrrrrrrrrr"),
            Err(InvalidPhaseShape::WrongLength {
                expected: 12,
                found: 13
            })
        );
        assert_eq!(
            Phase::decode("rrrrGrrrrxrr"),
            Err(InvalidPhaseShape::UnknownSymbol {
                position: 9,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn decode_accepts_uppercase_red() {
        let p: Phase = "RRGRGRRRRRRR".parse().unwrap();
        assert_eq!(p.encode(), "rrGrGrrrrrrr");
        assert_eq!(p.state(Movement::SouthNorth), MajorGreen);
        assert_eq!(p.state(Movement::SouthEast), MajorGreen);
    }

    #[test]
    fn from_states_checks_length() {
        assert!(Phase::from_states(&[Red; 12]).is_ok());
        assert_eq!(
            Phase::from_states(&[Red; 11]),
            Err(InvalidPhaseShape::WrongLength {
                expected: 12,
                found: 11
            })
        );
    }

    #[test]
    fn serializes_as_encoded_string() {
        let p = Phase::from_assignments(&[(Movement::SouthWest, MinorGreen)]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"rrrrrrrrgrrr\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Phase>("\"rrrr\"").is_err());
    }
}
