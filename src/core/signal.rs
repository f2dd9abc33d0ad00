use std::fmt;

use serde::{Deserialize, Serialize};

/// Display state of a single movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalState {
    /// Movement prohibited.
    Red,
    /// Dedicated indication: a turn arrow or a protected through phase.
    MajorGreen,
    /// Filtered indication, legal only beside a specific major green.
    MinorGreen,
}

/// The state alphabet in enumeration order.
pub const ALPHABET: [SignalState; 3] = [
    SignalState::Red,
    SignalState::MajorGreen,
    SignalState::MinorGreen,
];

impl SignalState {
    /// `MajorGreen` or `MinorGreen`.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, SignalState::Red)
    }

    /// Position in [`ALPHABET`], i.e. the base-3 digit used by phase indices.
    #[inline]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_digit(digit: u8) -> Option<SignalState> {
        ALPHABET.get(digit as usize).copied()
    }

    /// Canonical encoding symbol.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            SignalState::Red => 'r',
            SignalState::MajorGreen => 'G',
            SignalState::MinorGreen => 'g',
        }
    }

    /// Decode a symbol. `R` is accepted as an alias for red.
    #[inline]
    pub fn from_symbol(c: char) -> Option<SignalState> {
        match c {
            'r' | 'R' => Some(SignalState::Red),
            'G' => Some(SignalState::MajorGreen),
            'g' => Some(SignalState::MinorGreen),
            _ => None,
        }
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
