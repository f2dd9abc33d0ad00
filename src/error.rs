//! Error types.
//!
//! Both are precondition failures rather than transient conditions: classification is pure, so
//! nothing here is ever worth retrying.

use thiserror::Error;

use crate::core::movement::{Movement, Turn};

/// A phase could not be built: wrong number of assignments or a symbol outside the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPhaseShape {
    #[error("expected {expected} signal states, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("unknown signal symbol {symbol:?} at position {position}")]
    UnknownSymbol { position: usize, symbol: char },

    #[error("phase index {index} is outside 0..{count}")]
    IndexOutOfRange { index: usize, count: usize },
}

/// The conflict tables of a movement model are inconsistent.
///
/// Only produced while building a model; a model that was built is always consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelConsistencyError {
    #[error("{table}: {movement} is a {found:?} movement, expected {expected:?}")]
    WrongTurn {
        table: &'static str,
        movement: Movement,
        expected: Turn,
        found: Turn,
    },

    #[error("{table}: pair ({a}, {b}) is listed twice")]
    DuplicatePair {
        table: &'static str,
        a: Movement,
        b: Movement,
    },

    #[error("{table}: {movement} appears in more than one entry")]
    RepeatedMovement {
        table: &'static str,
        movement: Movement,
    },

    #[error("{table}: {movement} is paired with itself")]
    SelfPair {
        table: &'static str,
        movement: Movement,
    },

    #[error("shared lane: {right} and {ahead} do not leave from the same arm")]
    LaneNotShared { right: Movement, ahead: Movement },

    #[error("lane group {group}: {movement} does not arrive at the group's lane")]
    ForeignLaneMember { group: usize, movement: Movement },

    #[error("{table}: {movement} has no entry")]
    MissingMovement {
        table: &'static str,
        movement: Movement,
    },

    #[error("{table}: crossing pair ({a}, {b}) is not listed")]
    MissingPair {
        table: &'static str,
        a: Movement,
        b: Movement,
    },

    #[error("{table}: {a} and {b} do not meet the table's geometry")]
    WrongPairing {
        table: &'static str,
        a: Movement,
        b: Movement,
    },
}

/// A driver over the phase space could not run.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("failed to build a worker pool with {threads} threads")]
    ThreadPool {
        threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}
