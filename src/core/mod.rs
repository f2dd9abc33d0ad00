//! Fixed vocabulary of the intersection.
//!
//! - [`movement`]: the four arms and the twelve movements, in catalogue order.
//! - [`signal`]: the three-symbol signal alphabet.
//! - [`phase`]: a full assignment of one signal state per movement, its index in the phase
//!   space, and its 12-symbol text encoding.

pub mod movement;
pub mod phase;
pub mod signal;
