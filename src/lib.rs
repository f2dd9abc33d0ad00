//! Safety classification of traffic-signal phases at a four-arm intersection.
//!
//! A [`Phase`](core::phase::Phase) assigns one of red, major green or minor green to each of
//! the twelve movements. [`rules::classify`] decides whether the assignment is safe to show,
//! and [`space::enumerate_all`] walks all `3^12` phases with their verdicts.

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod rules;
pub mod space;

pub use crate::core::movement::Movement;
pub use crate::core::phase::{Phase, PHASE_COUNT};
pub use crate::core::signal::SignalState;
pub use crate::rules::{classify, diagnose, Rule, Verdict};
pub use crate::space::{enumerate_all, Classified};
