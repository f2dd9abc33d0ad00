//! The phase space: every assignment of the three-symbol alphabet to the twelve movements.
//!
//! Enumeration is lexicographic over the movement catalogue (first movement most significant)
//! and the alphabet order `r < G < g`, so the `i`-th phase is [`Phase::from_index`]`(i)`.
//! Sequences are lazy and restartable: [`enumerate_all`] returns a fresh iterator that always
//! yields the same `(index, phase, verdict)` triples in the same order.
//!
//! Pagination is a window over the sequence ([`enumerate_range`]); nothing here keeps a cursor.

pub mod census;
pub mod parallel;

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::phase::{Phase, PHASE_COUNT};
use crate::rules::{Validator, Verdict};

/// Lazy iterator over phases by index.
#[derive(Debug, Clone)]
pub struct PhaseSpace {
    next: usize,
    end: usize,
}

impl PhaseSpace {
    /// All `3^12` phases.
    pub fn new() -> Self {
        Self {
            next: 0,
            end: PHASE_COUNT,
        }
    }

    /// Phases with index in `range`, clamped to the space.
    pub fn range(range: Range<usize>) -> Self {
        let end = range.end.min(PHASE_COUNT);
        Self {
            next: range.start.min(end),
            end,
        }
    }

    /// Index of the next phase to be yielded.
    #[inline]
    pub fn position(&self) -> usize {
        self.next
    }
}

impl Default for PhaseSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PhaseSpace {
    type Item = Phase;

    #[inline]
    fn next(&mut self) -> Option<Phase> {
        if self.next >= self.end {
            return None;
        }
        let phase = Phase::from_index_in_range(self.next);
        self.next += 1;
        Some(phase)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Phase> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl DoubleEndedIterator for PhaseSpace {
    #[inline]
    fn next_back(&mut self) -> Option<Phase> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(Phase::from_index_in_range(self.end))
    }
}

impl ExactSizeIterator for PhaseSpace {}

impl FusedIterator for PhaseSpace {}

/// One enumerated phase with its position and verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classified {
    pub index: usize,
    pub phase: Phase,
    pub verdict: Verdict,
}

/// Classifying iterator over a [`PhaseSpace`].
#[derive(Debug, Clone)]
pub struct Enumeration<'v> {
    space: PhaseSpace,
    validator: Validator<'v>,
}

impl<'v> Enumeration<'v> {
    pub fn new(validator: Validator<'v>, space: PhaseSpace) -> Self {
        Self { space, validator }
    }

    #[inline]
    fn classify_at(&self, index: usize, phase: Phase) -> Classified {
        Classified {
            index,
            phase,
            verdict: self.validator.classify(&phase),
        }
    }

    /// Keep only items whose verdict passes `filter`.
    pub fn filtered(self, filter: PhaseFilter) -> impl Iterator<Item = Classified> + 'v {
        self.filter(move |c| filter.accepts(c.verdict))
    }
}

impl Iterator for Enumeration<'_> {
    type Item = Classified;

    #[inline]
    fn next(&mut self) -> Option<Classified> {
        let index = self.space.position();
        let phase = self.space.next()?;
        Some(self.classify_at(index, phase))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.space.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Classified> {
        let phase = self.space.nth(n)?;
        Some(self.classify_at(phase.index(), phase))
    }
}

impl ExactSizeIterator for Enumeration<'_> {}

impl FusedIterator for Enumeration<'_> {}

/// Every phase in enumeration order, unclassified.
pub fn phase_space() -> PhaseSpace {
    PhaseSpace::new()
}

/// Every phase of the standard intersection with its index and verdict.
pub fn enumerate_all() -> Enumeration<'static> {
    Enumeration::new(Validator::standard(), PhaseSpace::new())
}

/// The classified window `range` of [`enumerate_all`].
pub fn enumerate_range(range: Range<usize>) -> Enumeration<'static> {
    Enumeration::new(Validator::standard(), PhaseSpace::range(range))
}

/// Which verdicts a listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFilter {
    #[default]
    All,
    Safe,
    Unsafe,
}

impl PhaseFilter {
    #[inline]
    pub fn accepts(self, verdict: Verdict) -> bool {
        match self {
            PhaseFilter::All => true,
            PhaseFilter::Safe => verdict == Verdict::Safe,
            PhaseFilter::Unsafe => verdict == Verdict::Unsafe,
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PhaseFilter::All),
            "safe" => Ok(PhaseFilter::Safe),
            "unsafe" => Ok(PhaseFilter::Unsafe),
            other => Err(format!(
                "unknown filter {other:?} (expected all, safe or unsafe)"
            )),
        }
    }
}

impl fmt::Display for PhaseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhaseFilter::All => "all",
            PhaseFilter::Safe => "safe",
            PhaseFilter::Unsafe => "unsafe",
        })
    }
}

/// Indices of the safe and unsafe phases, each in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub safe: Vec<usize>,
    #[serde(rename = "unsafe")]
    pub unsafe_: Vec<usize>,
}

impl Partition {
    pub fn from_classified(items: impl IntoIterator<Item = Classified>) -> Self {
        let mut out = Partition::default();
        for c in items {
            match c.verdict {
                Verdict::Safe => out.safe.push(c.index),
                Verdict::Unsafe => out.unsafe_.push(c.index),
            }
        }
        out
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.safe.len() + self.unsafe_.len()
    }
}

/// Split the standard phase space by verdict.
pub fn partition() -> Partition {
    Partition::from_classified(enumerate_all())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_exact_sized_and_ordered() {
        let space = PhaseSpace::new();
        assert_eq!(space.len(), PHASE_COUNT);
        for (i, p) in PhaseSpace::new().take(50).enumerate() {
            assert_eq!(p.index(), i);
        }
        assert_eq!(PhaseSpace::new().next_back().unwrap().index(), PHASE_COUNT - 1);
    }

    #[test]
    fn nth_jumps_without_walking() {
        let mut space = PhaseSpace::new();
        assert_eq!(space.nth(6642).unwrap().encode(), "rrrGrrrGrrrr");
        assert_eq!(space.position(), 6643);
        assert!(PhaseSpace::new().nth(PHASE_COUNT).is_none());
    }

    #[test]
    fn range_is_clamped() {
        let window = PhaseSpace::range(PHASE_COUNT - 2..PHASE_COUNT + 10);
        assert_eq!(window.len(), 2);
        assert_eq!(PhaseSpace::range(PHASE_COUNT + 5..PHASE_COUNT + 9).len(), 0);
    }

    #[test]
    fn enumeration_carries_indices() {
        let items: Vec<Classified> = enumerate_range(25..31).collect();
        assert_eq!(
            items.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![25, 26, 27, 28, 29, 30]
        );
        // 27 = left S→W arrow alone, 30 = both opposing arrows.
        assert_eq!(items[2].verdict, Verdict::Safe);
        assert_eq!(items[5].verdict, Verdict::Safe);
        assert_eq!(items[5].phase.encode(), "rrrrrrrrGrGr");

        let mut e = enumerate_all();
        let c = e.nth(30).unwrap();
        assert_eq!(c.index, 30);
        assert_eq!(e.next().unwrap().index, 31);
    }

    #[test]
    fn filter_parses_and_accepts() {
        assert_eq!("safe".parse::<PhaseFilter>(), Ok(PhaseFilter::Safe));
        assert!("green".parse::<PhaseFilter>().is_err());
        assert!(PhaseFilter::All.accepts(Verdict::Unsafe));
        assert!(!PhaseFilter::Safe.accepts(Verdict::Unsafe));
        assert!(PhaseFilter::Unsafe.accepts(Verdict::Unsafe));
    }
}
