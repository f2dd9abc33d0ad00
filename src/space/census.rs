//! Aggregate counts over the phase space.
//!
//! A [`Census`] is folded from the classified enumeration itself, never from a second code
//! path, so its numbers cannot drift from what [`crate::space::enumerate_all`] reports.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{Rule, Validator, Verdict, RULE_COUNT};
use crate::space::{Classified, Enumeration, PhaseSpace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Census {
    pub total: usize,
    pub safe: usize,
    #[serde(rename = "unsafe")]
    pub unsafe_: usize,
    /// `100 * safe / total`.
    pub safe_percent: f64,
    /// Phases breaking each rule. A phase breaking several rules counts once per rule.
    pub rule_failures: BTreeMap<Rule, usize>,
}

impl Census {
    /// Sequential census of the whole space under `validator`.
    pub fn collect(validator: Validator<'_>) -> Self {
        let mut tally = Tally::default();
        for c in Enumeration::new(validator, PhaseSpace::new()) {
            tally.record(&c, &validator);
        }
        let census = tally.finish(&validator);
        debug!(
            total = census.total,
            safe = census.safe,
            "phase census complete"
        );
        census
    }

    /// Census of the standard intersection.
    pub fn standard() -> Self {
        Self::collect(Validator::standard())
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total phases: {}", self.total)?;
        writeln!(f, "safe: {}", self.safe)?;
        writeln!(f, "unsafe: {}", self.unsafe_)?;
        write!(f, "safe fraction: {:.4}%", self.safe_percent)?;
        for (rule, count) in &self.rule_failures {
            write!(f, "\n  {rule}: {count}")?;
        }
        Ok(())
    }
}

/// Running counts, mergeable across workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    total: usize,
    safe: usize,
    failures: [usize; RULE_COUNT],
}

impl Tally {
    pub fn record(&mut self, item: &Classified, validator: &Validator<'_>) {
        self.total += 1;
        match item.verdict {
            Verdict::Safe => self.safe += 1,
            Verdict::Unsafe => {
                let diagnosis = validator.diagnose(&item.phase);
                debug_assert_eq!(diagnosis.verdict(), Verdict::Unsafe);
                for rule in diagnosis.failed {
                    self.failures[rule.number() - 1] += 1;
                }
            }
        }
    }

    #[must_use]
    pub fn merge(mut self, other: Tally) -> Tally {
        self.total += other.total;
        self.safe += other.safe;
        for (a, b) in self.failures.iter_mut().zip(other.failures) {
            *a += b;
        }
        self
    }

    pub fn finish(self, validator: &Validator<'_>) -> Census {
        let safe_percent = if self.total == 0 {
            0.0
        } else {
            self.safe as f64 * 100.0 / self.total as f64
        };
        Census {
            total: self.total,
            safe: self.safe,
            unsafe_: self.total - self.safe,
            safe_percent,
            rule_failures: validator
                .rules()
                .iter()
                .map(|&r| (r, self.failures[r.number() - 1]))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConflictModel;

    #[test]
    fn tallies_merge_additively() {
        let v = Validator::standard();
        let mut a = Tally::default();
        let mut b = Tally::default();
        for c in crate::space::enumerate_range(0..40) {
            a.record(&c, &v);
        }
        for c in crate::space::enumerate_range(40..100) {
            b.record(&c, &v);
        }
        let mut whole = Tally::default();
        for c in crate::space::enumerate_range(0..100) {
            whole.record(&c, &v);
        }
        assert_eq!(a.merge(b), whole);
    }

    #[test]
    fn census_only_lists_rules_of_its_validator() {
        let rules = [Rule::NoMinorAheads];
        let v = Validator::with_rules(ConflictModel::standard(), &rules);
        let census = Census::collect(v);
        assert_eq!(census.rule_failures.len(), 1);
        // Four aheads, each with two non-minor states: 2^4 * 3^8 phases pass.
        let passing = 16 * 3usize.pow(8);
        assert_eq!(census.safe, passing);
        assert_eq!(census.rule_failures[&Rule::NoMinorAheads], census.total - passing);
    }

    #[test]
    fn empty_tally_has_zero_percent() {
        let census = Tally::default().finish(&Validator::standard());
        assert_eq!(census.total, 0);
        assert_eq!(census.safe_percent, 0.0);
    }
}
