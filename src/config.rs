use tracing::info;

use crate::error::EnumerationError;
use crate::rules::Validator;
use crate::space::census::Census;
use crate::space::parallel::{census_parallel, classify_all_parallel, run_in_pool};
use crate::space::{Classified, Enumeration, PhaseFilter, PhaseSpace};

/// How to walk the phase space (pure Rust, no config files).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Verdicts to keep.
    pub filter: PhaseFilter,

    /// Number of kept phases to skip.
    pub offset: usize,

    /// Maximum number of kept phases to return.
    pub limit: Option<usize>,

    /// Classify on a `rayon` pool instead of the calling thread.
    pub parallel: bool,

    /// Worker count for a dedicated pool; 0 uses the global pool.
    pub threads: usize,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            filter: PhaseFilter::All,
            offset: 0,
            limit: None,
            parallel: false,
            threads: 0,
        }
    }
}

impl EnumerationConfig {
    pub fn with_filter(mut self, filter: PhaseFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Window over the filtered sequence: skip `offset`, keep at most `limit`.
    pub fn with_window(mut self, offset: usize, limit: Option<usize>) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool, threads: usize) -> Self {
        self.parallel = parallel;
        self.threads = threads;
        self
    }

    /// The classified phases this config selects, in index order.
    pub fn select(&self, validator: Validator<'_>) -> Result<Vec<Classified>, EnumerationError> {
        let limit = self.limit.unwrap_or(usize::MAX);
        info!(
            filter = %self.filter,
            offset = self.offset,
            limit = ?self.limit,
            parallel = self.parallel,
            "selecting phases"
        );
        if self.parallel {
            let all = run_in_pool(self.threads, || classify_all_parallel(validator))?;
            return Ok(all
                .into_iter()
                .filter(|c| self.filter.accepts(c.verdict))
                .skip(self.offset)
                .take(limit)
                .collect());
        }
        Ok(Enumeration::new(validator, PhaseSpace::new())
            .filtered(self.filter)
            .skip(self.offset)
            .take(limit)
            .collect())
    }

    /// Census of the whole space; the filter and window do not apply.
    pub fn census(&self, validator: Validator<'_>) -> Result<Census, EnumerationError> {
        if self.parallel {
            run_in_pool(self.threads, || census_parallel(validator))
        } else {
            Ok(Census::collect(validator))
        }
    }
}
