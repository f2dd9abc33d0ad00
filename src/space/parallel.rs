//! Parallel classification with `rayon`.
//!
//! The index range is split into chunks of at least [`CHUNK_LEN`] phases. Results are
//! collected through an indexed parallel iterator, so they come back in index order and are
//! identical to the sequential enumeration.

use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::core::phase::{Phase, PHASE_COUNT};
use crate::error::EnumerationError;
use crate::rules::Validator;
use crate::space::census::{Census, Tally};
use crate::space::{Classified, Enumeration, PhaseSpace};

pub const CHUNK_LEN: usize = 4096;

/// Classify the phases with index in `range` (clamped to the space).
pub fn classify_range_parallel(validator: Validator<'_>, range: Range<usize>) -> Vec<Classified> {
    let end = range.end.min(PHASE_COUNT);
    let start = range.start.min(end);
    debug!(
        start,
        end,
        threads = rayon::current_num_threads(),
        "classifying phases in parallel"
    );
    (start..end)
        .into_par_iter()
        .with_min_len(CHUNK_LEN)
        .map(|index| {
            let phase = Phase::from_index_in_range(index);
            Classified {
                index,
                phase,
                verdict: validator.classify(&phase),
            }
        })
        .collect()
}

/// Classify every phase.
pub fn classify_all_parallel(validator: Validator<'_>) -> Vec<Classified> {
    classify_range_parallel(validator, 0..PHASE_COUNT)
}

/// Tally of the phases with index in `range`, folded from [`CHUNK_LEN`]-sized enumeration
/// windows on the worker pool.
pub fn tally_range_parallel(validator: Validator<'_>, range: Range<usize>) -> Tally {
    let end = range.end.min(PHASE_COUNT);
    let start = range.start.min(end);
    let chunks = (end - start).div_ceil(CHUNK_LEN);
    (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let from = start + chunk * CHUNK_LEN;
            let window = PhaseSpace::range(from..(from + CHUNK_LEN).min(end));
            let mut tally = Tally::default();
            for item in Enumeration::new(validator, window) {
                tally.record(&item, &validator);
            }
            tally
        })
        .reduce(Tally::default, Tally::merge)
}

/// [`Census::collect`] with per-worker tallies merged at the end.
pub fn census_parallel(validator: Validator<'_>) -> Census {
    tally_range_parallel(validator, 0..PHASE_COUNT).finish(&validator)
}

/// Run `job` on a dedicated pool of `threads` workers, or on the global pool when `threads`
/// is zero.
pub fn run_in_pool<T, F>(threads: usize, job: F) -> Result<T, EnumerationError>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    if threads == 0 {
        return Ok(job());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|source| EnumerationError::ThreadPool { threads, source })?;
    Ok(pool.install(job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::enumerate_range;

    #[test]
    fn parallel_window_matches_sequential() {
        let range = 190_000..210_000;
        let par = classify_range_parallel(Validator::standard(), range.clone());
        let seq: Vec<Classified> = enumerate_range(range).collect();
        assert_eq!(par, seq);
    }

    #[test]
    fn parallel_tally_matches_sequential_window() {
        let v = Validator::standard();
        let range = 100_000..100_000 + 3 * CHUNK_LEN + 17;
        let mut seq = Tally::default();
        for c in enumerate_range(range.clone()) {
            seq.record(&c, &v);
        }
        assert_eq!(tally_range_parallel(v, range), seq);
        assert_eq!(tally_range_parallel(v, 5..5), Tally::default());
    }

    #[test]
    fn dedicated_pool_runs_job() {
        let n = run_in_pool(2, rayon::current_num_threads).unwrap();
        assert_eq!(n, 2);
    }
}
