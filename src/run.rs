//! Per-run convergence traces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::update::BestSolutionUpdate;

/// Results of a single search run.
///
/// For every point in time during search when a new best solution was
/// found, the elapsed runtime (in milliseconds) and the value of the newly
/// obtained best solution are recorded. The final best solution itself is
/// kept as well; intermediate solutions are not retained.
///
/// A run starts empty and is populated through
/// [`update_best_solution`](SearchRunResults::update_best_solution), one
/// call per improvement. Runs with zero updates are legal (a search may
/// terminate without ever reporting a solution).
///
/// Cloning a run produces independent copies of the time and value series;
/// the solution is cloned with its own `Clone` implementation. Use
/// `S = Arc<T>` to share solutions between copies instead of duplicating
/// them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchRunResults<S> {
    /// Update times, in ms since the start of the run.
    times: Vec<u64>,
    /// Values of the best found solution at each update.
    values: Vec<f64>,
    /// The most recent update, overwritten on each improvement.
    best: Option<BestSolutionUpdate<S>>,
}

impl<S> SearchRunResults<S> {
    /// Create an empty run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
            best: None,
        }
    }

    /// Record a new best solution.
    ///
    /// The update time and newly obtained value are appended to the series
    /// and the final best solution is overwritten. No constraints on `time`
    /// or `value` are enforced here; monotonicity is the producing search's
    /// contract.
    ///
    /// # Arguments
    ///
    /// * `time` - Time at which the solution was found, in milliseconds
    ///   since the start of the run.
    /// * `value` - Evaluation value of the solution.
    /// * `solution` - The newly found best solution.
    pub fn update_best_solution(&mut self, time: u64, value: f64, solution: S) {
        self.times.push(time);
        self.values.push(value);
        self.best = Some(BestSolutionUpdate::new(time, value, solution));
    }

    /// Number of recorded best solution updates.
    #[must_use]
    pub fn num_updates(&self) -> usize {
        self.times.len()
    }

    /// The best solution found during this run, or `None` if no update was
    /// recorded.
    #[must_use]
    pub fn best_solution(&self) -> Option<&S> {
        self.best.as_ref().map(|update| update.solution())
    }

    /// Consume the run, returning the final best solution (if any).
    #[must_use]
    pub fn into_best_solution(self) -> Option<S> {
        self.best.map(BestSolutionUpdate::into_solution)
    }

    /// The most recent update record, or `None` if no update was recorded.
    #[must_use]
    pub fn last_update(&self) -> Option<&BestSolutionUpdate<S>> {
        self.best.as_ref()
    }

    /// Update times in milliseconds, in the order they were recorded.
    #[must_use]
    pub fn times(&self) -> &[u64] {
        &self.times
    }

    /// Values of the newly found best solutions, parallel to
    /// [`times`](SearchRunResults::times).
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl<S> Default for SearchRunResults<S> {
    fn default() -> Self {
        Self::new()
    }
}
