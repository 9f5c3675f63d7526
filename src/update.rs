//! Improvement events recorded during a search run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The event of finding a new best solution during a search run.
///
/// An update captures the elapsed runtime at which the improvement occurred
/// (in milliseconds since the search was started), the evaluation value of
/// the new best solution and the solution itself. Updates are created once
/// per improvement and are immutable thereafter.
///
/// Within a single run, update times are non-decreasing in the order the
/// updates were produced. This is a contract of the producing search and is
/// not re-checked here.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestSolutionUpdate<S> {
    time: u64,
    value: f64,
    solution: S,
}

impl<S> BestSolutionUpdate<S> {
    /// Create an update event.
    ///
    /// # Arguments
    ///
    /// * `time` - Elapsed runtime at which the solution was found, in
    ///   milliseconds since the search was started.
    /// * `value` - Evaluation value of the new best solution.
    /// * `solution` - The new best solution.
    #[must_use]
    pub fn new(time: u64, value: f64, solution: S) -> Self {
        Self {
            time,
            value,
            solution,
        }
    }

    /// Elapsed runtime at which the solution was found, in milliseconds.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Evaluation value of the new best solution.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The new best solution that was found.
    #[must_use]
    pub fn solution(&self) -> &S {
        &self.solution
    }

    /// Consume the update, returning the solution.
    #[must_use]
    pub fn into_solution(self) -> S {
        self.solution
    }
}
