//! Hierarchical store of analysis results.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::run::SearchRunResults;

mod export;

/// Groups the results of an analysis: a mapping from problem ID to search
/// ID to the list of runs recorded for that pair, in registration order.
///
/// A store starts empty and only ever grows, either through
/// [`register_search_run`](AnalysisResults::register_search_run) or by
/// [`merge`](AnalysisResults::merge)-ing in a store populated elsewhere.
/// Registered runs are never mutated or reordered.
///
/// Problem and search IDs are iterated in sorted order; only the order of
/// runs within a (problem, search) pair is meaningful.
///
/// # Examples
///
/// ```
/// use analyzer::{AnalysisResults, SearchRunResults};
///
/// let mut run = SearchRunResults::new();
/// run.update_best_solution(56, 0.333, "cbadfe".to_string());
///
/// let mut results = AnalysisResults::new();
/// results.register_search_run("tsp-20", "random-descent", run);
///
/// assert_eq!(results.num_problems(), 1);
/// assert_eq!(results.num_runs("tsp-20", "random-descent")?, 1);
/// assert_eq!(
///     results.get_run("tsp-20", "random-descent", 0)?.values(),
///     &[0.333],
/// );
/// # Ok::<(), analyzer::Error>(())
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnalysisResults<S> {
    results: BTreeMap<String, BTreeMap<String, Vec<SearchRunResults<S>>>>,
}

impl<S> AnalysisResults<S> {
    /// Create an empty results store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: BTreeMap::new(),
        }
    }

    /// Register the results of a search run under the given problem and
    /// search IDs.
    ///
    /// If no runs have been registered before for this combination, new
    /// entries are created; else the run is appended to the existing runs.
    /// Repeated registration under the same IDs is how multiple runs
    /// accumulate.
    pub fn register_search_run(
        &mut self,
        problem_id: impl Into<String>,
        search_id: impl Into<String>,
        run: SearchRunResults<S>,
    ) {
        self.results
            .entry(problem_id.into())
            .or_default()
            .entry(search_id.into())
            .or_default()
            .push(run);
    }

    /// Merge another results store into this one.
    ///
    /// Every run recorded in `other` is deep-copied and appended to the
    /// matching (problem, search) bucket of this store, creating buckets as
    /// needed and preserving `other`'s per-bucket run order. `other` is
    /// left untouched.
    ///
    /// This is the seam for layering parallelism on top of the sequential
    /// driver: run independent analyses into separate stores (one per
    /// worker) and merge them afterwards. Returns `self` so calls can be
    /// chained.
    pub fn merge(&mut self, other: &Self) -> &mut Self
    where
        S: Clone,
    {
        for (problem_id, searches) in &other.results {
            let problem = self.results.entry(problem_id.clone()).or_default();
            for (search_id, runs) in searches {
                problem
                    .entry(search_id.clone())
                    .or_default()
                    .extend(runs.iter().cloned());
            }
        }
        self
    }

    /// Number of analyzed problems.
    #[must_use]
    pub fn num_problems(&self) -> usize {
        self.results.len()
    }

    /// IDs of the analyzed problems, in sorted order.
    pub fn problem_ids(&self) -> impl Iterator<Item = &str> {
        self.results.keys().map(String::as_str)
    }

    /// Number of different searches that have been applied to the given
    /// problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProblemId`] if no runs were registered under
    /// `problem_id`.
    pub fn num_searches(&self, problem_id: &str) -> Result<usize> {
        Ok(self.problem(problem_id)?.len())
    }

    /// IDs of the searches that have been applied to the given problem, in
    /// sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProblemId`] if no runs were registered under
    /// `problem_id`.
    pub fn search_ids<'a>(&'a self, problem_id: &str) -> Result<impl Iterator<Item = &'a str>> {
        Ok(self.problem(problem_id)?.keys().map(String::as_str))
    }

    /// Number of recorded runs of the given search applied to the given
    /// problem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProblemId`] or [`Error::UnknownSearchId`] if
    /// either ID is unknown.
    pub fn num_runs(&self, problem_id: &str, search_id: &str) -> Result<usize> {
        Ok(self.runs(problem_id, search_id)?.len())
    }

    /// The `index`-th recorded run of the given search applied to the given
    /// problem, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProblemId`] or [`Error::UnknownSearchId`] if
    /// either ID is unknown, and [`Error::RunIndexOutOfBounds`] if fewer
    /// than `index + 1` runs were recorded.
    pub fn get_run(
        &self,
        problem_id: &str,
        search_id: &str,
        index: usize,
    ) -> Result<&SearchRunResults<S>> {
        let runs = self.runs(problem_id, search_id)?;
        runs.get(index).ok_or_else(|| Error::RunIndexOutOfBounds {
            problem_id: problem_id.to_string(),
            search_id: search_id.to_string(),
            index,
            num_runs: runs.len(),
        })
    }

    /// All runs registered under the given problem, for internal iteration.
    fn problem(&self, problem_id: &str) -> Result<&BTreeMap<String, Vec<SearchRunResults<S>>>> {
        self.results
            .get(problem_id)
            .ok_or_else(|| Error::UnknownProblemId(problem_id.to_string()))
    }

    fn runs(&self, problem_id: &str, search_id: &str) -> Result<&Vec<SearchRunResults<S>>> {
        self.problem(problem_id)?
            .get(search_id)
            .ok_or_else(|| Error::UnknownSearchId {
                problem_id: problem_id.to_string(),
                search_id: search_id.to_string(),
            })
    }
}

impl<S> Default for AnalysisResults<S> {
    fn default() -> Self {
        Self::new()
    }
}
