//! Experiment driver.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::search::SearchFactory;

mod run;

/// Default number of measured runs per (problem, search) pair.
const DEFAULT_NUM_RUNS: usize = 10;

/// Default number of discarded burn-in runs per (problem, search) pair.
const DEFAULT_NUM_BURN_IN: usize = 1;

/// An experiment applying several search algorithms to several problem
/// instances.
///
/// Problems and searches are registered under unique string IDs; searches
/// are registered as a [`SearchFactory`] because a fresh search instance is
/// created for every run. Each search is executed a configurable number of
/// times per problem (10 by default) since most searches are randomized and
/// a single run says little. Before the measured runs, a configurable
/// number of burn-in runs (1 by default) is executed and discarded to warm
/// up the runtime, so that first-execution overhead does not pollute the
/// measured results. Both counts can be overridden per search.
///
/// `P` is the problem type, `S` the solution type; both are opaque to the
/// driver.
///
/// # Examples
///
/// ```
/// use analyzer::prelude::*;
///
/// // A stand-in for a real search: reports two scripted improvements.
/// struct DemoSearch {
///     listeners: Vec<Box<dyn SearchListener<Vec<u32>>>>,
/// }
///
/// impl Search<Vec<u32>> for DemoSearch {
///     fn start(&mut self) -> Result<()> {
///         let improvements = [(12, 0.334, vec![3, 6, 1]), (333, 0.356, vec![4, 6, 1])];
///         for (time, value, solution) in improvements {
///             for listener in &mut self.listeners {
///                 listener.new_best_solution(time, value, &solution, true);
///             }
///         }
///         Ok(())
///     }
///
///     fn dispose(&mut self) -> Result<()> {
///         Ok(())
///     }
///
///     fn add_listener(&mut self, listener: Box<dyn SearchListener<Vec<u32>>>) {
///         self.listeners.push(listener);
///     }
///
///     fn elapsed_runtime(&self) -> u64 {
///         333
///     }
/// }
///
/// let mut analysis = Analysis::new();
/// analysis
///     .add_problem("problem-0", ())?
///     .add_search("search-0", |_problem: &()| -> Result<Box<dyn Search<Vec<u32>>>> {
///         Ok(Box::new(DemoSearch { listeners: Vec::new() }))
///     })?
///     .set_num_runs(3)?;
///
/// let results = analysis.run()?;
/// assert_eq!(results.num_runs("problem-0", "search-0")?, 3);
/// assert_eq!(results.get_run("problem-0", "search-0", 0)?.times(), &[12, 333]);
/// # Ok::<(), analyzer::Error>(())
/// ```
pub struct Analysis<P, S> {
    /// Problems to be analyzed, keyed by ID.
    problems: BTreeMap<String, P>,
    /// Factories creating the searches to be applied, keyed by ID.
    searches: BTreeMap<String, Box<dyn SearchFactory<P, S>>>,
    /// Global number of measured runs per search.
    num_runs: usize,
    /// Per-search run counts, overriding the global count when set.
    search_num_runs: BTreeMap<String, usize>,
    /// Global number of burn-in runs per search.
    num_burn_in: usize,
    /// Per-search burn-in counts, overriding the global count when set.
    search_num_burn_in: BTreeMap<String, usize>,
}

impl<P, S> Analysis<P, S> {
    /// Create an empty analysis with default settings (10 measured runs and
    /// 1 burn-in run per search).
    #[must_use]
    pub fn new() -> Self {
        Self {
            problems: BTreeMap::new(),
            searches: BTreeMap::new(),
            num_runs: DEFAULT_NUM_RUNS,
            search_num_runs: BTreeMap::new(),
            num_burn_in: DEFAULT_NUM_BURN_IN,
            search_num_burn_in: BTreeMap::new(),
        }
    }

    /// The global number of measured runs performed for every search
    /// without a search-specific override.
    #[must_use]
    pub fn num_runs(&self) -> usize {
        self.num_runs
    }

    /// Set the global number of measured runs.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumRuns`] if `n` is zero; the previous value
    /// is retained.
    pub fn set_num_runs(&mut self, n: usize) -> Result<&mut Self> {
        if n == 0 {
            return Err(Error::InvalidNumRuns);
        }
        self.num_runs = n;
        Ok(self)
    }

    /// The global number of burn-in runs performed for every search without
    /// a search-specific override.
    ///
    /// Burn-in runs are executed before the measured runs and their results
    /// are discarded; they only warm up the runtime so that one-time
    /// start-up costs do not skew the measured convergence traces.
    #[must_use]
    pub fn num_burn_in(&self) -> usize {
        self.num_burn_in
    }

    /// Set the global number of burn-in runs.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumBurnIn`] if `n` is zero; the previous
    /// value is retained.
    pub fn set_num_burn_in(&mut self, n: usize) -> Result<&mut Self> {
        if n == 0 {
            return Err(Error::InvalidNumBurnIn);
        }
        self.num_burn_in = n;
        Ok(self)
    }

    /// The number of measured runs that will be performed for the given
    /// search: the search-specific override if one was set, else the global
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchNotAdded`] if no search with this ID has been
    /// added.
    pub fn num_runs_for(&self, search_id: &str) -> Result<usize> {
        self.check_search(search_id)?;
        Ok(self
            .search_num_runs
            .get(search_id)
            .copied()
            .unwrap_or(self.num_runs))
    }

    /// Set the number of measured runs for the given search only.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchNotAdded`] if no search with this ID has been
    /// added, or [`Error::InvalidNumRuns`] if `n` is zero. The previous
    /// setting is retained on error.
    pub fn set_num_runs_for(&mut self, search_id: &str, n: usize) -> Result<&mut Self> {
        self.check_search(search_id)?;
        if n == 0 {
            return Err(Error::InvalidNumRuns);
        }
        self.search_num_runs.insert(search_id.to_string(), n);
        Ok(self)
    }

    /// The number of burn-in runs that will be performed for the given
    /// search: the search-specific override if one was set, else the global
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchNotAdded`] if no search with this ID has been
    /// added.
    pub fn num_burn_in_for(&self, search_id: &str) -> Result<usize> {
        self.check_search(search_id)?;
        Ok(self
            .search_num_burn_in
            .get(search_id)
            .copied()
            .unwrap_or(self.num_burn_in))
    }

    /// Set the number of burn-in runs for the given search only.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchNotAdded`] if no search with this ID has been
    /// added, or [`Error::InvalidNumBurnIn`] if `n` is zero. The previous
    /// setting is retained on error.
    pub fn set_num_burn_in_for(&mut self, search_id: &str, n: usize) -> Result<&mut Self> {
        self.check_search(search_id)?;
        if n == 0 {
            return Err(Error::InvalidNumBurnIn);
        }
        self.search_num_burn_in.insert(search_id.to_string(), n);
        Ok(self)
    }

    /// Add a problem to be analyzed.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateProblemId`] if a problem was already added
    /// under this ID; the existing registration is retained.
    pub fn add_problem(&mut self, id: impl Into<String>, problem: P) -> Result<&mut Self> {
        let id = id.into();
        if self.problems.contains_key(&id) {
            return Err(Error::DuplicateProblemId(id));
        }
        self.problems.insert(id, problem);
        Ok(self)
    }

    /// Add a search to be applied to every analyzed problem.
    ///
    /// A factory is required instead of a plain search because a new
    /// instance is created for every run and every problem. Plain closures
    /// `Fn(&P) -> Result<Box<dyn Search<S>>>` qualify.
    ///
    /// Returns `self` so configuration calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSearchId`] if a search was already added
    /// under this ID; the existing registration is retained.
    pub fn add_search(
        &mut self,
        id: impl Into<String>,
        factory: impl SearchFactory<P, S> + 'static,
    ) -> Result<&mut Self> {
        let id = id.into();
        if self.searches.contains_key(&id) {
            return Err(Error::DuplicateSearchId(id));
        }
        self.searches.insert(id, Box::new(factory));
        Ok(self)
    }

    fn check_search(&self, search_id: &str) -> Result<()> {
        if self.searches.contains_key(search_id) {
            Ok(())
        } else {
            Err(Error::SearchNotAdded(search_id.to_string()))
        }
    }
}

impl<P, S> Default for Analysis<P, S> {
    fn default() -> Self {
        Self::new()
    }
}
