#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a problem is added under an ID that is already taken.
    #[error("duplicate problem ID: {0}")]
    DuplicateProblemId(String),

    /// Returned when a search is added under an ID that is already taken.
    #[error("duplicate search ID: {0}")]
    DuplicateSearchId(String),

    /// Returned when the number of search runs is set to zero.
    #[error("number of runs must be strictly positive")]
    InvalidNumRuns,

    /// Returned when the number of burn-in runs is set to zero.
    #[error("number of burn-in runs must be strictly positive")]
    InvalidNumBurnIn,

    /// Returned when configuring a search that has not been added to the
    /// analysis.
    #[error("no search with ID {0} has been added")]
    SearchNotAdded(String),

    /// Returned when querying results for an unknown problem ID.
    #[error("unknown problem ID {0}")]
    UnknownProblemId(String),

    /// Returned when querying results for a search that was never applied
    /// to the given problem.
    #[error("unknown search ID {search_id} for problem {problem_id}")]
    UnknownSearchId {
        /// ID of the problem under which the search was looked up.
        problem_id: String,
        /// The missing search ID.
        search_id: String,
    },

    /// Returned when a run index is outside the range of recorded runs.
    #[error(
        "run index {index} out of range for search {search_id} applied to \
         problem {problem_id} ({num_runs} runs recorded)"
    )]
    RunIndexOutOfBounds {
        /// ID of the problem the runs belong to.
        problem_id: String,
        /// ID of the search the runs belong to.
        search_id: String,
        /// The requested run index.
        index: usize,
        /// The number of runs recorded for this problem and search.
        num_runs: usize,
    },

    /// Returned when a search fails while being created, run or disposed.
    /// The underlying error is propagated unmodified as the source.
    #[error("search execution failed: {0}")]
    Search(#[source] Box<dyn core::error::Error + Send + Sync>),

    /// Returned when writing the results document fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when the results document cannot be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an arbitrary failure surfaced by a search implementation.
    ///
    /// Convenience for [`Search`](crate::Search) implementors:
    ///
    /// ```
    /// use analyzer::Error;
    ///
    /// let err = Error::search("move pool exhausted");
    /// assert!(matches!(err, Error::Search(_)));
    /// ```
    #[must_use]
    pub fn search(err: impl Into<Box<dyn core::error::Error + Send + Sync>>) -> Self {
        Error::Search(err.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
