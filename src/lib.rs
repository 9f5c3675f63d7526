#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Experiment harness for comparing search algorithms applied to several
//! problem instances, for example with different data sets, objectives or
//! problem parameters. It can also be used to perform a parameter sweep for
//! a single algorithm, or to compare neighbourhood functions.
//!
//! Because most searches are randomized, every search is executed several
//! times per problem (10 by default, tunable globally and per search) and
//! every measured run records the full convergence trace: the elapsed time
//! and evaluation value of each new best solution found. Collected results
//! can be queried directly or written to a JSON file for external
//! statistical analysis (e.g. in R).
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Analysis`] | Drive the experiment: burn-in and measured runs for every (problem, search) pair. |
//! | [`AnalysisResults`] | Hierarchical store of recorded runs, keyed by problem and search ID. |
//! | [`SearchRunResults`] | Time series of best solution updates recorded during one run. |
//! | [`BestSolutionUpdate`] | A single improvement event: elapsed time, value, solution. |
//! | [`Search`], [`SearchFactory`], [`SearchListener`] | Contracts implemented by the optimization framework under analysis. |
//!
//! # Getting Started
//!
//! Results can be assembled by hand, which is also how stores produced by
//! independent workers are combined via [`AnalysisResults::merge`]:
//!
//! ```
//! use analyzer::{AnalysisResults, SearchRunResults};
//!
//! let mut run = SearchRunResults::new();
//! run.update_best_solution(12, 0.334, vec![3, 6, 1, 7, 19]);
//! run.update_best_solution(333, 0.356, vec![4, 6, 1, 7, 19]);
//!
//! let mut results = AnalysisResults::new();
//! results.register_search_run("problem-0", "search-0", run);
//!
//! assert_eq!(results.num_runs("problem-0", "search-0")?, 1);
//! let json = results.to_json();
//! assert_eq!(json["problem-0"]["search-0"][0]["times"][1], 333);
//! # Ok::<(), analyzer::Error>(())
//! ```
//!
//! Usually a store is produced by [`Analysis::run`] instead; see the
//! [`Analysis`] documentation for a complete experiment.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on result types and the [`serialize_solution`] converter | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key experiment points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod analysis;
mod error;
#[cfg(feature = "serde")]
mod json;
mod results;
mod run;
mod search;
mod update;

pub use analysis::Analysis;
pub use error::{Error, Result};
#[cfg(feature = "serde")]
pub use json::serialize_solution;
pub use results::AnalysisResults;
pub use run::SearchRunResults;
pub use search::{Search, SearchFactory, SearchListener};
pub use update::BestSolutionUpdate;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use analyzer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::Analysis;
    pub use crate::error::{Error, Result};
    #[cfg(feature = "serde")]
    pub use crate::json::serialize_solution;
    pub use crate::results::AnalysisResults;
    pub use crate::run::SearchRunResults;
    pub use crate::search::{Search, SearchFactory, SearchListener};
    pub use crate::update::BestSolutionUpdate;
}
