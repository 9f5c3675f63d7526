//! Ready-made solution converters for the JSON export.

use serde::Serialize;
use serde_json::Value;

/// Convert a solution to JSON using its `Serialize` implementation.
///
/// Predefined converter for
/// [`write_json_with`](crate::AnalysisResults::write_json_with) and
/// [`to_json_with`](crate::AnalysisResults::to_json_with), covering the
/// common case where solutions already derive `Serialize`. Solutions whose
/// serialization fails (e.g. maps with non-string keys) are rendered as
/// `null`.
///
/// # Examples
///
/// ```
/// use analyzer::{serialize_solution, AnalysisResults, SearchRunResults};
///
/// let mut run = SearchRunResults::new();
/// run.update_best_solution(12, 0.334, vec![4, 6, 1, 2, 19]);
///
/// let mut results = AnalysisResults::new();
/// results.register_search_run("problem-0", "search-0", run);
///
/// let json = results.to_json_with(serialize_solution);
/// assert_eq!(json["problem-0"]["search-0"][0]["best.solution"][0], 4);
/// ```
#[must_use]
pub fn serialize_solution<S: Serialize>(solution: &S) -> Value {
    serde_json::to_value(solution).unwrap_or(Value::Null)
}
