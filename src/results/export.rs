use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;

use super::AnalysisResults;

impl<S> AnalysisResults<S> {
    /// Build the JSON document describing these results.
    ///
    /// The document is one object keyed by problem ID; each value is an
    /// object keyed by search ID; each value is an array with one entry per
    /// run, in registration order. Every run entry carries a `"times"`
    /// array of integers and a `"values"` array of numbers, both present
    /// even for runs without updates. Solutions are skipped; use
    /// [`to_json_with`](AnalysisResults::to_json_with) to include them.
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.json_document(None)
    }

    /// Build the JSON document, converting each run's final best solution
    /// with the given converter.
    ///
    /// In addition to `"times"` and `"values"`, each run entry carries a
    /// `"best.solution"` key holding the converted best solution. Runs
    /// without updates have no best solution and no `"best.solution"` key.
    #[allow(clippy::needless_pass_by_value)]
    #[must_use]
    pub fn to_json_with<F>(&self, convert: F) -> Value
    where
        F: Fn(&S) -> Value,
    {
        self.json_document(Some(&convert))
    }

    /// Write the results to a JSON file for external analysis, skipping the
    /// best found solutions.
    ///
    /// The document (see [`to_json`](AnalysisResults::to_json)) is written
    /// as a single line of UTF-8 text; an existing file at `path` is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_document(path.as_ref(), None)
    }

    /// Write the results to a JSON file for external analysis, including
    /// each run's final best solution converted with the given converter.
    ///
    /// See [`to_json_with`](AnalysisResults::to_json_with) for the document
    /// layout and [`write_json`](AnalysisResults::write_json) for the file
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use analyzer::{AnalysisResults, SearchRunResults};
    /// use serde_json::Value;
    ///
    /// let mut run = SearchRunResults::new();
    /// run.update_best_solution(12, 0.334, vec![4, 6, 1, 2, 19]);
    ///
    /// let mut results = AnalysisResults::new();
    /// results.register_search_run("problem-0", "search-0", run);
    ///
    /// // Render each best solution as the array of selected IDs.
    /// results.write_json_with("results.json", |sol: &Vec<u32>| {
    ///     Value::from(sol.clone())
    /// })?;
    /// # Ok::<(), analyzer::Error>(())
    /// ```
    #[allow(clippy::needless_pass_by_value)]
    pub fn write_json_with<F>(&self, path: impl AsRef<Path>, convert: F) -> Result<()>
    where
        F: Fn(&S) -> Value,
    {
        self.write_document(path.as_ref(), Some(&convert))
    }

    fn write_document(&self, path: &Path, convert: Option<&dyn Fn(&S) -> Value>) -> Result<()> {
        let document = self.json_document(convert);
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn json_document(&self, convert: Option<&dyn Fn(&S) -> Value>) -> Value {
        let mut document = Map::new();
        for (problem_id, searches) in &self.results {
            let mut problem_json = Map::new();
            for (search_id, runs) in searches {
                let runs_json = runs
                    .iter()
                    .map(|run| {
                        let mut run_json = Map::new();
                        run_json.insert("times".to_string(), Value::from(run.times().to_vec()));
                        run_json.insert("values".to_string(), Value::from(run.values().to_vec()));
                        if let Some(convert) = convert {
                            if let Some(best) = run.best_solution() {
                                run_json.insert("best.solution".to_string(), convert(best));
                            }
                        }
                        Value::Object(run_json)
                    })
                    .collect();
                problem_json.insert(search_id.clone(), Value::Array(runs_json));
            }
            document.insert(problem_id.clone(), Value::Object(problem_json));
        }
        Value::Object(document)
    }
}
