use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::results::AnalysisResults;
use crate::run::SearchRunResults;
use crate::search::SearchListener;

use super::Analysis;

impl<P, S> Analysis<P, S>
where
    S: Clone + 'static,
{
    /// Run the analysis.
    ///
    /// Problems are processed one at a time; for every problem, every added
    /// search is first executed for its burn-in runs (results discarded)
    /// and then for its measured runs, each measured run recording one
    /// [`SearchRunResults`] into the returned store. Every run uses a fresh
    /// search instance created by the registered factory, so repeats share
    /// no state.
    ///
    /// The returned results can be queried directly or written to a JSON
    /// file via [`AnalysisResults::write_json`].
    ///
    /// # Errors
    ///
    /// The first error surfaced while creating, running or disposing a
    /// search aborts the whole analysis; no partial results are returned.
    pub fn run(&self) -> Result<AnalysisResults<S>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "analysis",
            num_problems = self.problems.len(),
            num_searches = self.searches.len(),
        )
        .entered();

        trace_info!(
            num_problems = self.problems.len(),
            num_searches = self.searches.len(),
            "analysis started"
        );

        let mut results = AnalysisResults::new();

        for (problem_id, problem) in &self.problems {
            trace_info!(%problem_id, "analyzing problem");

            for (search_id, factory) in &self.searches {
                let num_burn_in = self.num_burn_in_for(search_id)?;
                for _ in 0..num_burn_in {
                    trace_info!(%search_id, %problem_id, "burn-in run");
                    let mut search = factory.create(problem)?;
                    search.start()?;
                    search.dispose()?;
                }

                let num_runs = self.num_runs_for(search_id)?;
                for _ in 0..num_runs {
                    trace_info!(%search_id, %problem_id, "measured run");
                    let mut search = factory.create(problem)?;
                    let recording = Arc::new(Mutex::new(SearchRunResults::new()));
                    search.add_listener(Box::new(RunRecorder {
                        run: Arc::clone(&recording),
                    }));
                    search.start()?;
                    search.dispose()?;
                    drop(search);

                    // The search and its listener box are gone, so the Arc
                    // is normally unique again; a search that leaks its
                    // listeners costs one clone.
                    let run = Arc::try_unwrap(recording)
                        .map(Mutex::into_inner)
                        .unwrap_or_else(|shared| shared.lock().clone());
                    trace_info!(
                        %search_id,
                        %problem_id,
                        num_updates = run.num_updates(),
                        "search run registered"
                    );
                    results.register_search_run(problem_id.clone(), search_id.clone(), run);
                }
            }

            trace_info!(%problem_id, "problem done");
        }

        trace_info!("analysis complete");

        Ok(results)
    }
}

/// Listens to a running search and records every improvement into the run
/// shared with the driver.
struct RunRecorder<S> {
    run: Arc<Mutex<SearchRunResults<S>>>,
}

impl<S: Clone> SearchListener<S> for RunRecorder<S> {
    fn new_best_solution(&mut self, time: u64, value: f64, solution: &S, _valid: bool) {
        trace_debug!(time, value, "new best solution");
        self.run.lock().update_best_solution(time, value, solution.clone());
    }
}
