//! Contracts implemented by the optimization framework under analysis.
//!
//! The analysis never inspects concrete search, problem or solution types.
//! It drives searches exclusively through the traits in this module: a
//! [`SearchFactory`] creates a fresh [`Search`] for every run, the search
//! runs to completion under its own stopping rule, and improvements are
//! reported synchronously to every registered [`SearchListener`].
//!
//! Problems need no trait at all; they are an opaque type parameter handed
//! to factories as-is.

use crate::error::Result;

/// A single execution of a search algorithm applied to a problem instance.
///
/// A search owns its stopping rule: [`start`](Search::start) blocks until
/// the search decides it is done. The analysis imposes no time budget and
/// performs no cancellation.
pub trait Search<S> {
    /// Run the search to completion, blocking until its own stop condition
    /// is met.
    ///
    /// While running, the search must invoke
    /// [`SearchListener::new_best_solution`] on every registered listener
    /// each time its best solution improves, on the calling thread.
    ///
    /// # Errors
    ///
    /// Implementations surface any internal failure; the analysis aborts
    /// on the first error.
    fn start(&mut self) -> Result<()>;

    /// Release any resources held by the search.
    ///
    /// Called exactly once, after [`start`](Search::start) has returned.
    ///
    /// # Errors
    ///
    /// Implementations surface any failure to release resources; the
    /// analysis aborts on the first error.
    fn dispose(&mut self) -> Result<()>;

    /// Register a listener to be notified of best solution updates.
    ///
    /// Listeners are registered before [`start`](Search::start) and must
    /// be retained for the lifetime of the search.
    fn add_listener(&mut self, listener: Box<dyn SearchListener<S>>);

    /// Time elapsed since the search was started, in milliseconds.
    ///
    /// The `time` passed to listeners must equal this value at the moment
    /// of the corresponding improvement.
    fn elapsed_runtime(&self) -> u64;
}

/// Callback invoked by a running search each time its best solution
/// improves.
///
/// Invocation is synchronous, on the thread executing the search; no
/// concurrency is involved. Closures of the matching shape implement this
/// trait, so a listener can be as simple as:
///
/// ```
/// use analyzer::SearchListener;
///
/// let mut seen = Vec::new();
/// let mut listener = |time: u64, value: f64, _solution: &String, _valid: bool| {
///     seen.push((time, value));
/// };
/// listener.new_best_solution(12, 0.334, &"abc".to_string(), true);
/// assert_eq!(seen, vec![(12, 0.334)]);
/// ```
pub trait SearchListener<S> {
    /// Called with the elapsed runtime at which the improvement occurred
    /// (in milliseconds), the evaluation value of the new best solution,
    /// the solution itself and the outcome of its validation.
    fn new_best_solution(&mut self, time: u64, value: f64, solution: &S, valid: bool);
}

impl<S, F> SearchListener<S> for F
where
    F: FnMut(u64, f64, &S, bool),
{
    fn new_best_solution(&mut self, time: u64, value: f64, solution: &S, valid: bool) {
        self(time, value, solution, valid);
    }
}

/// Creates a fresh search per run.
///
/// The analysis requires a factory instead of a plain search because a new
/// search instance is created for every run of every analyzed problem, so
/// that randomized algorithms are not biased by state shared across
/// repeats. Closures of the matching shape implement this trait:
///
/// ```no_run
/// use analyzer::{Result, Search, SearchFactory};
/// # struct MySearch;
/// # impl MySearch { fn for_instance(_: &Vec<u32>) -> Self { MySearch } }
/// # impl Search<String> for MySearch {
/// #     fn start(&mut self) -> Result<()> { Ok(()) }
/// #     fn dispose(&mut self) -> Result<()> { Ok(()) }
/// #     fn add_listener(&mut self, _: Box<dyn analyzer::SearchListener<String>>) {}
/// #     fn elapsed_runtime(&self) -> u64 { 0 }
/// # }
///
/// let factory = |problem: &Vec<u32>| -> Result<Box<dyn Search<String>>> {
///     Ok(Box::new(MySearch::for_instance(problem)))
/// };
/// # let _: &dyn SearchFactory<Vec<u32>, String> = &factory;
/// ```
pub trait SearchFactory<P, S> {
    /// Create a new search bound to the given problem.
    ///
    /// # Errors
    ///
    /// Implementations surface any construction failure; the analysis
    /// aborts on the first error.
    fn create(&self, problem: &P) -> Result<Box<dyn Search<S>>>;
}

impl<P, S, F> SearchFactory<P, S> for F
where
    F: Fn(&P) -> Result<Box<dyn Search<S>>>,
{
    fn create(&self, problem: &P) -> Result<Box<dyn Search<S>>> {
        self(problem)
    }
}
