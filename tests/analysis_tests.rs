use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use analyzer::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Solution = Vec<u32>;

/// Problem stand-in: a scripted sequence of improvements every search run
/// will report.
#[derive(Clone)]
struct ScriptedProblem {
    improvements: Vec<(u64, f64, Solution)>,
}

impl ScriptedProblem {
    fn descending() -> Self {
        Self {
            improvements: vec![
                (12, 0.8, vec![3, 6, 1]),
                (333, 0.5, vec![4, 6, 1]),
                (425, 0.2, vec![4, 6, 2]),
            ],
        }
    }
}

/// Search stand-in that replays its problem's scripted improvements.
struct ScriptedSearch {
    improvements: Vec<(u64, f64, Solution)>,
    listeners: Vec<Box<dyn SearchListener<Solution>>>,
    elapsed: u64,
}

impl ScriptedSearch {
    fn new(problem: &ScriptedProblem) -> Self {
        Self {
            improvements: problem.improvements.clone(),
            listeners: Vec::new(),
            elapsed: 0,
        }
    }
}

impl Search<Solution> for ScriptedSearch {
    fn start(&mut self) -> Result<()> {
        let improvements = self.improvements.clone();
        for (time, value, solution) in improvements {
            self.elapsed = time;
            for listener in &mut self.listeners {
                listener.new_best_solution(time, value, &solution, true);
            }
        }
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        Ok(())
    }

    fn add_listener(&mut self, listener: Box<dyn SearchListener<Solution>>) {
        self.listeners.push(listener);
    }

    fn elapsed_runtime(&self) -> u64 {
        self.elapsed
    }
}

/// Factory counting how many searches it created.
fn counting_factory(
    counter: Arc<AtomicUsize>,
) -> impl Fn(&ScriptedProblem) -> Result<Box<dyn Search<Solution>>> {
    move |problem: &ScriptedProblem| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSearch::new(problem)))
    }
}

#[test]
fn default_settings() {
    let analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    assert_eq!(analysis.num_runs(), 10);
    assert_eq!(analysis.num_burn_in(), 1);
}

#[test]
fn set_num_runs_validates_and_keeps_previous_value_on_error() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    assert!(matches!(analysis.set_num_runs(0), Err(Error::InvalidNumRuns)));
    assert_eq!(analysis.num_runs(), 10);

    analysis.set_num_runs(123).unwrap();
    assert_eq!(analysis.num_runs(), 123);

    assert!(matches!(analysis.set_num_runs(0), Err(Error::InvalidNumRuns)));
    assert_eq!(analysis.num_runs(), 123);
}

#[test]
fn set_num_burn_in_validates_and_keeps_previous_value_on_error() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    assert!(matches!(
        analysis.set_num_burn_in(0),
        Err(Error::InvalidNumBurnIn)
    ));
    assert_eq!(analysis.num_burn_in(), 1);

    analysis.set_num_burn_in(44).unwrap();
    assert_eq!(analysis.num_burn_in(), 44);
}

#[test]
fn per_search_counts_require_a_registered_search() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    assert!(matches!(
        analysis.num_runs_for("i-do-not-exist"),
        Err(Error::SearchNotAdded(_))
    ));
    assert!(matches!(
        analysis.set_num_runs_for("i-do-not-exist", 5),
        Err(Error::SearchNotAdded(_))
    ));
    assert!(matches!(
        analysis.num_burn_in_for("i-do-not-exist"),
        Err(Error::SearchNotAdded(_))
    ));
    assert!(matches!(
        analysis.set_num_burn_in_for("i-do-not-exist", 5),
        Err(Error::SearchNotAdded(_))
    ));
}

#[test]
fn per_search_counts_override_the_global_defaults() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    let counter = Arc::new(AtomicUsize::new(0));
    analysis
        .add_search("search-0", counting_factory(Arc::clone(&counter)))
        .unwrap();

    // Without an override, the global value applies.
    assert_eq!(analysis.num_runs_for("search-0").unwrap(), 10);
    assert_eq!(analysis.num_burn_in_for("search-0").unwrap(), 1);

    analysis.set_num_runs_for("search-0", 3).unwrap();
    analysis.set_num_burn_in_for("search-0", 2).unwrap();
    assert_eq!(analysis.num_runs_for("search-0").unwrap(), 3);
    assert_eq!(analysis.num_burn_in_for("search-0").unwrap(), 2);

    // Changing the globals no longer affects the overridden search.
    analysis.set_num_runs(50).unwrap();
    analysis.set_num_burn_in(5).unwrap();
    assert_eq!(analysis.num_runs_for("search-0").unwrap(), 3);
    assert_eq!(analysis.num_burn_in_for("search-0").unwrap(), 2);

    // Invalid overrides are rejected and leave the setting unchanged.
    assert!(matches!(
        analysis.set_num_runs_for("search-0", 0),
        Err(Error::InvalidNumRuns)
    ));
    assert_eq!(analysis.num_runs_for("search-0").unwrap(), 3);
}

#[test]
fn duplicate_ids_are_rejected_and_existing_registrations_survive() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();
    assert!(matches!(
        analysis.add_problem(
            "problem-0",
            ScriptedProblem {
                improvements: Vec::new()
            }
        ),
        Err(Error::DuplicateProblemId(id)) if id == "problem-0"
    ));

    let counter = Arc::new(AtomicUsize::new(0));
    analysis
        .add_search("search-0", counting_factory(Arc::clone(&counter)))
        .unwrap();
    assert!(matches!(
        analysis.add_search("search-0", counting_factory(Arc::new(AtomicUsize::new(0)))),
        Err(Error::DuplicateSearchId(id)) if id == "search-0"
    ));

    // The original problem registration survived the duplicate attempt:
    // its scripted improvements are still what gets recorded.
    analysis.set_num_runs(1).unwrap();
    let results = analysis.run().unwrap();
    let run = results.get_run("problem-0", "search-0", 0).unwrap();
    assert_eq!(run.times(), &[12, 333, 425]);
}

#[test]
fn experiment_runs_every_search_on_every_problem() {
    let mut analysis = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap()
        .add_problem("problem-1", ScriptedProblem::descending())
        .unwrap();

    let counter0 = Arc::new(AtomicUsize::new(0));
    let counter1 = Arc::new(AtomicUsize::new(0));
    analysis
        .add_search("search-0", counting_factory(Arc::clone(&counter0)))
        .unwrap()
        .add_search("search-1", counting_factory(Arc::clone(&counter1)))
        .unwrap();
    analysis.set_num_runs_for("search-1", 1).unwrap();

    let results = analysis.run().unwrap();

    assert_eq!(results.num_problems(), 2);
    for problem_id in ["problem-0", "problem-1"] {
        assert_eq!(results.num_runs(problem_id, "search-0").unwrap(), 10);
        assert_eq!(results.num_runs(problem_id, "search-1").unwrap(), 1);
    }

    // One burn-in per problem on top of the measured runs.
    assert_eq!(counter0.load(Ordering::SeqCst), 2 * (1 + 10));
    assert_eq!(counter1.load(Ordering::SeqCst), 2 * (1 + 1));

    // Every recorded run carries the full trace with non-decreasing times
    // and improving (here: decreasing) values.
    for problem_id in ["problem-0", "problem-1"] {
        for index in 0..10 {
            let run = results.get_run(problem_id, "search-0", index).unwrap();
            assert_eq!(run.num_updates(), 3);
            assert!(run.times().windows(2).all(|w| w[0] <= w[1]));
            assert!(run.values().windows(2).all(|w| w[0] > w[1]));
            assert_eq!(run.best_solution(), Some(&vec![4, 6, 2]));
        }
    }
}

#[test]
fn every_search_instance_is_disposed() {
    struct DisposeCounting {
        inner: ScriptedSearch,
        disposals: Arc<AtomicUsize>,
    }

    impl Search<Solution> for DisposeCounting {
        fn start(&mut self) -> Result<()> {
            self.inner.start()
        }

        fn dispose(&mut self) -> Result<()> {
            self.disposals.fetch_add(1, Ordering::SeqCst);
            self.inner.dispose()
        }

        fn add_listener(&mut self, listener: Box<dyn SearchListener<Solution>>) {
            self.inner.add_listener(listener);
        }

        fn elapsed_runtime(&self) -> u64 {
            self.inner.elapsed_runtime()
        }
    }

    let mut analysis = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();

    let disposals = Arc::new(AtomicUsize::new(0));
    let disposals_in_factory = Arc::clone(&disposals);
    analysis
        .add_search("search-0", move |problem: &ScriptedProblem| -> Result<Box<dyn Search<Solution>>> {
            Ok(Box::new(DisposeCounting {
                inner: ScriptedSearch::new(problem),
                disposals: Arc::clone(&disposals_in_factory),
            }))
        })
        .unwrap();
    analysis.set_num_runs(4).unwrap();

    analysis.run().unwrap();

    // Burn-in and measured instances alike are disposed.
    assert_eq!(disposals.load(Ordering::SeqCst), 1 + 4);
}

#[test]
fn burn_in_runs_are_executed_but_not_recorded() {
    let mut analysis = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    analysis
        .add_search("search-0", counting_factory(Arc::clone(&counter)))
        .unwrap();
    analysis
        .set_num_burn_in_for("search-0", 3)
        .unwrap()
        .set_num_runs_for("search-0", 2)
        .unwrap();

    let results = analysis.run().unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 3 + 2);
    assert_eq!(results.num_runs("problem-0", "search-0").unwrap(), 2);
}

#[test]
fn searches_without_updates_register_empty_runs() {
    let mut analysis = Analysis::new();
    analysis
        .add_problem(
            "problem-0",
            ScriptedProblem {
                improvements: Vec::new(),
            },
        )
        .unwrap();
    analysis
        .add_search("search-0", |problem: &ScriptedProblem| -> Result<Box<dyn Search<Solution>>> {
            Ok(Box::new(ScriptedSearch::new(problem)))
        })
        .unwrap();
    analysis.set_num_runs(2).unwrap();

    let results = analysis.run().unwrap();
    let run = results.get_run("problem-0", "search-0", 0).unwrap();
    assert_eq!(run.num_updates(), 0);
    assert!(run.best_solution().is_none());
}

#[test]
fn factory_failure_aborts_the_whole_experiment() {
    let mut analysis: Analysis<ScriptedProblem, Solution> = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();
    analysis
        .add_search("broken", |_: &ScriptedProblem| -> Result<Box<dyn Search<Solution>>> {
            Err(Error::search("no such neighbourhood"))
        })
        .unwrap();

    assert!(matches!(analysis.run(), Err(Error::Search(_))));
}

#[test]
fn start_failure_aborts_the_whole_experiment() {
    struct FailingSearch;

    impl Search<Solution> for FailingSearch {
        fn start(&mut self) -> Result<()> {
            Err(Error::search("solution generator exhausted"))
        }

        fn dispose(&mut self) -> Result<()> {
            Ok(())
        }

        fn add_listener(&mut self, _listener: Box<dyn SearchListener<Solution>>) {}

        fn elapsed_runtime(&self) -> u64 {
            0
        }
    }

    let mut analysis = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let counter_in_factory = Arc::clone(&counter);
    analysis
        .add_search("failing", move |_: &ScriptedProblem| -> Result<Box<dyn Search<Solution>>> {
            counter_in_factory.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FailingSearch))
        })
        .unwrap();

    assert!(matches!(analysis.run(), Err(Error::Search(_))));
    // The first burn-in run already fails; nothing else was attempted.
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

/// Search stand-in with a randomized but converging trace, as a randomized
/// descent would produce.
struct RandomizedDescent {
    rng: StdRng,
    listeners: Vec<Box<dyn SearchListener<Solution>>>,
    elapsed: u64,
}

impl Search<Solution> for RandomizedDescent {
    fn start(&mut self) -> Result<()> {
        let mut value = 1.0;
        let mut time = 0;
        for step in 0..20u32 {
            time += u64::from(self.rng.gen_range(1..50u32));
            value *= self.rng.gen_range(0.5..0.99);
            self.elapsed = time;
            let solution = vec![step];
            for listener in &mut self.listeners {
                listener.new_best_solution(time, value, &solution, true);
            }
        }
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        Ok(())
    }

    fn add_listener(&mut self, listener: Box<dyn SearchListener<Solution>>) {
        self.listeners.push(listener);
    }

    fn elapsed_runtime(&self) -> u64 {
        self.elapsed
    }
}

#[test]
fn randomized_searches_record_monotone_traces() {
    let mut analysis = Analysis::new();
    analysis
        .add_problem("problem-0", ScriptedProblem::descending())
        .unwrap();

    let seed = Arc::new(AtomicUsize::new(0));
    analysis
        .add_search("random-descent", move |_: &ScriptedProblem| -> Result<Box<dyn Search<Solution>>> {
            // A fresh, independently seeded instance per run.
            let run_seed = seed.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(Box::new(RandomizedDescent {
                rng: StdRng::seed_from_u64(run_seed),
                listeners: Vec::new(),
                elapsed: 0,
            }))
        })
        .unwrap();
    analysis.set_num_runs(5).unwrap();

    let results = analysis.run().unwrap();

    assert_eq!(results.num_runs("problem-0", "random-descent").unwrap(), 5);
    for index in 0..5 {
        let run = results.get_run("problem-0", "random-descent", index).unwrap();
        assert_eq!(run.num_updates(), 20);
        assert!(run.times().windows(2).all(|w| w[0] <= w[1]));
        assert!(run.values().windows(2).all(|w| w[0] > w[1]));
    }
    // Independent instances produce different traces.
    let first = results.get_run("problem-0", "random-descent", 0).unwrap();
    let second = results.get_run("problem-0", "random-descent", 1).unwrap();
    assert_ne!(first.values(), second.values());
}
