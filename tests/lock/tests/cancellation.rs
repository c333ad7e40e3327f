//! Cancellation and time-limit lock tests.
//!
//! Proves:
//! 1. A signal set while the root is expanded stops the run before any pop
//! 2. A signal set mid-run yields `NotFound` even when a path exists
//! 3. A stale signal from a previous run does not cancel the next one
//! 4. A zero time limit yields `NotFound` with `TimedOut`
//! 5. A signal set from another thread is observed

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use lock_tests::graph_helpers::{graph, policy, CancelOnFetch, MODES};
use speedrun_harness::embedding::{EmbeddingCache, HashedTrigramEncoder};
use speedrun_harness::worlds::link_graph::InMemoryLinkGraph;
use speedrun_search::contract::{CancelSignal, GraphProvider};
use speedrun_search::engine::SearchEngine;
use speedrun_search::error::ProviderError;
use speedrun_search::outcome::{RunReport, RunResult, TerminationReason};
use speedrun_search::policy::SearchPolicy;
use speedrun_search::scorer::UniformScorer;

fn line() -> InMemoryLinkGraph {
    graph(&[
        ("Alpha", &["Beta"]),
        ("Beta", &["Gamma"]),
        ("Gamma", &["Delta"]),
        ("Delta", &["Omega"]),
    ])
}

fn run_with_trigger(trigger: &str, policy: &SearchPolicy) -> (RunReport, usize) {
    let signal = CancelSignal::new();
    let graph = CancelOnFetch::new(line(), trigger, signal.clone());
    let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
    let engine = SearchEngine::new(&graph, &embeddings, &UniformScorer, signal);
    let report = engine.run_with_report("Alpha", "Omega", policy).unwrap();
    (report, graph.fetches())
}

// ---------------------------------------------------------------------------
// 1-2. Signals raised during the run
// ---------------------------------------------------------------------------

#[test]
fn cancel_during_root_expansion_stops_before_first_pop() {
    for mode in MODES {
        let (report, fetches) = run_with_trigger("Alpha", &policy(20, mode));
        assert_eq!(report.result, RunResult::NotFound, "{mode:?}");
        assert_eq!(report.termination, Some(TerminationReason::Cancelled));
        assert_eq!(report.stats.expansions, 0);
        assert_eq!(fetches, 1);
    }
}

#[test]
fn cancel_mid_run_is_not_found_although_a_path_exists() {
    for mode in MODES {
        let (report, _) = run_with_trigger("Gamma", &policy(20, mode));
        assert_eq!(report.result, RunResult::NotFound, "{mode:?}");
        assert_eq!(report.termination, Some(TerminationReason::Cancelled));
    }

    let (uncancelled, _) = run_with_trigger("Nowhere", &SearchPolicy::default());
    assert_eq!(
        uncancelled.result.path().unwrap(),
        ["Alpha", "Beta", "Gamma", "Delta", "Omega"]
    );
}

// ---------------------------------------------------------------------------
// 3. Stale signals
// ---------------------------------------------------------------------------

#[test]
fn stale_signal_is_cleared_at_run_start() {
    let graph = line();
    let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
    let signal = CancelSignal::new();
    let engine = SearchEngine::new(&graph, &embeddings, &UniformScorer, signal.clone());

    signal.set();
    let result = engine.run("Alpha", "Omega", &SearchPolicy::default()).unwrap();
    assert!(result.is_found());
    assert!(!signal.is_set());
}

// ---------------------------------------------------------------------------
// 4. Time limit
// ---------------------------------------------------------------------------

#[test]
fn zero_time_limit_times_out() {
    let policy = SearchPolicy {
        time_limit: Duration::ZERO,
        ..SearchPolicy::default()
    };
    let (report, _) = run_with_trigger("Nowhere", &policy);
    assert_eq!(report.result, RunResult::NotFound);
    assert_eq!(report.termination, Some(TerminationReason::TimedOut));
}

// ---------------------------------------------------------------------------
// 5. Cross-thread cancellation
// ---------------------------------------------------------------------------

/// Endless graph with slow fetches; a run over it never finishes on its own.
struct Endless {
    started: AtomicBool,
}

impl GraphProvider for Endless {
    fn exists(&self, _title: &str) -> bool {
        true
    }

    fn neighbors(&self, title: &str) -> Result<Vec<String>, ProviderError> {
        self.started.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(1));
        Ok((0..3).map(|i| format!("{title}/{i}")).collect())
    }
}

#[test]
fn signal_from_another_thread_cancels_the_run() {
    let graph = Endless {
        started: AtomicBool::new(false),
    };
    let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
    let signal = CancelSignal::new();
    let engine = SearchEngine::new(&graph, &embeddings, &UniformScorer, signal.clone());
    let policy = SearchPolicy {
        max_depth: u32::MAX,
        time_limit: Duration::from_secs(30),
        ..SearchPolicy::default()
    };

    let report = thread::scope(|scope| {
        let run = scope.spawn(|| engine.run_with_report("Root", "Unreachable goal", &policy));
        while !graph.started.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        thread::sleep(Duration::from_millis(20));
        signal.set();
        run.join().unwrap()
    })
    .unwrap();

    assert_eq!(report.result, RunResult::NotFound);
    assert_eq!(report.termination, Some(TerminationReason::Cancelled));
}
