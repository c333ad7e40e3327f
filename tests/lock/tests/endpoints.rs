//! Endpoint resolution lock tests.
//!
//! Proves:
//! 1. A missing start page yields `StartMissing` without any neighbor fetch
//! 2. A missing end page yields `EndMissing`; start is checked first
//! 3. Start and end that differ only in case yield a one-title path
//! 4. Paths report the graph's canonical casing

use lock_tests::graph_helpers::{graph, policy, CancelOnFetch, MODES};
use speedrun_harness::embedding::{EmbeddingCache, HashedTrigramEncoder};
use speedrun_harness::report::{RunSummary, END_MISSING_MESSAGE, START_MISSING_MESSAGE};
use speedrun_harness::runner::FixtureRunner;
use speedrun_search::contract::CancelSignal;
use speedrun_search::engine::SearchEngine;
use speedrun_search::outcome::RunResult;
use speedrun_search::policy::SearchPolicy;
use speedrun_search::scorer::UniformScorer;

fn run(start: &str, end: &str) -> (RunResult, usize) {
    // The unused signal never fires: the trigger page does not exist.
    let signal = CancelSignal::new();
    let graph = CancelOnFetch::new(
        graph(&[("Alpha", &["Beta"]), ("Beta", &["Gamma"])]),
        "Nowhere",
        signal.clone(),
    );
    let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
    let engine = SearchEngine::new(&graph, &embeddings, &UniformScorer, signal);
    let result = engine.run(start, end, &SearchPolicy::default()).unwrap();
    (result, graph.fetches())
}

// ---------------------------------------------------------------------------
// 1-2. Missing endpoints
// ---------------------------------------------------------------------------

#[test]
fn missing_start_is_reported_without_searching() {
    let (result, fetches) = run("Omega", "Beta");
    assert_eq!(result, RunResult::StartMissing);
    assert_eq!(fetches, 0);
}

#[test]
fn missing_end_is_reported_without_searching() {
    let (result, fetches) = run("Alpha", "Omega");
    assert_eq!(result, RunResult::EndMissing);
    assert_eq!(fetches, 0);
}

#[test]
fn start_is_checked_before_end() {
    let (result, _) = run("Omega", "Psi");
    assert_eq!(result, RunResult::StartMissing);
}

#[test]
fn missing_endpoints_map_to_error_messages() {
    let runner = FixtureRunner::new(graph(&[("Alpha", &["Beta"])]));
    let start = runner.run("Omega", "Beta", &SearchPolicy::default()).unwrap();
    assert_eq!(RunSummary::from_report(&start).message, Some(START_MISSING_MESSAGE));
    let end = runner.run("Alpha", "Omega", &SearchPolicy::default()).unwrap();
    assert_eq!(RunSummary::from_report(&end).message, Some(END_MISSING_MESSAGE));
    assert_eq!(end.termination, None);
}

// ---------------------------------------------------------------------------
// 3-4. Normalization and canonical casing
// ---------------------------------------------------------------------------

#[test]
fn case_insensitive_identity_is_a_one_title_path() {
    for mode in MODES {
        let graph = graph(&[("A", &["B"])]);
        let runner = FixtureRunner::new(graph);
        let report = runner.run("A", "a", &policy(20, mode)).unwrap();
        assert_eq!(report.result.path().unwrap(), ["A"], "{mode:?}");
    }
}

#[test]
fn path_uses_canonical_casing() {
    let (result, _) = run("alpha", "GAMMA");
    assert_eq!(result.path().unwrap(), ["Alpha", "Beta", "Gamma"]);
}
