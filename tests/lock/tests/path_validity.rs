//! Found-path lock tests.
//!
//! Proves, under both expansion modes:
//! 1. A → B → C yields exactly `["A", "B", "C"]`
//! 2. Every found path starts at start, ends at end, follows real links,
//!    and has at most `max_depth + 1` titles
//! 3. A goal at depth `max_depth` or deeper is `NotFound`
//! 4. Unreachable pages are skipped, not fatal
//! 5. Links rejected by the link filter are never followed

use lock_tests::graph_helpers::{assert_valid_path, graph, policy, run_unfiltered, MODES};
use speedrun_harness::runner::FixtureRunner;
use speedrun_harness::worlds::synthetic::{chain, chain_title, layer_title, layered};
use speedrun_search::outcome::{RunResult, TerminationReason};
use speedrun_search::policy::{ExpansionMode, SearchPolicy};

// ---------------------------------------------------------------------------
// 1. Simple chain
// ---------------------------------------------------------------------------

#[test]
fn three_page_chain() {
    for mode in MODES {
        let fixture = graph(&[("A", &["B"]), ("B", &["C"])]);
        let report = run_unfiltered(&fixture, "A", "C", &policy(5, mode));
        assert_eq!(report.result.path().unwrap(), ["A", "B", "C"], "{mode:?}");
    }
}

// ---------------------------------------------------------------------------
// 2. Path validity on larger graphs
// ---------------------------------------------------------------------------

#[test]
fn layered_graph_paths_are_valid() {
    // Every last-layer page is reachable from the first page, and fanout 3
    // never exceeds the beam at depths 0..5, so the search must succeed.
    let fixture = layered(6, 12, 3);
    let start = layer_title(0, 0);
    for mode in MODES {
        let runner = FixtureRunner::new(fixture.clone());
        for index in [0, 4, 7, 11] {
            let end = layer_title(5, index);
            let report = runner.run(&start, &end, &policy(20, mode)).unwrap();
            let path = report
                .result
                .path()
                .unwrap_or_else(|| panic!("{mode:?}: no path to {end}: {:?}", report.termination));
            assert_valid_path(runner.graph(), path, &start, &end, 20);
            assert_eq!(path.len(), 6, "layers force exactly five hops");
        }
    }
}

#[test]
fn chain_within_depth_is_found_in_full() {
    let fixture = chain(8);
    for mode in MODES {
        let runner = FixtureRunner::new(fixture.clone());
        let start = chain_title(0);
        let end = chain_title(7);
        let report = runner.run(&start, &end, &policy(8, mode)).unwrap();
        let path = report.result.path().unwrap();
        assert_valid_path(runner.graph(), path, &start, &end, 8);
        assert_eq!(path.len(), 8);
    }
}

// ---------------------------------------------------------------------------
// 3. Depth limit
// ---------------------------------------------------------------------------

#[test]
fn target_beyond_max_depth_is_not_found() {
    for mode in MODES {
        let runner = FixtureRunner::new(graph(&[("Aaa", &["Bbb"]), ("Bbb", &["Ccc"])]));
        let report = runner.run("Aaa", "Ccc", &policy(1, mode)).unwrap();
        assert_eq!(report.result, RunResult::NotFound, "{mode:?}");
        assert_eq!(
            report.termination,
            Some(TerminationReason::FrontierExhausted)
        );
    }
}

#[test]
fn goal_at_exactly_max_depth_is_not_found() {
    let runner = FixtureRunner::new(chain(8));
    let report = runner
        .run(&chain_title(0), &chain_title(7), &policy(7, SearchPolicy::default().expansion))
        .unwrap();
    assert_eq!(report.result, RunResult::NotFound);
}

#[test]
fn no_path_within_depth_one() {
    for mode in MODES {
        let fixture = graph(&[("A", &["M"]), ("M", &["Z"])]);
        let report = run_unfiltered(&fixture, "A", "Z", &policy(1, mode));
        assert_eq!(report.result, RunResult::NotFound, "{mode:?}");
    }
}

// ---------------------------------------------------------------------------
// 4. Unreachable pages
// ---------------------------------------------------------------------------

#[test]
fn unreachable_branch_is_skipped() {
    for mode in MODES {
        let mut fixture = graph(&[
            ("Start", &["Broken", "Detour"]),
            ("Broken", &["Finish"]),
            ("Detour", &["Finish"]),
        ]);
        fixture.mark_unreachable("Broken");
        let runner = FixtureRunner::new(fixture);
        let report = runner.run("Start", "Finish", &policy(20, mode)).unwrap();
        assert_eq!(
            report.result.path().unwrap(),
            ["Start", "Detour", "Finish"],
            "{mode:?}"
        );
        if mode == ExpansionMode::Eager {
            // Eager mode pre-expands every child of the root.
            assert_eq!(report.stats.expansion_failures, 1);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Link filter
// ---------------------------------------------------------------------------

#[test]
fn filtered_links_are_not_hops() {
    // Single-letter titles fail the default link filter.
    let runner = FixtureRunner::new(graph(&[("A", &["B"]), ("B", &["C"])]));
    let report = runner.run("A", "C", &SearchPolicy::default()).unwrap();
    assert_eq!(report.result, RunResult::NotFound);
    assert_eq!(report.stats.dead_ends, 1);
}
