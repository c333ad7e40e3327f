//! Shared helpers for speedrun benchmark suites.

use std::collections::BTreeSet;

use speedrun_harness::embedding::{EmbeddingCache, HashedTrigramEncoder};
use speedrun_harness::runner::FixtureRunner;
use speedrun_harness::worlds::link_graph::InMemoryLinkGraph;
use speedrun_harness::worlds::synthetic::{layer_title, layered};
use speedrun_search::contract::NoHubs;
use speedrun_search::expand::{expand, ExpansionContext, ExpansionSummary};
use speedrun_search::node::{NodeId, SearchTree};
use speedrun_search::outcome::RunReport;
use speedrun_search::policy::SearchPolicy;
use speedrun_search::scorer::SemanticScorer;

/// A layered benchmark world and the endpoints to search between.
pub struct LayeredRegime {
    pub name: &'static str,
    pub graph: InMemoryLinkGraph,
    pub start: String,
    pub end: String,
}

/// Layered regimes of increasing width and fanout.
#[must_use]
pub fn layered_regimes() -> Vec<LayeredRegime> {
    [("narrow", 6, 20, 3), ("wide", 8, 200, 12), ("deep", 16, 50, 4)]
        .into_iter()
        .map(|(name, layers, width, fanout)| LayeredRegime {
            name,
            graph: layered(layers, width, fanout),
            start: layer_title(0, 0),
            end: layer_title(layers - 1, width / 2),
        })
        .collect()
}

/// `count` node handles in a fresh tree, root first.
#[must_use]
pub fn node_ids(count: usize) -> (SearchTree, Vec<NodeId>) {
    let mut tree = SearchTree::new();
    let root = tree.add_root("Root".into(), 0.0);
    let mut ids = vec![root];
    ids.extend((1..count).map(|i| tree.add_child(root, format!("Node {i}"), 0.0)));
    (tree, ids)
}

/// Expand a lone hub node of `graph` against `target`, with warm or cold
/// embeddings as given by `cache`.
///
/// # Panics
///
/// Panics if the hub's neighbor fetch fails. Benchmark setup failures are fatal.
pub fn expand_hub(
    graph: &InMemoryLinkGraph,
    cache: &EmbeddingCache<HashedTrigramEncoder>,
    hub: &str,
    target: &str,
    policy: &SearchPolicy,
) -> ExpansionSummary {
    let scorer = SemanticScorer::new(cache, &NoHubs);
    let ctx = ExpansionContext {
        graph,
        embeddings: cache,
        scorer: &scorer,
        policy,
        target,
    };
    let mut tree = SearchTree::new();
    let root = tree.add_root(hub.to_string(), 0.0);
    let empty = BTreeSet::new();
    expand(&mut tree, root, &ctx, &empty, &empty).expect("hub expansion")
}

/// One full run over a regime with a fresh runner (cold embedding cache).
///
/// # Panics
///
/// Panics if `policy` is invalid.
#[must_use]
pub fn run_regime(regime: &LayeredRegime, policy: &SearchPolicy) -> RunReport {
    FixtureRunner::new(regime.graph.clone())
        .run(&regime.start, &regime.end, policy)
        .expect("valid policy")
}
