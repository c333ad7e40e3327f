//! Provider panic lock tests.
//!
//! Proves:
//! 1. A hub listing whose fetch panics leaves scoring intact and the run
//!    still finds its path
//! 2. A scorer that panics mid-run only degrades the affected scores
//! 3. An embedding provider that panics on every batch, endpoints
//!    included, does not abort the run

use std::sync::Arc;

use lock_tests::graph_helpers::{graph, policy, MODES};
use speedrun_harness::embedding::{EmbeddingCache, HashedTrigramEncoder};
use speedrun_harness::hubs::{PopularPages, POPULAR_PAGES_TITLE};
use speedrun_harness::worlds::link_graph::InMemoryLinkGraph;
use speedrun_search::contract::{CancelSignal, EmbeddingProvider, GraphProvider};
use speedrun_search::engine::SearchEngine;
use speedrun_search::error::ProviderError;
use speedrun_search::scorer::{HeuristicScorer, SemanticScorer, UniformScorer};

/// Panics when asked for the hub listing's links; defers otherwise.
struct ExplodingListing(InMemoryLinkGraph);

impl GraphProvider for ExplodingListing {
    fn exists(&self, title: &str) -> bool {
        self.0.exists(title)
    }

    fn canonical_title(&self, title: &str) -> Option<String> {
        self.0.canonical_title(title)
    }

    fn neighbors(&self, title: &str) -> Result<Vec<String>, ProviderError> {
        assert!(title != POPULAR_PAGES_TITLE, "listing backend exploded");
        self.0.neighbors(title)
    }
}

fn line() -> InMemoryLinkGraph {
    graph(&[("Alpha", &["Beta"]), ("Beta", &["Gamma"])])
}

// ---------------------------------------------------------------------------
// 1. Hub listing
// ---------------------------------------------------------------------------

#[test]
fn exploding_hub_listing_does_not_escape_run() {
    for mode in MODES {
        let graph = ExplodingListing(line());
        let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
        let hubs = PopularPages::new(&graph);
        let scorer = SemanticScorer::new(&embeddings, &hubs);
        let engine = SearchEngine::new(&graph, &embeddings, &scorer, CancelSignal::new());

        let result = engine.run("Alpha", "Gamma", &policy(20, mode)).unwrap();
        assert_eq!(result.path().unwrap(), ["Alpha", "Beta", "Gamma"], "{mode:?}");
        assert!(hubs.pages().is_empty());
    }
}

// ---------------------------------------------------------------------------
// 2. Scorer
// ---------------------------------------------------------------------------

/// Panics on one title; scores everything else equally.
struct ExplodesOn(&'static str);

impl HeuristicScorer for ExplodesOn {
    fn score(&self, candidate: &str, _target: &str) -> f64 {
        assert!(candidate != self.0, "scorer exploded");
        0.0
    }
}

#[test]
fn exploding_scorer_only_degrades_scores() {
    let graph = line();
    let embeddings = EmbeddingCache::new(HashedTrigramEncoder::default());
    for (mode, victim) in MODES.into_iter().flat_map(|m| [(m, "Alpha"), (m, "Beta")]) {
        let scorer = ExplodesOn(victim);
        let engine = SearchEngine::new(&graph, &embeddings, &scorer, CancelSignal::new());
        let result = engine.run("Alpha", "Gamma", &policy(20, mode)).unwrap();
        assert!(result.is_found(), "{mode:?} / {victim}");
    }
}

// ---------------------------------------------------------------------------
// 3. Embedding provider
// ---------------------------------------------------------------------------

struct ExplodingEmbeddings;

impl EmbeddingProvider for ExplodingEmbeddings {
    fn ensure(&self, _titles: &[String]) {
        panic!("encoder exploded");
    }

    fn get(&self, _title: &str) -> Option<Arc<[f32]>> {
        None
    }
}

#[test]
fn exploding_embeddings_do_not_escape_run() {
    for mode in MODES {
        let graph = line();
        let engine = SearchEngine::new(&graph, &ExplodingEmbeddings, &UniformScorer, CancelSignal::new());
        let result = engine.run("Alpha", "Gamma", &policy(20, mode)).unwrap();
        assert_eq!(result.path().unwrap(), ["Alpha", "Beta", "Gamma"], "{mode:?}");
    }
}
