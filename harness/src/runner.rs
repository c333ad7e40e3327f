//! Fixture runner: wires the in-memory graph, link filter, embedding cache,
//! hub set, and semantic scorer into a [`SearchEngine`].
//!
//! # Pipeline
//!
//! ```text
//! InMemoryLinkGraph → FilteredGraph ─┐
//! HashedTrigramEncoder → EmbeddingCache ─┼→ SemanticScorer → SearchEngine::run_with_report
//! PopularPages (over the filtered graph) ┘
//! ```
//!
//! The embedding cache lives as long as the runner, so repeated runs reuse
//! vectors. The hub listing is read at most once per run, on first score.

use speedrun_search::contract::CancelSignal;
use speedrun_search::engine::SearchEngine;
use speedrun_search::error::SearchError;
use speedrun_search::outcome::RunReport;
use speedrun_search::policy::SearchPolicy;
use speedrun_search::scorer::SemanticScorer;

use crate::embedding::{EmbeddingCache, HashedTrigramEncoder, TitleEncoder};
use crate::hubs::PopularPages;
use crate::report::RunSummary;
use crate::worlds::filter::{FilteredGraph, LinkFilter};
use crate::worlds::link_graph::InMemoryLinkGraph;

pub struct FixtureRunner<E = HashedTrigramEncoder> {
    graph: FilteredGraph<InMemoryLinkGraph>,
    embeddings: EmbeddingCache<E>,
    cancel: CancelSignal,
}

impl FixtureRunner<HashedTrigramEncoder> {
    /// Runner with the default link filter and the built-in encoder.
    #[must_use]
    pub fn new(graph: InMemoryLinkGraph) -> Self {
        Self::with_encoder(graph, LinkFilter::default(), HashedTrigramEncoder::default())
    }
}

impl<E: TitleEncoder> FixtureRunner<E> {
    #[must_use]
    pub fn with_encoder(graph: InMemoryLinkGraph, filter: LinkFilter, encoder: E) -> Self {
        Self {
            graph: FilteredGraph::new(graph, filter),
            embeddings: EmbeddingCache::new(encoder),
            cancel: CancelSignal::new(),
        }
    }

    /// Signal that cancels the in-flight run when set from another thread.
    #[must_use]
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    #[must_use]
    pub fn graph(&self) -> &InMemoryLinkGraph {
        self.graph.inner()
    }

    #[must_use]
    pub fn embeddings(&self) -> &EmbeddingCache<E> {
        &self.embeddings
    }

    /// Run one search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn run(&self, start: &str, end: &str, policy: &SearchPolicy) -> Result<RunReport, SearchError> {
        let hubs = PopularPages::from_listing(
            &self.graph,
            crate::hubs::POPULAR_PAGES_TITLE,
            self.graph.filter(),
        );
        let scorer = SemanticScorer::new(&self.embeddings, &hubs);
        let engine = SearchEngine::new(&self.graph, &self.embeddings, &scorer, self.cancel.clone());
        engine.run_with_report(start, end, policy)
    }

    /// Run one search and render the caller-facing summary.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn run_summary(
        &self,
        start: &str,
        end: &str,
        policy: &SearchPolicy,
    ) -> Result<RunSummary, SearchError> {
        self.run(start, end, policy).map(|report| RunSummary::from_report(&report))
    }
}
