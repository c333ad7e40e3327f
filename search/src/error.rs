//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, exhaustion, timeout, cancellation) are expressed via
//! [`crate::outcome::TerminationReason`] and never surface as errors.

use thiserror::Error;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before any provider is contacted. No search
/// tree is built because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A policy field holds a value the search loop cannot honor.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

/// Failure reported by a [`crate::contract::GraphProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider has no page with this title.
    #[error("page not found: {title}")]
    PageNotFound { title: String },
    /// The provider could not answer (network, rate limit, backend fault).
    #[error("provider unavailable: {detail}")]
    Unavailable { detail: String },
}

/// Transient failure while expanding a single node.
///
/// Recovered locally by the search loop: the affected node is skipped (when
/// pre-expanding a child) or becomes a dead end (when expanding on pop).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// The graph provider returned an error for this title's neighbors.
    #[error("neighbor fetch failed for {title:?}")]
    NeighborFetch {
        title: String,
        #[source]
        source: ProviderError,
    },
    /// A provider callback panicked; the panic was caught.
    #[error("provider panicked during {stage:?} for {title:?}")]
    ProviderPanicked { title: String, stage: PanicStage },
}

/// Callback during which a provider panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStage {
    /// `GraphProvider::neighbors()` panicked.
    Neighbors,
    /// `EmbeddingProvider::ensure()` panicked.
    EnsureEmbeddings,
    /// `HeuristicScorer::score()` panicked.
    Score,
}
