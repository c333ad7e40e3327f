//! Speedrun Search: heuristic-guided, beam-limited best-first search over a
//! lazily explored hyperlink graph.
//!
//! This crate owns the search algorithm only. Graph access, embeddings, and
//! hub membership come in through the traits in [`contract`]; concrete
//! providers live in `speedrun_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! speedrun_search  ←  speedrun_harness
//! (tree, frontier,     (link graph, embedding cache,
//!  scorer, engine)      hubs, fixtures, CLI)
//! ```
//!
//! # Key types
//!
//! - [`SearchEngine`](engine::SearchEngine): resolves endpoints and drives a run
//! - [`SearchTree`](node::SearchTree): arena of search nodes linked by index
//! - [`BestFirstFrontier`](frontier::BestFirstFrontier): score-ordered work queue with title dedup
//! - [`SearchPolicy`](policy::SearchPolicy): beam, depth, time, and expansion configuration
//! - [`HeuristicScorer`](scorer::HeuristicScorer): trait for candidate scoring (lower is better)
//! - [`RunResult`](outcome::RunResult): caller-facing outcome of one run

#![forbid(unsafe_code)]

pub mod contract;
pub mod engine;
pub mod error;
pub mod expand;
pub mod frontier;
pub mod node;
pub mod outcome;
pub mod policy;
pub mod scorer;
pub mod search;
pub mod title;
