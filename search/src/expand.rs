//! Node expansion: turn one node's full neighbor set into a depth-bounded
//! beam of children.

use std::collections::{BTreeSet, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::contract::{EmbeddingProvider, GraphProvider};
use crate::error::{ExpansionError, PanicStage};
use crate::node::{NodeId, SearchTree};
use crate::policy::SearchPolicy;
use crate::scorer::{score_or_unknown, HeuristicScorer};
use crate::title::normalize;

/// Everything an expansion needs besides the tree and the dedup sets.
pub struct ExpansionContext<'a> {
    pub graph: &'a dyn GraphProvider,
    pub embeddings: &'a dyn EmbeddingProvider,
    pub scorer: &'a dyn HeuristicScorer,
    pub policy: &'a SearchPolicy,
    /// Target title in the provider's casing.
    pub target: &'a str,
}

/// Counters produced by a single expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    /// Neighbor titles returned by the graph provider.
    pub neighbors: usize,
    /// Neighbors dropped because their title was already visited, already
    /// in the frontier, or repeated within the same neighbor list.
    pub duplicates_suppressed: usize,
    /// Candidates that received a heuristic score.
    pub candidates_scored: usize,
    /// Scored candidates that fell outside the beam.
    pub pruned: usize,
    /// Children created.
    pub children: usize,
    /// The node had already been expanded; nothing was done.
    pub already_expanded: bool,
}

/// Expand `id` into at most `policy.beam_width(depth)` children.
///
/// `visited` and `frontier` hold normalized titles. Neighbors whose
/// normalized title appears in either are never turned into nodes.
///
/// Expansion runs at most once per node: later calls return a summary with
/// `already_expanded` set and leave the children untouched.
///
/// # Errors
///
/// Returns [`ExpansionError`] if the neighbor fetch fails or a provider
/// panics. The node keeps no children and is a dead end.
pub fn expand(
    tree: &mut SearchTree,
    id: NodeId,
    ctx: &ExpansionContext<'_>,
    visited: &BTreeSet<String>,
    frontier: &BTreeSet<String>,
) -> Result<ExpansionSummary, ExpansionError> {
    if !tree.mark_expanded(id) {
        return Ok(ExpansionSummary {
            already_expanded: true,
            ..ExpansionSummary::default()
        });
    }

    let node = tree.node(id);
    let title = node.title.clone();
    let depth = node.depth;

    let neighbors = match catch_unwind(AssertUnwindSafe(|| ctx.graph.neighbors(&title))) {
        Ok(Ok(neighbors)) => neighbors,
        Ok(Err(source)) => return Err(ExpansionError::NeighborFetch { title, source }),
        Err(_) => {
            return Err(ExpansionError::ProviderPanicked {
                title,
                stage: PanicStage::Neighbors,
            })
        }
    };

    let mut summary = ExpansionSummary {
        neighbors: neighbors.len(),
        ..ExpansionSummary::default()
    };

    let mut seen_here = HashSet::new();
    let candidates: Vec<String> = neighbors
        .into_iter()
        .filter(|candidate| {
            let key = normalize(candidate);
            !visited.contains(&key) && !frontier.contains(&key) && seen_here.insert(key)
        })
        .collect();
    summary.duplicates_suppressed = summary.neighbors - candidates.len();

    if candidates.is_empty() {
        debug!(%title, depth, neighbors = summary.neighbors, "dead end");
        return Ok(summary);
    }

    // A panicking encoder only costs heuristic quality; candidates fall back
    // to the unknown score.
    if catch_unwind(AssertUnwindSafe(|| ctx.embeddings.ensure(&candidates))).is_err() {
        warn!(
            %title,
            stage = ?PanicStage::EnsureEmbeddings,
            "embedding provider panicked; scoring without new vectors"
        );
    }

    let mut scored: Vec<(f64, String)> = candidates
        .into_iter()
        .map(|candidate| (score_or_unknown(ctx.scorer, &candidate, ctx.target), candidate))
        .collect();
    summary.candidates_scored = scored.len();

    let kept = select_best(&mut scored, ctx.policy.beam_width(depth));
    summary.pruned = summary.candidates_scored - kept;
    summary.children = kept;

    for (score, candidate) in scored.into_iter().take(kept) {
        tree.add_child(id, candidate, score);
    }

    debug!(
        %title,
        depth,
        neighbors = summary.neighbors,
        scored = summary.candidates_scored,
        kept,
        "expanded"
    );
    Ok(summary)
}

/// Partition `scored` so its first `k` entries are the lowest-scoring ones
/// (in no particular order). Returns how many entries were kept.
///
/// Runs in linear time; only the boundary is located, nothing is sorted.
pub fn select_best(scored: &mut [(f64, String)], k: usize) -> usize {
    let k = k.min(scored.len());
    if k > 0 && k < scored.len() {
        scored.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
    }
    k
}
