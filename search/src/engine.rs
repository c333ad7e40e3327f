//! Search orchestrator: resolve endpoints, seed the root, drive the loop,
//! and reconstruct the path.

use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use tracing::{info, warn};

use crate::contract::{CancelSignal, EmbeddingProvider, GraphProvider};
use crate::error::{PanicStage, SearchError};
use crate::expand::{expand, ExpansionContext};
use crate::node::SearchTree;
use crate::outcome::{RunReport, RunResult, SearchStats};
use crate::policy::SearchPolicy;
use crate::scorer::{score_or_unknown, HeuristicScorer};
use crate::search::search;

/// Entry point for start-to-end link searches.
///
/// Holds the collaborators for a run by reference; the engine itself keeps
/// no state between runs apart from the cancellation signal it shares with
/// its controller. One run may be in flight per signal.
pub struct SearchEngine<'a> {
    graph: &'a dyn GraphProvider,
    embeddings: &'a dyn EmbeddingProvider,
    scorer: &'a dyn HeuristicScorer,
    cancel: CancelSignal,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(
        graph: &'a dyn GraphProvider,
        embeddings: &'a dyn EmbeddingProvider,
        scorer: &'a dyn HeuristicScorer,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            graph,
            embeddings,
            scorer,
            cancel,
        }
    }

    /// A handle that cancels this engine's in-flight run when set.
    #[must_use]
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Find a chain of links from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn run(&self, start: &str, end: &str, policy: &SearchPolicy) -> Result<RunResult, SearchError> {
        self.run_with_report(start, end, policy).map(|report| report.result)
    }

    /// Like [`SearchEngine::run`], but also returns the termination reason
    /// and counters that `RunResult` collapses.
    ///
    /// The cancellation signal is cleared on entry; a `set()` at any later
    /// point, including during endpoint resolution and root expansion, is
    /// observed at the loop's first poll.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn run_with_report(
        &self,
        start: &str,
        end: &str,
        policy: &SearchPolicy,
    ) -> Result<RunReport, SearchError> {
        policy.validate()?;
        self.cancel.clear();
        let started = Instant::now();

        let Some(start_title) = self.graph.canonical_title(start) else {
            info!(start, "start page does not exist");
            return Ok(missing_endpoint(RunResult::StartMissing, started));
        };
        let Some(end_title) = self.graph.canonical_title(end) else {
            info!(end, "end page does not exist");
            return Ok(missing_endpoint(RunResult::EndMissing, started));
        };

        let endpoints = [start_title.clone(), end_title.clone()];
        if catch_unwind(AssertUnwindSafe(|| self.embeddings.ensure(&endpoints))).is_err() {
            warn!(
                stage = ?PanicStage::EnsureEmbeddings,
                "embedding provider panicked on endpoints; root scored as unknown"
            );
        }

        let ctx = ExpansionContext {
            graph: self.graph,
            embeddings: self.embeddings,
            scorer: self.scorer,
            policy,
            target: &end_title,
        };

        let mut tree = SearchTree::new();
        let root_score = score_or_unknown(self.scorer, &start_title, &end_title);
        let root = tree.add_root(start_title.clone(), root_score);

        let empty = BTreeSet::new();
        let mut root_stats = SearchStats::default();
        match expand(&mut tree, root, &ctx, &empty, &empty) {
            Ok(summary) => root_stats.absorb(&summary),
            Err(error) => {
                root_stats.expansion_failures += 1;
                warn!(%error, "root expansion failed");
            }
        }

        info!(
            start = %start_title,
            end = %end_title,
            beam_k = policy.beam_k,
            max_depth = policy.max_depth,
            time_limit_secs = policy.time_limit.as_secs_f64(),
            expansion = ?policy.expansion,
            "search started"
        );

        let outcome = search(&mut tree, root, &ctx, &self.cancel, started);
        let elapsed = started.elapsed();

        let mut stats = outcome.stats;
        stats.candidates_scored += root_stats.candidates_scored;
        stats.duplicates_suppressed += root_stats.duplicates_suppressed;
        stats.pruned_by_beam += root_stats.pruned_by_beam;
        stats.dead_ends += root_stats.dead_ends;
        stats.expansion_failures += root_stats.expansion_failures;

        let result = match outcome.goal {
            Some(goal) => RunResult::Found {
                path: tree.path_to(goal),
                elapsed,
            },
            None => RunResult::NotFound,
        };

        info!(
            termination = %outcome.termination,
            elapsed_secs = elapsed.as_secs_f64(),
            expansions = stats.expansions,
            nodes = stats.nodes_created,
            path_len = result.path().map_or(0, <[String]>::len),
            "search finished"
        );

        Ok(RunReport {
            result,
            termination: Some(outcome.termination),
            stats,
            elapsed,
        })
    }
}

fn missing_endpoint(result: RunResult, started: Instant) -> RunReport {
    RunReport {
        result,
        termination: None,
        stats: SearchStats::default(),
        elapsed: started.elapsed(),
    }
}
