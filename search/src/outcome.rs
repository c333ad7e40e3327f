//! Run outcomes: termination reasons, counters, and the caller-facing result.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::expand::ExpansionSummary;
use crate::node::NodeId;

/// Why the best-first loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TerminationReason {
    /// A popped node's title matched the target.
    GoalReached {
        #[serde(skip)]
        node: NodeId,
    },
    /// The frontier emptied without a match.
    FrontierExhausted,
    /// The wall-clock budget ran out.
    TimedOut,
    /// The cancellation signal was observed.
    Cancelled,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalReached { .. } => f.write_str("goal reached"),
            Self::FrontierExhausted => f.write_str("frontier exhausted"),
            Self::TimedOut => f.write_str("timed out"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped, goal-checked, and marked visited.
    pub expansions: u64,
    /// Nodes created in the search tree, root included.
    pub nodes_created: u64,
    /// Candidates that received a heuristic score.
    pub candidates_scored: u64,
    /// Neighbors dropped by title dedup.
    pub duplicates_suppressed: u64,
    /// Scored candidates that fell outside the beam.
    pub pruned_by_beam: u64,
    /// Successful expansions that produced no children.
    pub dead_ends: u64,
    /// Expansions that failed and were recovered locally.
    pub expansion_failures: u64,
    /// Nodes popped but discarded as already visited or over-depth.
    pub discarded_on_pop: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

impl SearchStats {
    /// Fold a single expansion's counters into the run totals.
    pub fn absorb(&mut self, summary: &ExpansionSummary) {
        if summary.already_expanded {
            return;
        }
        self.candidates_scored += summary.candidates_scored as u64;
        self.duplicates_suppressed += summary.duplicates_suppressed as u64;
        self.pruned_by_beam += summary.pruned as u64;
        self.nodes_created += summary.children as u64;
        if summary.children == 0 {
            self.dead_ends += 1;
        }
    }
}

/// Terminal outcome of one run, as reported to callers.
///
/// Exhaustion, timeout, and cancellation all collapse into `NotFound`; the
/// distinction is kept in [`RunReport::termination`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// A path from start to end, both inclusive, in provider casing.
    Found { path: Vec<String>, elapsed: Duration },
    /// No path under the configured limits.
    NotFound,
    /// The start title does not resolve.
    StartMissing,
    /// The end title does not resolve (checked only when the start exists).
    EndMissing,
}

impl RunResult {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[must_use]
    pub fn path(&self) -> Option<&[String]> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Elapsed wall-clock seconds of a successful run.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self {
            Self::Found { elapsed, .. } => Some(elapsed.as_secs_f64()),
            _ => None,
        }
    }
}

/// A run result plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub result: RunResult,
    /// Why the loop stopped; `None` if the loop never ran (missing endpoint).
    pub termination: Option<TerminationReason>,
    pub stats: SearchStats,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}
