//! Best-first loop.

use std::time::Instant;

use tracing::{debug, warn};

use crate::contract::CancelSignal;
use crate::expand::{expand, ExpansionContext};
use crate::frontier::BestFirstFrontier;
use crate::node::{NodeId, SearchTree};
use crate::outcome::{SearchStats, TerminationReason};
use crate::policy::ExpansionMode;
use crate::title::normalize;

/// Result of one pass of the best-first loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The goal node (if found).
    pub goal: Option<NodeId>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
}

impl SearchResult {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReason::GoalReached { .. })
    }
}

/// Run best-first search from `root` toward `ctx.target`.
///
/// The root's score must already be computed against the target. Each
/// iteration checks, in order: frontier exhaustion, the cancellation signal,
/// and the time budget measured from `started`. It then pops the best node,
/// discards it if its title was already visited or it sits at or beyond
/// `max_depth`, and otherwise goal-checks and expands it.
///
/// In [`ExpansionMode::Eager`] each child is expanded before it is pushed;
/// a child whose expansion fails is skipped. In [`ExpansionMode::Lazy`]
/// nodes are expanded when popped; a failed expansion is a dead end.
///
/// Cancellation has no partial-result semantics: the tree built so far is
/// simply abandoned.
pub fn search(
    tree: &mut SearchTree,
    root: NodeId,
    ctx: &ExpansionContext<'_>,
    cancel: &CancelSignal,
    started: Instant,
) -> SearchResult {
    let policy = ctx.policy;
    let target_key = normalize(ctx.target);

    let mut frontier = BestFirstFrontier::new();
    let mut stats = SearchStats {
        nodes_created: tree.len() as u64,
        ..SearchStats::default()
    };

    let root_node = tree.node(root);
    frontier.push(root, &normalize(&root_node.title), root_node.score);

    let termination = loop {
        if frontier.is_empty() {
            break TerminationReason::FrontierExhausted;
        }
        if cancel.is_set() {
            break TerminationReason::Cancelled;
        }
        if started.elapsed() >= policy.time_limit {
            break TerminationReason::TimedOut;
        }

        let Some(current) = frontier.pop() else {
            break TerminationReason::FrontierExhausted;
        };
        let node = tree.node(current);
        let key = normalize(&node.title);

        if frontier.is_visited(&key) || node.depth >= policy.max_depth {
            stats.discarded_on_pop += 1;
            continue;
        }

        if key == target_key {
            break TerminationReason::GoalReached { node: current };
        }

        // Lazy mode always lands here; eager mode only for a root that was
        // handed over unexpanded.
        if !node.expanded {
            match expand(tree, current, ctx, frontier.visited(), frontier.titles()) {
                Ok(summary) => stats.absorb(&summary),
                Err(error) => {
                    stats.expansion_failures += 1;
                    warn!(%error, "expansion failed; treating node as a dead end");
                }
            }
        }

        let children = tree.node(current).children.clone();
        for child in children {
            let child_key = normalize(&tree.node(child).title);

            if policy.expansion == ExpansionMode::Eager {
                frontier.reserve(&child_key);
                match expand(tree, child, ctx, frontier.visited(), frontier.titles()) {
                    Ok(summary) => stats.absorb(&summary),
                    Err(error) => {
                        stats.expansion_failures += 1;
                        warn!(%error, "skipping child after failed pre-expansion");
                        continue;
                    }
                }
            }

            frontier.push(child, &child_key, tree.node(child).score);
        }

        frontier.mark_visited(&key);
        stats.expansions += 1;
        debug!(
            title = %tree.node(current).title,
            depth = tree.node(current).depth,
            frontier = frontier.len(),
            "visited"
        );
    };

    stats.frontier_high_water = frontier.high_water();
    let goal = match termination {
        TerminationReason::GoalReached { node } => Some(node),
        _ => None,
    };

    SearchResult {
        goal,
        termination,
        stats,
    }
}
