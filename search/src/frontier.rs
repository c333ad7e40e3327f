//! Best-first frontier with title dedup.
//!
//! Uses `BTreeSet`-based title sets (not `HashSet`) for deterministic
//! iteration order when the sets are inspected or logged.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap};

use crate::node::NodeId;

/// The frontier ordering key: `(score, sequence)`.
///
/// Lower score first; ties broken by insertion sequence, oldest first.
/// Scores are compared with [`f64::total_cmp`], so the order is total even
/// for NaN.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub score: f64,
    pub sequence: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A frontier entry wrapping a node handle with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest score first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best node
/// - A `BTreeSet<String>` of normalized titles ever pushed or reserved
/// - A `BTreeSet<String>` of normalized titles already expanded
///
/// Titles stay in the frontier set after their node is popped. Redundant or
/// over-depth nodes are discarded by the search loop when popped, not here.
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    titles: BTreeSet<String>,
    visited: BTreeSet<String>,
    next_sequence: u64,
    high_water: u64,
}

impl BestFirstFrontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a title as frontier-bound before its node is pushed.
    pub fn reserve(&mut self, title_key: &str) {
        self.titles.insert(title_key.to_owned());
    }

    /// Push a node and record its normalized title in the frontier set.
    pub fn push(&mut self, node: NodeId, title_key: &str, score: f64) {
        self.reserve(title_key);
        let key = FrontierKey {
            score,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best (lowest score, then oldest) node.
    #[must_use]
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.node)
    }

    /// Mark a normalized title as expanded.
    pub fn mark_visited(&mut self, title_key: &str) {
        self.visited.insert(title_key.to_owned());
    }

    #[must_use]
    pub fn is_visited(&self, title_key: &str) -> bool {
        self.visited.contains(title_key)
    }

    /// Whether a normalized title has been pushed or reserved.
    #[must_use]
    pub fn contains_title(&self, title_key: &str) -> bool {
        self.titles.contains(title_key)
    }

    /// Normalized titles of every node expanded so far.
    #[must_use]
    pub fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    /// Normalized titles of every node pushed or reserved so far.
    #[must_use]
    pub fn titles(&self) -> &BTreeSet<String> {
        &self.titles
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
