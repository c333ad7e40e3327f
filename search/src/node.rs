//! Search tree arena and node types.
//!
//! Nodes live in a single `Vec` owned by [`SearchTree`]; parents and children
//! refer to each other by [`NodeId`] index, never by reference. The tree is
//! discarded as a whole when the run ends.

/// Index of a node within its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One explored article within a run.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Title in the provider's casing.
    pub title: String,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Heuristic computed at construction; lower is better.
    pub score: f64,
    /// Parent node (`None` for root).
    pub parent: Option<NodeId>,
    /// Surviving children after beam selection. Empty until expanded.
    pub children: Vec<NodeId>,
    /// Whether expansion has been attempted. Expansion runs at most once.
    pub expanded: bool,
}

/// Arena of search nodes for a single run.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root node. Any previous contents are discarded.
    pub fn add_root(&mut self, title: String, score: f64) -> NodeId {
        self.nodes.clear();
        self.push(SearchNode {
            title,
            depth: 0,
            score,
            parent: None,
            children: Vec::new(),
            expanded: false,
        })
    }

    /// Create a child of `parent` one level deeper and record it in the
    /// parent's children.
    pub fn add_child(&mut self, parent: NodeId, title: String, score: f64) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = self.push(SearchNode {
            title,
            depth,
            score,
            parent: Some(parent),
            children: Vec::new(),
            expanded: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub(crate) fn mark_expanded(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        !std::mem::replace(&mut node.expanded, true)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Titles from the root to `goal`, inclusive.
    #[must_use]
    pub fn path_to(&self, goal: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(goal);

        while let Some(id) = current {
            let node = &self.nodes[id.0];
            path.push(node.title.clone());
            current = node.parent;
        }

        path.reverse();
        path
    }
}
