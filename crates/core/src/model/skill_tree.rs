use serde::{Deserialize, Serialize};
use skillwheel_protocol::{ArcSpan, Color};

/// Index of a node inside a [`SkillTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Placeholder color every node carries before propagation; the root keeps it.
pub const PLACEHOLDER_COLOR: Color = Color::rgb(0.933, 0.933, 0.933);

/// A single skill category or skill.
///
/// Geometry fields are mutated in place by layouts and transitions;
/// `color` is written once by color propagation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    pub name: String,
    /// Raw value from the dataset (defaults to 0).
    pub weight: f64,
    /// Aggregated value, filled by [`SkillTree::count`] or [`SkillTree::sum`].
    pub value: f64,
    /// Distance from the root (root = 0).
    pub depth: u32,
    pub parent: Option<NodeId>,
    /// Input order is preserved; it determines angular and lateral order.
    pub children: Vec<NodeId>,
    pub color: Color,
    /// Geometry from the last full layout pass. Zoom retargeting reads
    /// this; transitions never touch it.
    pub base: ArcSpan,
    /// Last rendered geometry.
    pub current: ArcSpan,
    /// Pending animation destination, if a transition is in flight.
    pub target: Option<ArcSpan>,
}

/// Rooted ordered tree stored as an index arena.
///
/// Parent/child links are indices into `nodes`, so traversal in both
/// directions needs no reference cycles and no interior mutability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTree {
    nodes: Vec<SkillNode>,
    root: NodeId,
}

impl SkillTree {
    pub fn with_root(name: impl Into<String>) -> Self {
        let root = SkillNode {
            name: name.into(),
            weight: 0.0,
            value: 0.0,
            depth: 0,
            parent: None,
            children: Vec::new(),
            color: PLACEHOLDER_COLOR,
            base: ArcSpan::default(),
            current: ArcSpan::default(),
            target: None,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, weight: f64) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(SkillNode {
            name: name.into(),
            weight,
            value: 0.0,
            depth,
            parent: Some(parent),
            children: Vec::new(),
            color: PLACEHOLDER_COLOR,
            base: ArcSpan::default(),
            current: ArcSpan::default(),
            target: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SkillNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SkillNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    /// All node ids in arena order. The iterator captures nothing, so
    /// callers may mutate nodes while walking it.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Pre-order traversal of the subtree rooted at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            // Push in reverse so children come out in input order.
            for &c in self.nodes[n.0].children.iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    /// Path from `id` up to the root, both inclusive.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = id;
        while let Some(p) = self.nodes[cur.0].parent {
            out.push(p);
            cur = p;
        }
        out
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.ids().filter(|&id| self.is_leaf(id)).collect()
    }

    /// Greatest node depth (the root contributes 0).
    pub fn height(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Greatest distance from `id` to any leaf of its subtree.
    pub fn subtree_height(&self, id: NodeId) -> u32 {
        self.nodes[id.0]
            .children
            .iter()
            .map(|&c| self.subtree_height(c) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Leaf-count aggregation: every leaf counts 1, internal nodes sum
    /// their children. The sunburst weights wedges this way.
    pub fn count(&mut self) {
        self.aggregate_from_root(self.root, &|_leaf_weight| 1.0);
    }

    /// Explicit-value aggregation: a node's value is its own weight plus
    /// its descendants' weights.
    pub fn sum(&mut self) {
        let order = self.descendants(self.root);
        for &id in order.iter().rev() {
            let child_sum: f64 = self.nodes[id.0]
                .children
                .iter()
                .map(|c| self.nodes[c.0].value)
                .sum();
            self.nodes[id.0].value = self.nodes[id.0].weight + child_sum;
        }
    }

    fn aggregate_from_root(&mut self, root: NodeId, leaf_value: &dyn Fn(f64) -> f64) {
        let order = self.descendants(root);
        for &id in order.iter().rev() {
            self.nodes[id.0].value = if self.nodes[id.0].children.is_empty() {
                leaf_value(self.nodes[id.0].weight)
            } else {
                self.nodes[id.0]
                    .children
                    .iter()
                    .map(|c| self.nodes[c.0].value)
                    .sum()
            };
        }
    }

    /// Reorder every node's children tallest-subtree-first, keeping the
    /// relative order of equal heights.
    pub fn sort_by_height(&mut self) {
        let heights: Vec<u32> = self.ids().map(|id| self.subtree_height(id)).collect();
        for node in &mut self.nodes {
            node.children.sort_by(|a, b| heights[b.0].cmp(&heights[a.0]));
        }
    }

    /// Snap every node's geometry to its pending target, clearing targets.
    pub fn snap_to_targets(&mut self) {
        for node in &mut self.nodes {
            if let Some(t) = node.target.take() {
                node.current = t;
            }
        }
    }
}

impl std::ops::Index<NodeId> for SkillTree {
    type Output = SkillNode;

    fn index(&self, id: NodeId) -> &SkillNode {
        &self.nodes[id.0]
    }
}

impl std::ops::IndexMut<NodeId> for SkillTree {
    fn index_mut(&mut self, id: NodeId) -> &mut SkillNode {
        &mut self.nodes[id.0]
    }
}
