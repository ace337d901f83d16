//! Tree node types.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! A branch owns its children exclusively; there is no sharing and no cycle,
//! so a node is reachable through exactly one path from the root.

use crate::data::Value;
use crate::stats::TargetStats;
use crate::training::{Observer, SplitCondition};

/// Node identifier: an index into the tree's node arena.
pub type NodeId = u32;

/// Identifier of the root node.
pub const ROOT: NodeId = 0;

// =============================================================================
// Leaf
// =============================================================================

/// Activity state of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafState {
    /// Accumulating observer statistics; may split.
    Active,
    /// Demoted under memory pressure: target statistics only, never splits.
    Inactive,
}

/// A leaf node.
///
/// `stats` includes the seed statistics inherited from the parent's split
/// and is what predictions use. `observed` covers only instances routed here
/// since the leaf was created; split evaluation and the Hoeffding bound use
/// it because the observers saw exactly those instances.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub(crate) stats: TargetStats,
    pub(crate) observed: TargetStats,
    pub(crate) observers: Vec<Observer>,
    pub(crate) since_evaluation: u32,
    pub(crate) state: LeafState,
    pub(crate) depth: usize,
}

impl Leaf {
    /// Create an active leaf seeded with `stats`.
    pub(crate) fn new(stats: TargetStats, observers: Vec<Observer>, depth: usize) -> Self {
        let classification = matches!(stats, TargetStats::Classes(_));
        Self {
            stats,
            observed: TargetStats::empty(classification),
            observers,
            since_evaluation: 0,
            state: LeafState::Active,
            depth,
        }
    }

    /// Seed plus observed target statistics.
    #[inline]
    pub fn stats(&self) -> &TargetStats {
        &self.stats
    }

    /// Target statistics observed since creation.
    #[inline]
    pub fn observed(&self) -> &TargetStats {
        &self.observed
    }

    /// Per-predictor observers. Empty for inactive leaves.
    #[inline]
    pub fn observers(&self) -> &[Observer] {
        &self.observers
    }

    #[inline]
    pub fn state(&self) -> LeafState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == LeafState::Active
    }

    /// Depth in levels; the root is at depth 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Observer memory estimate in bytes.
    pub fn heap_size(&self) -> usize {
        self.observers.iter().map(Observer::heap_size).sum()
    }

    /// Drop the observers and stop collecting fine-grained statistics.
    pub(crate) fn deactivate(&mut self) {
        self.state = LeafState::Inactive;
        self.observers = Vec::new();
    }
}

// =============================================================================
// Branch
// =============================================================================

/// An internal node.
///
/// Branches that received no weight when the split was made have no child
/// and route like a missing value.
#[derive(Debug, Clone)]
pub struct Branch {
    pub(crate) condition: SplitCondition,
    pub(crate) children: Vec<Option<NodeId>>,
    pub(crate) default_branch: usize,
    /// Child taking missing and unseen values.
    pub(crate) default_child: NodeId,
    pub(crate) depth: usize,
}

impl Branch {
    #[inline]
    pub fn condition(&self) -> &SplitCondition {
        &self.condition
    }

    /// One slot per branch of the condition; `None` where the branch was
    /// empty at split time.
    #[inline]
    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }

    /// Allocated children, in branch order.
    pub fn live_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    /// Index of the child that receives missing or unseen values: the one
    /// seeded with the most weight when the split was made.
    #[inline]
    pub fn default_branch(&self) -> usize {
        self.default_branch
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Child an instance routes to.
    #[inline]
    pub fn child(&self, row: &[Value]) -> NodeId {
        self.condition
            .branch(row)
            .and_then(|b| self.children.get(b).copied().flatten())
            .unwrap_or(self.default_child)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A tree node.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    #[inline]
    pub(crate) fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    #[inline]
    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.depth,
            Node::Branch(branch) => branch.depth,
        }
    }
}

/// Seed for the observer of `predictor` in leaf `node`.
///
/// Mixes the configured seed with the position so sibling reservoirs do not
/// draw identical sequences.
pub(crate) fn observer_seed(seed: u64, node: NodeId, predictor: usize) -> u64 {
    let position = (u64::from(node) << 32) ^ predictor as u64;
    seed.wrapping_add(position.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
