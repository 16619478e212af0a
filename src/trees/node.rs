use std::fmt;

use crate::data::dataset::RealNumber;

/// Stable index of a node inside a [`NodeGraph`](super::graph::NodeGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Terminal,
    Internal,
}

/// Regression tree node
///
/// Terminal nodes carry a `score`; internal nodes carry the routing rule
/// `feature_index` / `threshold`. Both keep the indices of the documents
/// routed to them.
#[derive(Clone, Debug)]
pub struct SplitNode<T: RealNumber> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) partition: Vec<usize>,
    pub(crate) feature_index: Option<usize>,
    pub(crate) threshold: Option<T>,
    pub(crate) score: T,
}

impl<T: RealNumber> SplitNode<T> {
    pub fn new(parent: Option<NodeId>, partition: Vec<usize>) -> Self {
        Self {
            parent,
            left: None,
            right: None,
            partition,
            feature_index: None,
            threshold: None,
            score: T::zero(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Indices of the documents routed to this node.
    pub fn partition(&self) -> &[usize] {
        &self.partition
    }

    pub fn feature_index(&self) -> Option<usize> {
        self.feature_index
    }

    pub fn threshold(&self) -> Option<T> {
        self.threshold
    }

    pub fn score(&self) -> T {
        self.score
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Zero or two children. Anything else cannot be routed through.
    pub fn children_consistent(&self) -> bool {
        self.left.is_some() == self.right.is_some()
    }

    pub fn state(&self) -> NodeState {
        if self.is_terminal() {
            NodeState::Terminal
        } else {
            NodeState::Internal
        }
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.left.zip(self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_terminal() {
        let node: SplitNode<f64> = SplitNode::new(None, vec![0, 1, 2]);
        assert!(node.is_root());
        assert!(node.is_terminal());
        assert!(node.children_consistent());
        assert_eq!(node.state(), NodeState::Terminal);
        assert_eq!(node.partition(), &[0, 1, 2]);
        assert_eq!(node.score(), 0.0);
        assert_eq!(node.feature_index(), None);
        assert_eq!(node.children(), None);
    }

    #[test]
    fn test_single_child_is_inconsistent() {
        let mut node: SplitNode<f64> = SplitNode::new(Some(NodeId(0)), vec![]);
        node.left = Some(NodeId(1));
        assert!(!node.is_root());
        assert!(!node.is_terminal());
        assert!(!node.children_consistent());

        node.right = Some(NodeId(2));
        assert!(node.children_consistent());
        assert_eq!(node.state(), NodeState::Internal);
        assert_eq!(node.children(), Some((NodeId(1), NodeId(2))));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(4).to_string(), "#4");
        assert_eq!(NodeId(4).index(), 4);
    }
}
