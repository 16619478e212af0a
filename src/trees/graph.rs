//! Arena of split nodes linked by parent and child indices.
use super::node::{NodeId, SplitNode};
use crate::data::{dataset::RealNumber, document::Document};
use crate::error::{Result, TreeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Owns every node of one tree. Nodes are never removed, so a [`NodeId`]
/// stays valid for the lifetime of the graph.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph<T: RealNumber> {
    nodes: Vec<SplitNode<T>>,
}

impl<T: RealNumber> NodeGraph<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&SplitNode<T>> {
        self.nodes.get(id.0).ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SplitNode<T>> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SplitNode<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Adds a parentless terminal node holding `partition`.
    pub fn add_detached(&mut self, partition: Vec<usize>) -> NodeId {
        self.push(None, partition)
    }

    fn push(&mut self, parent: Option<NodeId>, partition: Vec<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SplitNode::new(parent, partition));
        id
    }

    /// Walks parent links up to the node without a parent.
    pub fn root_of(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            current = parent;
        }
        Ok(current)
    }

    /// True if `ancestor` sits strictly above `id` on its path to the root.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        self.node(ancestor)?;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return Ok(true);
            }
            current = self.node(parent)?.parent;
        }
        Ok(false)
    }

    /// Number of edges between `id` and its root.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent)?.parent;
        }
        Ok(depth)
    }

    /// Picks the child a feature vector is sent to from an internal node.
    ///
    /// # Errors
    ///
    /// Fails on terminal nodes, on nodes with a single child and when the
    /// vector is shorter than the routing feature index.
    pub fn route(&self, id: NodeId, features: &[T]) -> Result<NodeId> {
        let node = self.node(id)?;
        let (left, right) = match (node.left, node.right) {
            (Some(left), Some(right)) => (left, right),
            (None, None) => return Err(TreeError::TerminalRoute(id)),
            _ => return Err(TreeError::RoutingInconsistency(id)),
        };
        let (feature_index, threshold) = node
            .feature_index
            .zip(node.threshold)
            .ok_or(TreeError::RoutingInconsistency(id))?;
        let value = features
            .get(feature_index)
            .ok_or(TreeError::FeatureIndexOutOfRange {
                index: feature_index,
                len: features.len(),
            })?;

        Ok(if *value <= threshold { left } else { right })
    }

    /// Follows routing rules from `id` down to a terminal node and returns its score.
    pub fn score(&self, id: NodeId, features: &[T]) -> Result<T> {
        Ok(self.node(self.find_leaf(id, features)?)?.score)
    }

    /// Terminal node reached by `features` when starting at `id`.
    pub fn find_leaf(&self, id: NodeId, features: &[T]) -> Result<NodeId> {
        let mut current = id;
        while !self.node(current)?.is_terminal() {
            current = self.route(current, features)?;
        }
        Ok(current)
    }

    /// Terminal nodes below `id`, left subtrees first.
    pub fn terminal_leaves(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            match (node.left, node.right) {
                (None, None) => leaves.push(current),
                (Some(left), Some(right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                _ => return Err(TreeError::RoutingInconsistency(current)),
            }
        }
        Ok(leaves)
    }

    /// Turns a terminal node into an internal one routing on
    /// `feature <= threshold`, attaching two fresh terminal children.
    ///
    /// `documents` must be the slice the partitions index into.
    pub fn apply_split<D: Document<T>>(
        &mut self,
        id: NodeId,
        feature_index: usize,
        threshold: T,
        documents: &[D],
    ) -> Result<(NodeId, NodeId)> {
        let node = self.node(id)?;
        if !node.is_terminal() {
            return Err(TreeError::AlreadySplit(id));
        }

        let mut left_partition = Vec::new();
        let mut right_partition = Vec::new();
        for &doc_index in &node.partition {
            let doc = documents
                .get(doc_index)
                .ok_or(TreeError::DimensionMismatch {
                    expected: doc_index + 1,
                    found: documents.len(),
                })?;
            if feature_index >= doc.feature_len() {
                return Err(TreeError::FeatureIndexOutOfRange {
                    index: feature_index,
                    len: doc.feature_len(),
                });
            }
            if doc.feature(feature_index) <= threshold {
                left_partition.push(doc_index);
            } else {
                right_partition.push(doc_index);
            }
        }

        let left = self.push(Some(id), left_partition);
        let right = self.push(Some(id), right_partition);

        let node = self.node_mut(id)?;
        node.feature_index = Some(feature_index);
        node.threshold = Some(threshold);
        node.left = Some(left);
        node.right = Some(right);
        Ok((left, right))
    }

    pub fn attach_left(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, child, Side::Left)
    }

    pub fn attach_right(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.attach(parent, child, Side::Right)
    }

    /// Links a parentless node under `parent`, detaching whatever child held
    /// that side before.
    fn attach(&mut self, parent: NodeId, child: NodeId, side: Side) -> Result<()> {
        if child == parent || self.is_ancestor(child, parent)? {
            return Err(TreeError::Cycle { parent, child });
        }
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }

        let parent_node = self.node_mut(parent)?;
        let previous = match side {
            Side::Left => parent_node.left.replace(child),
            Side::Right => parent_node.right.replace(child),
        };
        if let Some(previous) = previous {
            self.node_mut(previous)?.parent = None;
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Sets the routing rule of an internal node built through `attach_*`.
    pub fn set_rule(&mut self, id: NodeId, feature_index: usize, threshold: T) -> Result<()> {
        let node = self.node_mut(id)?;
        node.feature_index = Some(feature_index);
        node.threshold = Some(threshold);
        Ok(())
    }

    pub fn set_score(&mut self, id: NodeId, score: T) -> Result<()> {
        self.node_mut(id)?.score = score;
        Ok(())
    }
}
