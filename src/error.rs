use thiserror::Error;

use crate::trees::node::NodeId;

/// Errors returned while building or evaluating regression trees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("node {0} already has children")]
    AlreadySplit(NodeId),

    #[error("attaching node {child} under node {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("node {0} has exactly one child")]
    RoutingInconsistency(NodeId),

    #[error("node {0} is terminal and cannot route")]
    TerminalRoute(NodeId),

    #[error("feature index {index} out of range for a vector of length {len}")]
    FeatureIndexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} features per document, found {found}")]
    FeatureLengthMismatch { expected: usize, found: usize },

    #[error("none of the {leaves} terminal leaves has a valid split boundary")]
    NoSplitAvailable { leaves: usize },

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("expected {expected} values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("numeric conversion failed: {0}")]
    Conversion(&'static str),
}

pub type Result<T> = std::result::Result<T, TreeError>;
