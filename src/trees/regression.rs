//! Regression Tree
use log::{debug, info, log_enabled, warn, Level};
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::HashMap;
use std::io::Write;

use super::{
    graph::NodeGraph,
    node::NodeId,
    params::RegressionTreeParams,
    search::{best_split, mean_label, partition_labels, partition_loss, SplitCandidate},
    selector::pick_leaf,
};
use crate::{
    data::{dataset::RealNumber, document::Document},
    error::{Result, TreeError},
    metrics::errors::RegressionMetrics,
    ranker::Ranker,
};

/// Regression tree grown leaf-wise by greedy variance reduction.
///
/// The root split is supplied by the caller; every further split is the
/// cheapest one available among the current terminal leaves. Terminal leaves
/// score the mean label of the documents they hold.
#[derive(Clone, Debug)]
pub struct RegressionTree<T: RealNumber> {
    graph: NodeGraph<T>,
    root: NodeId,
    weight: T,
}

impl<T: RealNumber> RegressionMetrics<T> for RegressionTree<T> {}

impl<T: RealNumber> RegressionTree<T> {
    /// Builds a tree with exactly `num_leaves` terminal leaves.
    ///
    /// # Arguments
    ///
    /// * `num_leaves` - Number of terminal leaves of the finished tree.
    /// * `init_feature` - Feature index of the root split.
    /// * `init_threshold` - Threshold of the root split.
    /// * `documents` - Training documents, all with the same feature length.
    ///
    /// # Errors
    ///
    /// Fails if `num_leaves` is less than 2, if the documents disagree on
    /// their feature length, if a feature value or label is not finite, if
    /// `init_feature` is out of range, or if every leaf runs out of split
    /// boundaries before `num_leaves` is reached.
    pub fn build<D: Document<T>>(
        num_leaves: usize,
        init_feature: usize,
        init_threshold: T,
        documents: &[D],
    ) -> Result<Self> {
        if num_leaves < 2 {
            return Err(TreeError::InvalidConfiguration(format!(
                "the number of leaves must be at least 2, got {}",
                num_leaves
            )));
        }
        if let Some(first) = documents.first() {
            let expected = first.feature_len();
            if let Some(doc) = documents.iter().find(|doc| doc.feature_len() != expected) {
                return Err(TreeError::FeatureLengthMismatch {
                    expected,
                    found: doc.feature_len(),
                });
            }
            let finite = documents.iter().all(|doc| {
                doc.label().is_finite()
                    && (0..doc.feature_len()).all(|index| doc.feature(index).is_finite())
            });
            if !finite {
                return Err(TreeError::InvalidConfiguration(
                    "feature values and labels must be finite".into(),
                ));
            }
            if init_feature >= expected {
                return Err(TreeError::InvalidConfiguration(format!(
                    "initial feature {} out of range for {} features",
                    init_feature, expected
                )));
            }
        }

        let mut graph = NodeGraph::new();
        let root = graph.add_detached((0..documents.len()).collect());
        graph.apply_split(root, init_feature, init_threshold, documents)?;

        Self::grow(&mut graph, root, num_leaves, documents)?;
        Self::assign_leaf_scores(&mut graph, root, documents)?;

        let tree = Self {
            graph,
            root,
            weight: T::one(),
        };
        if log_enabled!(Level::Info) {
            info!(
                "Built regression tree with {} leaves over {} documents, loss {}",
                num_leaves,
                documents.len(),
                tree.total_loss(documents)?
            );
        }
        Ok(tree)
    }

    /// Builds a tree from validated parameters.
    pub fn with_params<D: Document<T>>(
        params: &RegressionTreeParams<T>,
        documents: &[D],
    ) -> Result<Self> {
        Self::build(
            params.num_leaves(),
            params.init_feature(),
            params.init_threshold(),
            documents,
        )
    }

    fn grow<D: Document<T>>(
        graph: &mut NodeGraph<T>,
        root: NodeId,
        num_leaves: usize,
        documents: &[D],
    ) -> Result<()> {
        // Leaves keep their partition until split, so their candidates stay valid.
        let mut candidates: HashMap<NodeId, Option<SplitCandidate<T>>> = HashMap::new();

        for _ in 2..num_leaves {
            let leaves = graph.terminal_leaves(root)?;
            let mut ranked = Vec::with_capacity(leaves.len());
            for &leaf in &leaves {
                let candidate = match candidates.get(&leaf) {
                    Some(cached) => *cached,
                    None => {
                        let found = best_split(documents, graph.node(leaf)?.partition());
                        candidates.insert(leaf, found);
                        found
                    }
                };
                if let Some(candidate) = candidate {
                    ranked.push((leaf, candidate));
                }
            }

            let Some(leaf) = pick_leaf(&ranked) else {
                warn!(
                    "No splittable leaf among {} terminal leaves, wanted {}",
                    leaves.len(),
                    num_leaves
                );
                return Err(TreeError::NoSplitAvailable {
                    leaves: leaves.len(),
                });
            };
            let split = candidates
                .remove(&leaf)
                .flatten()
                .ok_or(TreeError::UnknownNode(leaf))?;
            graph.apply_split(leaf, split.feature_index, split.threshold, documents)?;
            debug!(
                "Split leaf {} on feature {} at {} (loss {})",
                leaf, split.feature_index, split.threshold, split.loss
            );
        }
        Ok(())
    }

    fn assign_leaf_scores<D: Document<T>>(
        graph: &mut NodeGraph<T>,
        root: NodeId,
        documents: &[D],
    ) -> Result<()> {
        for leaf in graph.terminal_leaves(root)? {
            let labels = partition_labels(documents, graph.node(leaf)?.partition());
            graph.set_score(leaf, mean_label(&labels))?;
        }
        Ok(())
    }

    /// Weighted score of the leaf `features` is routed to.
    ///
    /// # Errors
    ///
    /// Fails if `features` is shorter than a feature index on its path.
    pub fn predict(&self, features: &[T]) -> Result<T> {
        Ok(self.weight * self.graph.score(self.root, features)?)
    }

    /// Predicts every row of `features` in parallel.
    pub fn predict_batch(&self, features: &DMatrix<T>) -> Result<DVector<T>> {
        let predictions = (0..features.nrows())
            .into_par_iter()
            .map(|row| {
                let row: Vec<T> = features.row(row).iter().copied().collect();
                self.predict(&row)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DVector::from_vec(predictions))
    }

    pub fn weight(&self) -> T {
        self.weight
    }

    /// Scale applied to every prediction, set by the owning ensemble.
    pub fn set_weight(&mut self, weight: T) {
        self.weight = weight;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn graph(&self) -> &NodeGraph<T> {
        &self.graph
    }

    pub fn terminal_leaves(&self) -> Result<Vec<NodeId>> {
        self.graph.terminal_leaves(self.root)
    }

    pub fn num_internal_nodes(&self) -> usize {
        self.graph
            .iter()
            .filter(|(_, node)| !node.is_terminal())
            .count()
    }

    /// Summed variance loss of the terminal leaves over `documents`, which
    /// must be the documents the tree was built from.
    pub fn total_loss<D: Document<T>>(&self, documents: &[D]) -> Result<T> {
        let mut total = T::zero();
        for leaf in self.terminal_leaves()? {
            total = total + partition_loss(documents, self.graph.node(leaf)?.partition());
        }
        Ok(total)
    }

    /// There is no persisted tree format; always fails with
    /// [`TreeError::Unsupported`].
    pub fn write_model(&self, _writer: &mut dyn Write) -> Result<()> {
        Err(TreeError::Unsupported("writing regression tree models"))
    }
}

impl<T: RealNumber> Ranker<T> for RegressionTree<T> {
    fn predict(&self, features: &[T]) -> Result<T> {
        RegressionTree::predict(self, features)
    }

    fn write_model(&self, writer: &mut dyn Write) -> Result<()> {
        RegressionTree::write_model(self, writer)
    }
}
