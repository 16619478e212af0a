//! Threshold search
//!
//! For one leaf, every feature is tried in turn: the leaf's documents are
//! sorted by that feature and every boundary between two distinct adjacent
//! values is scored by the summed variance loss of the two sides. The
//! cheapest boundary over all features wins.
use log::trace;
use std::cmp::Ordering;

use crate::data::{dataset::RealNumber, document::Document};

/// Best split found for one leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitCandidate<T: RealNumber> {
    pub feature_index: usize,
    /// Feature value of the last document left of the boundary, so routing
    /// with `value <= threshold` reproduces the scanned partition.
    pub threshold: T,
    pub loss: T,
}

/// Mean of `labels`, zero when empty.
pub fn mean_label<T: RealNumber>(labels: &[T]) -> T {
    let (sum, count) = labels
        .iter()
        .fold((T::zero(), T::zero()), |(sum, count), &label| {
            (sum + label, count + T::one())
        });
    if count == T::zero() {
        T::zero()
    } else {
        sum / count
    }
}

/// Sum of squared deviations from the mean. Empty slices cost nothing.
pub fn variance_loss<T: RealNumber>(labels: &[T]) -> T {
    let mean = mean_label(labels);
    labels
        .iter()
        .fold(T::zero(), |acc, &label| acc + (label - mean) * (label - mean))
}

/// Labels of the documents in `partition`, in partition order.
pub fn partition_labels<T: RealNumber, D: Document<T>>(documents: &[D], partition: &[usize]) -> Vec<T> {
    partition.iter().map(|&index| documents[index].label()).collect()
}

pub fn partition_loss<T: RealNumber, D: Document<T>>(documents: &[D], partition: &[usize]) -> T {
    variance_loss(&partition_labels(documents, partition))
}

/// Document indices of `partition` sorted ascending by `feature`. Ties keep
/// their partition order.
pub fn order_by_feature<T: RealNumber, D: Document<T>>(
    documents: &[D],
    partition: &[usize],
    feature: usize,
) -> Vec<usize> {
    let mut ordered = partition.to_vec();
    ordered.sort_by(|&a, &b| {
        compare_values(documents[a].feature(feature), documents[b].feature(feature))
    });
    ordered
}

/// Total order on feature values with NaN after every number.
fn compare_values<T: RealNumber>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Scans the boundaries of one feature-sorted sequence.
///
/// `values[i]` and `labels[i]` belong to the same document and `values` is
/// ascending. Boundary `i` puts `0..i` on the left and `i..n` on the right,
/// for `i` in `1..n`, skipping boundaries between equal values. Returns the
/// threshold and loss of the cheapest boundary, the first one on ties, or
/// `None` when no boundary exists.
pub fn find_threshold<T: RealNumber>(values: &[T], labels: &[T]) -> Option<(T, T)> {
    let mut best: Option<(T, T)> = None;

    for boundary in 1..values.len() {
        if values[boundary - 1] == values[boundary] {
            continue;
        }
        let loss = variance_loss(&labels[..boundary]) + variance_loss(&labels[boundary..]);
        if best.map_or(true, |(_, best_loss)| loss < best_loss) {
            best = Some((values[boundary - 1], loss));
        }
    }
    best
}

/// Cheapest split of `partition` over every feature, lowest feature index on
/// ties. `None` for partitions with fewer than two distinct values on every
/// feature, including empty and single-document partitions.
pub fn best_split<T: RealNumber, D: Document<T>>(
    documents: &[D],
    partition: &[usize],
) -> Option<SplitCandidate<T>> {
    let feature_len = partition.first().map_or(0, |&index| documents[index].feature_len());
    let mut best: Option<SplitCandidate<T>> = None;

    for feature_index in 0..feature_len {
        let ordered = order_by_feature(documents, partition, feature_index);
        let values: Vec<T> = ordered
            .iter()
            .map(|&index| documents[index].feature(feature_index))
            .collect();
        let labels = partition_labels(documents, &ordered);

        let Some((threshold, loss)) = find_threshold(&values, &labels) else {
            trace!("feature {} has no split boundary", feature_index);
            continue;
        };
        trace!(
            "feature {}: threshold {} loss {}",
            feature_index,
            threshold,
            loss
        );
        if best.map_or(true, |candidate| loss < candidate.loss) {
            best = Some(SplitCandidate {
                feature_index,
                threshold,
                loss,
            });
        }
    }
    best
}
