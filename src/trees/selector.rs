use super::{node::NodeId, search::SplitCandidate};
use crate::data::dataset::RealNumber;

/// Leaf whose candidate split has the lowest loss.
///
/// Candidates are scanned in slice order and the first one seen wins ties,
/// so the result depends on how the caller enumerated the leaves.
pub fn pick_leaf<T: RealNumber>(candidates: &[(NodeId, SplitCandidate<T>)]) -> Option<NodeId> {
    let mut iter = candidates.iter();
    let mut best = iter.next()?;
    for candidate in iter {
        if candidate.1.loss < best.1.loss {
            best = candidate;
        }
    }
    Some(best.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(loss: f64) -> SplitCandidate<f64> {
        SplitCandidate {
            feature_index: 0,
            threshold: 0.0,
            loss,
        }
    }

    #[test]
    fn test_pick_leaf_minimal_loss() {
        let candidates = vec![
            (NodeId(3), candidate(4.0)),
            (NodeId(1), candidate(0.5)),
            (NodeId(2), candidate(2.0)),
        ];
        assert_eq!(pick_leaf(&candidates), Some(NodeId(1)));
    }

    #[test]
    fn test_pick_leaf_first_seen_wins_ties() {
        let candidates = vec![
            (NodeId(7), candidate(1.0)),
            (NodeId(2), candidate(1.0)),
        ];
        assert_eq!(pick_leaf(&candidates), Some(NodeId(7)));
    }

    #[test]
    fn test_pick_leaf_empty() {
        assert_eq!(pick_leaf::<f64>(&[]), None);
    }
}
