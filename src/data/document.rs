use super::dataset::RealNumber;

/// A labeled feature vector consumed by tree construction.
///
/// All documents taking part in one build are expected to report the same
/// `feature_len`. Builders check this up front.
pub trait Document<T: RealNumber> {
    /// Value of the feature at `index`. Callers stay within `feature_len`.
    fn feature(&self, index: usize) -> T;

    fn feature_len(&self) -> usize;

    fn label(&self) -> T;
}

/// Owned document: a feature vector plus its relevance label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledDocument<T: RealNumber> {
    features: Vec<T>,
    label: T,
}

impl<T: RealNumber> LabeledDocument<T> {
    pub fn new(features: Vec<T>, label: T) -> Self {
        Self { features, label }
    }

    pub fn features(&self) -> &[T] {
        &self.features
    }
}

impl<T: RealNumber> Document<T> for LabeledDocument<T> {
    fn feature(&self, index: usize) -> T {
        self.features[index]
    }

    fn feature_len(&self) -> usize {
        self.features.len()
    }

    fn label(&self) -> T {
        self.label
    }
}

impl<T: RealNumber, D: Document<T>> Document<T> for &D {
    fn feature(&self, index: usize) -> T {
        (**self).feature(index)
    }

    fn feature_len(&self) -> usize {
        (**self).feature_len()
    }

    fn label(&self) -> T {
        (**self).label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_label<D: Document<f64>>(documents: &[D]) -> f64 {
        documents.iter().map(|doc| doc.label()).sum()
    }

    #[test]
    fn test_labeled_document() {
        let doc = LabeledDocument::new(vec![0.5, 1.5, 2.5], 3.0);
        assert_eq!(doc.feature_len(), 3);
        assert_eq!(doc.feature(1), 1.5);
        assert_eq!(doc.label(), 3.0);
        assert_eq!(doc.features(), &[0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_borrowed_documents() {
        let owned = vec![
            LabeledDocument::new(vec![1.0], 2.0),
            LabeledDocument::new(vec![2.0], 4.0),
        ];
        let borrowed: Vec<&LabeledDocument<f64>> = owned.iter().collect();
        assert_eq!(total_label(&borrowed), 6.0);
        assert_eq!(borrowed[1].feature(0), 2.0);
    }
}
