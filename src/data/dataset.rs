use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use super::document::{Document, LabeledDocument};
use crate::error::{Result, TreeError};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait RealNumber: Number + Float {}
impl<T> RealNumber for T where T: Number + Float {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// Feature matrix with one row per document and the matching label vector.
pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        Self { x, y }
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Shuffles the rows and splits them into a train and a test dataset.
    ///
    /// `train_size` is the fraction of rows kept for training. Passing a seed
    /// makes the split reproducible.
    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidConfiguration(
                "train size should be between 0.0 and 1.0".into(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.x.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.select_rows(train_indices), self.select_rows(test_indices)))
    }

    fn select_rows(&self, indices: &[usize]) -> Self {
        let x = DMatrix::from_fn(indices.len(), self.x.ncols(), |row, col| {
            self.x[(indices[row], col)]
        });
        let y = DVector::from_fn(indices.len(), |row, _| self.y[indices[row]]);
        Self::new(x, y)
    }
}

impl<T: RealNumber> Dataset<T, T> {
    /// Converts every row into a standalone labeled document.
    pub fn documents(&self) -> Vec<LabeledDocument<T>> {
        self.x
            .row_iter()
            .zip(self.y.iter())
            .map(|(row, &label)| LabeledDocument::new(row.iter().copied().collect(), label))
            .collect()
    }

    /// Stacks documents into a dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the documents do not share one feature length.
    pub fn from_documents<D: Document<T>>(documents: &[D]) -> Result<Self> {
        let ncols = documents.first().map_or(0, |doc| doc.feature_len());
        if let Some(doc) = documents.iter().find(|doc| doc.feature_len() != ncols) {
            return Err(TreeError::FeatureLengthMismatch {
                expected: ncols,
                found: doc.feature_len(),
            });
        }
        let x = DMatrix::from_fn(documents.len(), ncols, |row, col| {
            documents[row].feature(col)
        });
        let y = DVector::from_iterator(documents.len(), documents.iter().map(|doc| doc.label()));
        Ok(Self::new(x, y))
    }
}
