use nalgebra::DVector;

use crate::data::dataset::RealNumber;
use crate::error::{Result, TreeError};

/// Error metrics between labels and predictions, provided to any model
/// producing real-valued scores.
pub trait RegressionMetrics<T: RealNumber> {
    fn mse(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<T> {
        let n = sample_count(y_true, y_pred)?;
        let errors = y_pred - y_true;

        Ok(errors.component_mul(&errors).sum() / n)
    }

    fn mae(&self, y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<T> {
        let n = sample_count(y_true, y_pred)?;
        let abs_errors_sum = y_pred
            .iter()
            .zip(y_true.iter())
            .fold(T::zero(), |acc, (&y_p, &y_t)| acc + (y_p - y_t).abs());

        Ok(abs_errors_sum / n)
    }
}

fn sample_count<T: RealNumber>(y_true: &DVector<T>, y_pred: &DVector<T>) -> Result<T> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::DimensionMismatch {
            expected: y_true.len(),
            found: y_pred.len(),
        });
    }
    T::from_usize(y_true.len()).ok_or(TreeError::Conversion("sample count to float"))
}
