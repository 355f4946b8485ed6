use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::Result;

/// A fitted multi-class classifier. This is the whole surface inference needs, independent of
/// the algorithm behind it.
pub trait Classifier {
    /// Returns the amount of features every sample must have.
    fn n_features(&self) -> usize;

    /// Returns the amount of classes the classifier was fit on.
    fn n_classes(&self) -> usize;

    /// Computes the probability of every class for every sample.
    ///
    /// # Arguments
    /// * `x` - The samples, one per row with `n_features` columns.
    ///
    /// # Returns
    /// A `x.nrows() x n_classes` matrix whose rows sum to one, ordered by class index, or an
    /// error if `x` has the wrong amount of columns.
    fn predict_proba(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>;

    /// Predicts the class index of every sample: the most probable class, lowest index on ties.
    ///
    /// # Arguments
    /// * `x` - The samples, one per row with `n_features` columns.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.rows().into_iter().map(argmax).collect())
    }
}

/// Returns the index of the first maximum of `row`, or zero when it's empty.
pub fn argmax(row: ArrayView1<f64>) -> usize {
    let mut best = 0;

    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn argmax_breaks_ties_by_lowest_index() {
        assert_eq!(argmax(array![0.2, 0.4, 0.4].view()), 1);
        assert_eq!(argmax(array![0.5, 0.5].view()), 0);
        assert_eq!(argmax(array![0.1, 0.2, 0.7].view()), 2);
    }
}
