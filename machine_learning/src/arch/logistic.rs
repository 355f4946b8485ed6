use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis, linalg};
use serde::{Deserialize, Serialize};

use super::{Classifier, Model, activations::Softmax, loss::LossFn};
use crate::{MlErr, Result};

/// Multinomial logistic regression: a linear map from features to one logit per class followed
/// by a softmax.
///
/// The parameters are laid out as the `n_features x n_classes` weight matrix in row-major order
/// followed by the `n_classes` biases. Training penalizes the weights (not the biases) with an
/// L2 term of strength `1 / (c * n_samples)`, so a smaller `c` means stronger regularization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    n_features: usize,
    n_classes: usize,
    c: f64,
    params: Vec<f64>,
}

impl LogisticRegression {
    /// Creates a new unfitted `LogisticRegression` with every parameter set to zero, which
    /// predicts the uniform distribution.
    ///
    /// # Arguments
    /// * `n_features` - The amount of input features.
    /// * `n_classes` - The amount of classes.
    /// * `c` - The inverse of the regularization strength, must be positive.
    ///
    /// # Returns
    /// A new `LogisticRegression` or an error if `c` is not positive.
    pub fn new(n_features: usize, n_classes: usize, c: f64) -> Result<Self> {
        let size = (n_features + 1) * n_classes;
        Self::from_params(n_features, n_classes, c, vec![0.0; size])
    }

    /// Creates a `LogisticRegression` from already fitted parameters.
    ///
    /// # Arguments
    /// * `n_features` - The amount of input features.
    /// * `n_classes` - The amount of classes.
    /// * `c` - The inverse of the regularization strength, must be positive.
    /// * `params` - The weights followed by the biases.
    pub fn from_params(
        n_features: usize,
        n_classes: usize,
        c: f64,
        params: Vec<f64>,
    ) -> Result<Self> {
        if !(c > 0.0) {
            return Err(MlErr::InvalidHyperparameter { name: "c", value: c });
        }

        let expected = (n_features + 1) * n_classes;
        if params.len() != expected {
            return Err(MlErr::SizeMismatch {
                what: "parameters",
                got: params.len(),
                expected,
            });
        }

        Ok(Self {
            n_features,
            n_classes,
            c,
            params,
        })
    }

    fn logits(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features {
            return Err(MlErr::SizeMismatch {
                what: "features",
                got: x.ncols(),
                expected: self.n_features,
            });
        }

        let (w, b) = self.view_params()?;
        let logits = x.dot(&w) + &b;

        // Finite inputs can still overflow the linear map.
        if let Some((row, _)) = logits
            .rows()
            .into_iter()
            .enumerate()
            .find(|(_, row)| row.iter().any(|v| !v.is_finite()))
        {
            return Err(MlErr::NonFiniteOutput { row });
        }

        Ok(logits)
    }

    /// Gives a view of the raw parameter buffer as the weights and biases of this model.
    ///
    /// Fails only when the buffer was deserialized with the wrong length.
    fn view_params(&self) -> Result<(ArrayView2<'_, f64>, ArrayView1<'_, f64>)> {
        let w_size = self.n_features * self.n_classes;
        let mismatch = || MlErr::SizeMismatch {
            what: "parameters",
            got: self.params.len(),
            expected: self.size(),
        };

        if self.params.len() != self.size() {
            return Err(mismatch());
        }

        let (w_raw, b_raw) = self.params.split_at(w_size);
        let w = ArrayView2::from_shape((self.n_features, self.n_classes), w_raw)
            .map_err(|_| mismatch())?;
        let b = ArrayView1::from_shape(self.n_classes, b_raw).map_err(|_| mismatch())?;

        Ok((w, b))
    }
}

impl Model for LogisticRegression {
    fn size(&self) -> usize {
        (self.n_features + 1) * self.n_classes
    }

    fn params_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }

    fn backprop<L>(
        &self,
        loss_fn: &L,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        grad: &mut [f64],
    ) -> Result<f64>
    where
        L: LossFn,
    {
        if grad.len() != self.size() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: self.size(),
            });
        }

        if y.dim() != (x.nrows(), self.n_classes) {
            return Err(MlErr::SizeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows() * self.n_classes,
            });
        }

        if x.nrows() == 0 {
            return Err(MlErr::EmptyDataset);
        }

        let mut y_pred = self.logits(x)?;
        Softmax.f(y_pred.view_mut());

        let (w, _) = self.view_params()?;
        let l2 = 1.0 / (self.c * x.nrows() as f64);
        let penalty = 0.5 * l2 * w.iter().map(|w| w * w).sum::<f64>();
        let loss = loss_fn.loss(y_pred.view(), y) + penalty;

        let d = loss_fn.loss_prime(y_pred.view(), y);
        let (dw_raw, db_raw) = grad.split_at_mut(self.n_features * self.n_classes);
        let mismatch = |_| MlErr::SizeMismatch {
            what: "gradient",
            got: self.size(),
            expected: self.size(),
        };
        let mut dw = ArrayViewMut2::from_shape((self.n_features, self.n_classes), dw_raw)
            .map_err(mismatch)?;
        let mut db = ArrayViewMut1::from_shape(self.n_classes, db_raw).map_err(mismatch)?;

        linalg::general_mat_mul(1.0, &x.t(), &d, 0.0, &mut dw);
        dw.scaled_add(l2, &w);
        db.assign(&d.sum_axis(Axis(0)));

        Ok(loss)
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let mut proba = self.logits(x)?;
        Softmax.f(proba.view_mut());
        Ok(proba)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::arch::loss::CrossEntropy;

    fn two_class_model() -> LogisticRegression {
        // w = [[1, -1]], b = [0, 0.5]
        LogisticRegression::from_params(1, 2, 1.0, vec![1.0, -1.0, 0.0, 0.5]).unwrap()
    }

    #[test]
    fn unfitted_model_predicts_the_uniform_distribution() {
        let model = LogisticRegression::new(4, 3, 1.0).unwrap();
        let proba = model.predict_proba(array![[5.1, 3.5, 1.4, 0.2]].view()).unwrap();

        for &p in proba.iter() {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn predict_follows_the_logits() {
        let model = two_class_model();
        let x = array![[2.0], [-2.0], [0.2]];

        assert_eq!(model.predict(x.view()).unwrap(), [0, 1, 1]);
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        let model = LogisticRegression::new(4, 3, 1.0).unwrap();
        let err = model.predict_proba(array![[1.0, 2.0, 3.0]].view()).unwrap_err();

        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                what: "features",
                got: 3,
                expected: 4
            }
        ));
    }

    #[test]
    fn overflowing_logits_are_rejected() {
        let model = LogisticRegression::from_params(1, 2, 1.0, vec![4.0, -4.0, 0.0, 0.0]).unwrap();
        let x = array![[1.0], [f64::MAX], [-1e308]];

        let err = model.predict_proba(x.view()).unwrap_err();
        assert!(matches!(err, MlErr::NonFiniteOutput { row: 1 }));
    }

    #[test]
    fn non_positive_c_is_rejected() {
        assert!(LogisticRegression::new(1, 2, 0.0).is_err());
        assert!(LogisticRegression::new(1, 2, -1.0).is_err());
        assert!(LogisticRegression::new(1, 2, f64::NAN).is_err());
    }

    #[test]
    fn deserialized_params_with_the_wrong_length_fail_at_inference() {
        let json = r#"{"n_features":1,"n_classes":2,"c":1.0,"params":[1.0]}"#;
        let model: LogisticRegression = serde_json::from_str(json).unwrap();

        assert!(model.predict_proba(array![[1.0]].view()).is_err());
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let params = vec![0.1, -0.2, 0.3, 0.0, 0.4, -0.1, 0.05, 0.0, -0.05];
        let mut model = LogisticRegression::from_params(2, 3, 0.5, params).unwrap();
        let x = array![[1.0, 2.0], [0.5, -1.0], [-1.5, 0.3], [2.0, 0.0]];
        let y = array![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0]
        ];

        let mut grad = vec![0.0; model.size()];
        model
            .backprop(&CrossEntropy, x.view(), y.view(), &mut grad)
            .unwrap();

        let h = 1e-6;
        let mut scratch = vec![0.0; model.size()];

        for i in 0..model.size() {
            model.params_mut()[i] += h;
            let up = model
                .backprop(&CrossEntropy, x.view(), y.view(), &mut scratch)
                .unwrap();
            model.params_mut()[i] -= 2.0 * h;
            let down = model
                .backprop(&CrossEntropy, x.view(), y.view(), &mut scratch)
                .unwrap();
            model.params_mut()[i] += h;

            let numeric = (up - down) / (2.0 * h);
            assert!(
                (numeric - grad[i]).abs() < 1e-6,
                "param {i}: numeric {numeric} vs analytic {}",
                grad[i]
            );
        }
    }
}
