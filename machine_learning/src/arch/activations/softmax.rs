use ndarray::ArrayViewMut2;

/// Row-wise softmax: turns every row of logits into a probability distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct Softmax;

impl Softmax {
    /// Applies the softmax in place over every row of `z`.
    ///
    /// Each row is shifted by its maximum before exponentiating so `exp` never overflows.
    pub fn f(&self, mut z: ArrayViewMut2<f64>) {
        for mut row in z.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |max, &v| max.max(v));
            row.mapv_inplace(|v| (v - max).exp());

            let sum = row.sum();
            row /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn rows_sum_to_one() {
        let mut z = array![[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [-5.0, 10.0, 2.5]];
        Softmax.f(z.view_mut());

        for row in z.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }

        assert!((z[[1, 0]] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn large_logits_do_not_overflow() {
        let mut z = array![[1000.0, 1000.0]];
        Softmax.f(z.view_mut());

        assert_eq!(z, array![[0.5, 0.5]]);
    }
}
