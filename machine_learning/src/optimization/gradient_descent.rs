use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Gradient descent optimization algorithm.
#[derive(Debug)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()> {
        check_sizes(grad, params)?;

        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut gd = GradientDescent::new(0.5);
        let mut params = [1.0, 1.0];

        gd.update_params(&[2.0, -2.0], &mut params).unwrap();
        assert_eq!(params, [0.0, 2.0]);
    }

    #[test]
    fn size_mismatch_fails() {
        let mut gd = GradientDescent::new(0.5);
        assert!(gd.update_params(&[1.0], &mut [1.0, 2.0]).is_err());
    }
}
