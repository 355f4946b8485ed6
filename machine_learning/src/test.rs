#![cfg(test)]

use std::num::NonZeroUsize;

use ndarray::array;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    arch::{Classifier, LogisticRegression, Model},
    dataset::Dataset,
    metrics,
    training::{FitReport, OptimizerSpec, TrainerBuilder, TrainerSpec},
};

const ADAM: OptimizerSpec = OptimizerSpec::Adam {
    learning_rate: 0.1,
    beta1: 0.9,
    beta2: 0.999,
    epsilon: 1e-8,
};

fn fit_iris(optimizer: OptimizerSpec, seed: u64) -> (LogisticRegression, Dataset, FitReport) {
    let iris = Dataset::iris().unwrap();
    let (train, test) = iris.split(0.2, &mut StdRng::seed_from_u64(seed)).unwrap();

    let mut model = LogisticRegression::new(train.n_features(), train.n_classes(), 1.0).unwrap();
    let spec = TrainerSpec {
        optimizer,
        max_iter: NonZeroUsize::new(200).unwrap(),
        tol: 1e-4,
    };

    let mut trainer = TrainerBuilder::new().build(&spec, model.size()).unwrap();
    let report = trainer
        .fit(&mut model, train.x(), train.one_hot().view())
        .unwrap();

    (model, test, report)
}

#[test]
fn test_iris_adam_generalizes() {
    for seed in [0, 42, 1234] {
        let (model, test, report) = fit_iris(ADAM, seed);

        let y_pred = model.predict(test.x()).unwrap();
        let acc = metrics::accuracy(test.labels(), &y_pred).unwrap();

        assert!(acc >= 0.9, "seed {seed}: accuracy {acc}");
        assert!(report.loss < 0.5, "seed {seed}: loss {}", report.loss);
    }
}

#[test]
fn test_iris_setosa_sample_is_confidently_setosa() {
    let (model, _, _) = fit_iris(ADAM, 42);

    let proba = model.predict_proba(array![[5.1, 3.5, 1.4, 0.2]].view()).unwrap();
    assert_eq!(model.predict(array![[5.1, 3.5, 1.4, 0.2]].view()).unwrap(), [0]);
    assert!(proba[[0, 0]] > 0.9, "setosa probability {}", proba[[0, 0]]);
}

#[test]
fn test_iris_other_species_samples() {
    let (model, _, _) = fit_iris(ADAM, 42);

    let x = array![[5.9, 3.0, 4.2, 1.5], [6.7, 3.0, 5.2, 2.3]];
    assert_eq!(model.predict(x.view()).unwrap(), [1, 2]);
}

#[test]
fn test_iris_fit_is_deterministic() {
    let (a, _, report_a) = fit_iris(ADAM, 42);
    let (b, _, report_b) = fit_iris(ADAM, 42);

    assert_eq!(a, b);
    assert_eq!(report_a, report_b);
}

#[test]
fn test_iris_iteration_cap_is_not_an_error() {
    let (_, _, report) = fit_iris(OptimizerSpec::GradientDescent { learning_rate: 0.01 }, 42);

    assert_eq!(report.iterations, 200);
    assert!(!report.converged);
}

#[test]
fn test_probabilities_are_a_distribution() {
    let (model, test, _) = fit_iris(ADAM, 7);
    let proba = model.predict_proba(test.x()).unwrap();

    assert_eq!(proba.ncols(), 3);
    for row in proba.rows() {
        assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!((row.sum() - 1.0).abs() < 1e-6);
    }
}
