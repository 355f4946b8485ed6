use std::fs;

use machine_learning::arch::{Classifier, LogisticRegression};
use model::{ArtifactErr, FittedModel, ModelArtifact};
use ndarray::array;

fn artifact() -> ModelArtifact {
    let params = vec![1.0, -1.0, 0.5, 0.0, 0.0, 0.25];
    let model = LogisticRegression::from_params(2, 2, 1.0, params).unwrap();

    ModelArtifact::new(
        model,
        vec!["a".into(), "b".into()],
        vec!["x0".into(), "x1".into()],
    )
}

#[test]
fn save_then_load_returns_the_same_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("models").join("model.json");

    let written = artifact();
    written.save(&path).unwrap();
    let read = ModelArtifact::load(&path).unwrap();

    assert_eq!(read, written);
    assert_eq!(read.model.n_classes(), read.target_names.len());
    assert_eq!(read.model.n_features(), read.feature_names.len());

    let x = array![[0.3, -1.2]];
    assert_eq!(
        read.model.predict_proba(x.view()).unwrap(),
        written.model.predict_proba(x.view()).unwrap()
    );
}

#[test]
fn save_overwrites_a_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    fs::write(&path, "stale").unwrap();
    artifact().save(&path).unwrap();

    assert_eq!(ModelArtifact::load(&path).unwrap(), artifact());
}

#[test]
fn file_has_exactly_three_fields_and_a_tagged_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    artifact().save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let fields = json.as_object().unwrap();

    assert_eq!(fields.len(), 3);
    assert_eq!(json["target_names"], serde_json::json!(["a", "b"]));
    assert_eq!(json["feature_names"], serde_json::json!(["x0", "x1"]));
    assert_eq!(json["model"]["logistic_regression"]["n_classes"], 2);
}

#[test]
fn loading_a_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelArtifact::load(&dir.path().join("missing.json")).unwrap_err();

    assert!(matches!(err, ArtifactErr::NotFound { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn loading_garbage_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, r#"{"model": {"random_forest": {}}}"#).unwrap();

    assert!(matches!(
        ModelArtifact::load(&path),
        Err(ArtifactErr::Format { .. })
    ));
}

#[test]
fn fitted_model_delegates_to_the_algorithm() {
    let model = LogisticRegression::new(4, 3, 1.0).unwrap();
    let fitted = FittedModel::from(model.clone());

    let x = array![[5.1, 3.5, 1.4, 0.2]];
    assert_eq!(fitted.predict(x.view()).unwrap(), model.predict(x.view()).unwrap());
    assert_eq!(fitted.n_features(), 4);
}
