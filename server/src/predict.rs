use std::collections::BTreeMap;

use machine_learning::arch::argmax;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{ModelContext, Result, ServeErr};

/// The measurements of a single flower, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrisFeatures {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl IrisFeatures {
    /// Lays the measurements out as a single sample in the column order the model was fit on.
    pub fn to_sample(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, 4), |(_, j)| match j {
            0 => self.sepal_length,
            1 => self.sepal_width,
            2 => self.petal_length,
            _ => self.petal_width,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub predicted_class_index: usize,
    pub class_probabilities: BTreeMap<String, f64>,
}

/// Classifies `features` with the loaded model.
///
/// # Arguments
/// * `context` - The loaded model, if any.
/// * `features` - The sample to classify.
///
/// # Returns
/// The most probable class with the full distribution, `ServeErr::ModelNotLoaded` if there's
/// no model, or `ServeErr::InvalidInput` if the sample doesn't fit the model.
pub fn predict(
    context: Option<&ModelContext>,
    features: &IrisFeatures,
) -> Result<PredictionResult> {
    let context = context.ok_or(ServeErr::ModelNotLoaded)?;
    let sample = features.to_sample();

    let proba = context
        .model
        .predict_proba(sample.view())
        .map_err(|e| ServeErr::InvalidInput(e.to_string()))?;

    let names = &context.target_names;
    let row = proba.row(0);

    if row.len() != names.len() {
        return Err(ServeErr::InvalidInput(format!(
            "the model predicts {} classes but {} are named",
            row.len(),
            names.len()
        )));
    }

    let index = argmax(row);
    let class_probabilities = names.iter().cloned().zip(row.iter().copied()).collect();

    Ok(PredictionResult {
        predicted_class: names[index].clone(),
        predicted_class_index: index,
        class_probabilities,
    })
}
