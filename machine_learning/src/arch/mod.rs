pub mod activations;
mod classifier;
mod logistic;
pub mod loss;
mod model;

pub use classifier::{Classifier, argmax};
pub use logistic::LogisticRegression;
pub use model::Model;
