mod builder;
mod model_trainer;
mod spec;

pub use builder::TrainerBuilder;
pub use model_trainer::{FitReport, ModelTrainer};
pub use spec::{OptimizerSpec, TrainerSpec};
