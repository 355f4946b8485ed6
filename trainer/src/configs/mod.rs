mod adapter;
mod training;

pub(crate) use adapter::Adapter;
pub use training::{OptimizerConfig, TrainingConfig};
