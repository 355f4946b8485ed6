use std::{env, path::PathBuf};

use anyhow::{Context, bail};
use log::info;
use server::ServerConfig;
use trainer::{TrainingConfig, train_and_save_model};

const USAGE: &str = "usage: iris-classifier <train|serve>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match env::args().nth(1).as_deref() {
        Some("train") => train(),
        Some("serve") => serve().await,
        _ => bail!(USAGE),
    }
}

fn train() -> anyhow::Result<()> {
    let mut config = TrainingConfig::default();
    if let Ok(path) = env::var("MODEL_PATH") {
        config.model_path = PathBuf::from(path);
    }

    info!("training on the iris dataset");
    let report = train_and_save_model(&config).context("training failed")?;

    println!("Test accuracy: {:.3}", report.accuracy);
    println!("Model saved to {}", report.model_path.display());
    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    server::run(config).await.context("server failed")
}
