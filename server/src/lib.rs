//! HTTP inference service for a trained iris classifier.

mod config;
mod error;
pub mod predict;
mod routes;
mod state;

use std::{future, io};

use log::{error, info};
use tokio::{net::TcpListener, signal};

pub use config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UI_PATH, ServerConfig};
pub use error::{Result, ServeErr};
pub use routes::build_router;
pub use state::{AppState, ModelContext, load_model};

/// Loads the model and serves it until ctrl-c. Fails before binding if the artifact is missing.
pub async fn run(config: ServerConfig) -> Result<()> {
    let context = load_model(&config.model_path)?;
    let app = build_router(AppState::new(Some(context), config.ui_path.clone()));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("wrapping up, shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    wait_for(signal::ctrl_c()).await
}

/// Resolves once `signal` fires. If listening for it fails the server keeps running.
async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("received ctrl-c"),
        Err(e) => {
            error!("failed to listen for ctrl-c: {e}");
            future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn shutdown_follows_the_signal() {
        let signal = async { Ok::<(), io::Error>(()) };

        let fired = timeout(Duration::from_millis(100), wait_for(signal)).await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn failing_to_listen_does_not_shut_down() {
        let failed = async { Err::<(), _>(io::Error::other("no signal handler")) };

        let fired = timeout(Duration::from_millis(100), wait_for(failed)).await;
        assert!(fired.is_err());
    }
}
