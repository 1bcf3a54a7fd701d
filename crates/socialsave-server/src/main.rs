mod api;
mod middleware;

use socialsave_gemini::{AnalysisError, Analyzer};
use socialsave_history::FileStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = socialsave_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // History endpoints stay usable without a key; analysis answers 503.
    let analyzer = match Analyzer::from_config(&config) {
        Ok(analyzer) => Some(analyzer),
        Err(AnalysisError::MissingApiKey) => {
            tracing::warn!("GEMINI_API_KEY is not set; analysis is disabled");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let store = FileStore::new(&config.data_dir);
    let state = AppState::new(analyzer, Box::new(store));
    tracing::info!(
        env = %config.env,
        data_dir = %config.data_dir.display(),
        history_entries = state.history.lock().await.len(),
        "history loaded"
    );

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
