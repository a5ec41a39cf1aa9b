use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use article_mirror::app::App;
use article_mirror::config::Config;
use article_mirror::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Check for --save flag (headless fetch-and-store)
    let headless_save = args.len() >= 2 && args[1] == "--save";

    let app = match App::new(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, db_path = %config.db_path, "failed to initialize store");
            return Err(e).context("startup failed");
        }
    };

    if headless_save {
        let saved = app.save_feed().await?;
        println!("Saved {} articles from {}", saved, config.feed_url);
        app.repository.close().await?;
        return Ok(());
    }

    let repository = app.repository.clone();
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(
        addr = %config.listen_addr,
        db_path = %config.db_path,
        feed_url = %config.feed_url,
        "server is running"
    );

    axum::serve(listener, server::router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await?;
    tracing::info!("server has shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
