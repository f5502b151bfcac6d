use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use empathy_mirror::{
    create_router, AppState, Config, EmpathyAnalyzer, HistoryStore, MemoryHistoryStore,
    RemoteAnalyzer, RemoteHistoryStore, SessionDefaults, UserContext,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "empathy-mirror", about = "Speech capture and empathy analysis service")]
struct Args {
    /// Config file (without extension), resolved by the config crate
    #[arg(long, default_value = "config/empathy-mirror")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("Empathy Mirror v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Analysis endpoint: {}", cfg.analysis.endpoint);

    let analyzer: Arc<dyn EmpathyAnalyzer> = Arc::new(RemoteAnalyzer::new(
        cfg.analysis.endpoint.clone(),
        cfg.analysis.api_key.clone(),
        Duration::from_secs(cfg.analysis.timeout_secs),
    )?);

    let history: Arc<dyn HistoryStore> = match &cfg.history.endpoint {
        Some(endpoint) => Arc::new(RemoteHistoryStore::new(endpoint.clone())),
        None => {
            info!("No history endpoint configured; keeping records in memory");
            Arc::new(MemoryHistoryStore::new())
        }
    };

    let defaults = SessionDefaults {
        locale: cfg.speech.locale.clone(),
        continuous: cfg.speech.continuous,
        interim_results: cfg.speech.interim_results,
        user: UserContext::default(),
    };

    let state = AppState::new(analyzer, history, defaults);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
