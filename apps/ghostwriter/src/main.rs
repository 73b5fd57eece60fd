mod config;
mod drafting;
mod errors;
mod extract;
mod learning;
mod library;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::drafting::generator::{DraftWriter, LlmDraftWriter};
use crate::drafting::style_guide::StyleGuideStore;
use crate::learning::Workspace;
use crate::library::LibraryStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ghostwriter v{}", env!("CARGO_PKG_VERSION"));

    // Learning workspace
    let workspace = Workspace::new(config.trigger, config.review);
    info!(
        "Style model trigger: {} final documents or {} total words",
        config.trigger.min_final_documents, config.trigger.min_total_words
    );

    // Draft writer (optional)
    let drafter: Option<Arc<dyn DraftWriter>> = match &config.openai_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.openai_model.clone())
                .context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(LlmDraftWriter(llm)))
        }
        None => {
            warn!("OPENAI_API_KEY not set; draft generation is disabled");
            None
        }
    };

    let style_guide = StyleGuideStore::open(&config.style_guide_path)
        .await
        .with_context(|| {
            format!(
                "Failed to read style guide at {}",
                config.style_guide_path.display()
            )
        })?;

    let library = LibraryStore::new(&config.docs_dir);
    info!("Document library at {}", library.dir().display());

    let state = AppState {
        workspace: Arc::new(RwLock::new(workspace)),
        style_guide: Arc::new(tokio::sync::RwLock::new(style_guide)),
        library,
        drafter,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
