mod config;
mod error;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::middleware::logging;
use crate::routes::{chat, health, threads};
use crate::state::AppState;
use weft_agent::{AgentRunner, OpenAiRunner};
use weft_engine::Engine;
use weft_store::{MemoryStore, ThreadStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Weft API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let store: Arc<dyn ThreadStore> = Arc::new(MemoryStore::new());

    tracing::info!("Initializing agent runner (model: {})", config.llm.model);
    let runner: Arc<dyn AgentRunner> = Arc::new(OpenAiRunner::new(
        config.openai_api_key.clone(),
        config.llm.model.clone(),
    )?);

    let engine = Engine::new(
        Arc::clone(&store),
        runner,
        config.llm.instructions.clone(),
        config.share.base_url.clone(),
    );

    let state = Arc::new(AppState::new(config.clone(), store, engine));

    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/", get(health::health_check))
        // Chat (conversational turns and actions)
        .route("/api/chat", post(chat::chat))
        // Threads
        .route("/api/threads", get(threads::list_threads))
        .route("/api/threads/:thread_id", get(threads::get_thread))
        .route("/api/threads/:thread_id", delete(threads::delete_thread))
        .route("/api/threads/:thread_id/items", get(threads::list_items));

    Router::new()
        .merge(api_routes)
        .layer(axum::middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
