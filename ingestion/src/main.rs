use actix_web::{web, App, HttpResponse, HttpServer};
use std::env;
use std::sync::Arc;
use tracing::info;

use creditmeter_ingestion::handlers;
use creditmeter_ingestion::models::AppState;
use creditmeter_ingestion::services::{EmbeddingClient, VectorStoreClient, WebhookClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let port = env::var("INGESTION_SERVICE_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or(8080);
    let host = env::var("INGESTION_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

    // Vector store and webhook endpoints arrive with each request; only
    // the embeddings host is deployment configuration.
    let openai_base =
        env::var("OPENAI_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
    info!("📡 Embeddings API base: {}", openai_base);

    // Create app state
    let state = Arc::new(AppState {
        embedding_client: EmbeddingClient::with_base_url(openai_base),
        vector_client: VectorStoreClient::new(),
        webhook_client: WebhookClient::new(),
    });

    info!("🚀 [Ingestion Service] Starting on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(health_check))
            .configure(handlers::ingest::configure_ingestion_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "ingestion-service",
        "timestamp": chrono::Utc::now()
    }))
}
