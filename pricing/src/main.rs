use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use std::env;
use std::sync::Arc;
use tracing::info;

use creditmeter_config::PricingConfig;
use creditmeter_pricing::handlers;
use creditmeter_pricing::services::{CostCalculator, MessagingRates, TokenCounter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let port = env::var("PRICING_SERVICE_PORT")
        .unwrap_or_else(|_| "8081".to_string())
        .parse::<u16>()
        .unwrap_or(8081);
    let host = env::var("PRICING_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

    // A broken pricing table must fail startup, not individual requests.
    let config = Arc::new(PricingConfig::from_env_path()?);
    let token_counter = web::Data::new(TokenCounter::from_config(config.clone())?);
    let calculator = web::Data::new(CostCalculator::new(config));
    let messaging = web::Data::new(MessagingRates::new());

    info!("🚀 [Pricing Service] Starting on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(token_counter.clone())
            .app_data(calculator.clone())
            .app_data(messaging.clone())
            .wrap(cors)
            .route("/health", web::get().to(health_check))
            .configure(handlers::estimates::configure_pricing_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

async fn health_check(calculator: web::Data<CostCalculator>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "pricing-service",
        "models": calculator.config().models.len(),
        "providers": calculator.config().vector_store_providers.len(),
        "timestamp": chrono::Utc::now()
    }))
}
