use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use creditmeter_models::ingestion::{IngestContentRequest, IngestContentResponse};

use crate::errors::IngestionError;
use crate::models::AppState;
use crate::services::chunker::count_words;
use crate::services::pipeline::IngestionPipeline;

/// Accept an ingestion job and return before it runs. Progress is only
/// observable through the caller's webhook.
pub async fn ingest_content(
    payload: web::Json<IngestContentRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, IngestionError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(IngestionError::Validation(validation_errors.to_string()));
    }

    let request = payload.into_inner();
    let num_tokens = count_words(&request.content);
    let unique_id = request.unique_id.clone();

    info!(
        "📦 Starting ingestion job {} ({} words, word limit {})",
        unique_id, num_tokens, request.word_limit
    );

    // Spawn background task to process the job
    let state_clone = state.get_ref().clone();
    tokio::spawn(async move {
        let pipeline = IngestionPipeline::new(
            state_clone.embedding_client.clone(),
            state_clone.vector_client.clone(),
            state_clone.webhook_client.clone(),
        );

        if let Err(e) = pipeline.run(request).await {
            error!("❌ Job {} failed: {}", unique_id, e);
        }
    });

    Ok(HttpResponse::Ok().json(IngestContentResponse {
        status: "processing started".to_string(),
        num_tokens,
    }))
}

pub fn configure_ingestion_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upsert", web::post().to(ingest_content));
}
