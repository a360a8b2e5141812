use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Failures of an ingestion job. Apart from `Validation`, these occur in
/// the background after the trigger response has been sent, so they are
/// logged rather than returned to the caller.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("OpenAI API request failed with status {status}: {body}")]
    EmbeddingApi { status: u16, body: String },

    #[error("Vector store upsert to {endpoint} (namespace '{namespace}', batch of {batch_size}) failed with status {status}: {body}")]
    VectorStoreApi {
        endpoint: String,
        namespace: String,
        batch_size: usize,
        status: u16,
        body: String,
    },

    #[error("Webhook trigger failed with status code: {status}")]
    WebhookFailed { status: u16 },

    #[error("Expected {chunks} embeddings but received {embeddings}")]
    EmbeddingCountMismatch { chunks: usize, embeddings: usize },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ResponseError for IngestionError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            IngestionError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type IngestionResult<T> = Result<T, IngestionError>;
