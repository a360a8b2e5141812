//! OpenAI embeddings client.
//!
//! Each job carries its own API key, so the key is a call argument
//! rather than client state.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::errors::{IngestionError, IngestionResult};
use crate::services::MAX_BATCH_SIZE;

/// Model used for all chunk embeddings.
const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Clone)]
pub struct EmbeddingClient {
    base_url: String,
    client: Client,
}

impl Default for EmbeddingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// Point the client at an OpenAI-compatible host.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Embed chunks in input order, at most `MAX_BATCH_SIZE` per request.
    /// The first failing batch aborts the whole call.
    pub async fn embed_chunks(
        &self,
        chunks: &[String],
        api_key: &str,
    ) -> IngestionResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(chunks.len());
        let url = format!("{}/embeddings", self.base_url);

        for batch in chunks.chunks(MAX_BATCH_SIZE) {
            info!("📤 Requesting embeddings for a batch of {} chunks", batch.len());

            let request = EmbeddingsRequest {
                model: EMBEDDING_MODEL.to_string(),
                input: batch.to_vec(),
            };

            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|source| IngestionError::Transport {
                    url: url.clone(),
                    source,
                })?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unable to read response body".to_string());
                error!("❌ OpenAI API error {}: {}", status, body);
                return Err(IngestionError::EmbeddingApi { status, body });
            }

            let result: EmbeddingsResponse =
                response
                    .json()
                    .await
                    .map_err(|source| IngestionError::Transport {
                        url: url.clone(),
                        source,
                    })?;

            // Items may arrive out of order; the index restores input order.
            let mut data = result.data;
            data.sort_by_key(|item| item.index);
            embeddings.extend(data.into_iter().map(|item| item.embedding));
        }

        info!("✅ Embedded {} chunks", embeddings.len());
        Ok(embeddings)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
