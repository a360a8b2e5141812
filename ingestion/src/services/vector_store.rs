//! Vector store upsert client.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::errors::{IngestionError, IngestionResult};
use crate::services::MAX_BATCH_SIZE;

/// One vector ready for upsert.
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Value,
}

#[derive(Clone)]
pub struct VectorStoreClient {
    client: Client,
}

impl Default for VectorStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStoreClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Upsert vectors into `namespace`, at most `MAX_BATCH_SIZE` per
    /// request. Returns the ids of the stored vectors in input order.
    pub async fn upsert(
        &self,
        index_url: &str,
        namespace: &str,
        vectors: &[VectorRecord],
        api_key: &str,
    ) -> IngestionResult<Vec<String>> {
        let url = format!("{}/vectors/upsert", index_url);
        let mut ids = Vec::with_capacity(vectors.len());

        for batch in vectors.chunks(MAX_BATCH_SIZE) {
            let request = UpsertRequest {
                vectors: batch.to_vec(),
                namespace: namespace.to_string(),
            };

            let response = self
                .client
                .post(&url)
                .header("accept", "application/json")
                .header("Api-Key", api_key)
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
                error!(
                    "❌ Vector store upsert to {} (namespace '{}') failed with {}: {}",
                    url, namespace, status, body
                );
                // The error context carries the request shape but never the key.
                return Err(IngestionError::VectorStoreApi {
                    endpoint: url.clone(),
                    namespace: namespace.to_string(),
                    batch_size: batch.len(),
                    status,
                    body,
                });
            }

            ids.extend(batch.iter().map(|vector| vector.id.clone()));
        }

        info!(
            "📦 Upserted {} vectors into namespace '{}'",
            ids.len(),
            namespace
        );
        Ok(ids)
    }
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<VectorRecord>,
    namespace: String,
}
