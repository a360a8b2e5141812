//! The background ingestion job: chunk, embed, store, notify.
//!
//! Stages run strictly in sequence. One notification goes out per stored
//! batch, and the first failed stage ends the job with no rollback of
//! vectors already upserted.

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use creditmeter_models::ingestion::{IngestContentRequest, WebhookNotification};

use crate::errors::{IngestionError, IngestionResult};
use crate::services::chunker::split_into_chunks;
use crate::services::embeddings::EmbeddingClient;
use crate::services::vector_store::{VectorRecord, VectorStoreClient};
use crate::services::webhook::WebhookClient;
use crate::services::MAX_BATCH_SIZE;

pub struct IngestionPipeline {
    embedding_client: EmbeddingClient,
    vector_client: VectorStoreClient,
    webhook_client: WebhookClient,
}

impl IngestionPipeline {
    pub fn new(
        embedding_client: EmbeddingClient,
        vector_client: VectorStoreClient,
        webhook_client: WebhookClient,
    ) -> Self {
        Self {
            embedding_client,
            vector_client,
            webhook_client,
        }
    }

    pub async fn run(&self, request: IngestContentRequest) -> IngestionResult<()> {
        let chunks = split_into_chunks(&request.content, request.word_limit);
        let total = chunks.len();

        if chunks.is_empty() {
            info!(
                "✂️  Job {}: content has no words, nothing to ingest",
                request.unique_id
            );
            return Ok(());
        }

        info!(
            "✂️  Job {}: split content into {} chunks (word limit {})",
            request.unique_id, total, request.word_limit
        );

        let embeddings = self
            .embedding_client
            .embed_chunks(&chunks, &request.openai_api_key)
            .await?;
        if embeddings.len() != chunks.len() {
            return Err(IngestionError::EmbeddingCountMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let vectors = build_vector_records(
            &chunks,
            embeddings,
            &request.unique_id,
            request.category.as_deref(),
        );

        let mut batches = 0;
        for batch in vectors.chunks(MAX_BATCH_SIZE) {
            let stored_ids = self
                .vector_client
                .upsert(
                    &request.pinecone_url,
                    &request.namespace,
                    batch,
                    &request.pinecone_api_key,
                )
                .await?;

            let notification = WebhookNotification {
                processed: batch.len(),
                total,
                unique_id: request.unique_id.clone(),
                unique_ids: stored_ids,
            };
            self.webhook_client
                .notify(&request.webhook_url, &notification)
                .await?;
            batches += 1;
        }

        info!(
            "✅ Job {}: ingested {} chunks in {} batches",
            request.unique_id, total, batches
        );
        Ok(())
    }
}

/// Pair each chunk with its embedding and stamp the job metadata on it.
fn build_vector_records(
    chunks: &[String],
    embeddings: Vec<Vec<f32>>,
    unique_id: &str,
    category: Option<&str>,
) -> Vec<VectorRecord> {
    chunks
        .iter()
        .zip(embeddings)
        .map(|(content, values)| {
            let mut metadata = json!({
                "content": content,
                "memoryID": unique_id,
            });
            if let Some(category) = category {
                metadata["category"] = json!(category);
            }

            VectorRecord {
                // 32 character hex id, no hyphens
                id: Uuid::new_v4().simple().to_string(),
                values,
                metadata,
            }
        })
        .collect()
}
