use crate::services::embeddings::EmbeddingClient;
use crate::services::vector_store::VectorStoreClient;
use crate::services::webhook::WebhookClient;

/// Application state shared across handlers
pub struct AppState {
    pub embedding_client: EmbeddingClient,
    pub vector_client: VectorStoreClient,
    pub webhook_client: WebhookClient,
}
