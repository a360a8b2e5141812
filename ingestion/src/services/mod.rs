pub mod chunker;
pub mod embeddings;
pub mod pipeline;
pub mod vector_store;
pub mod webhook;

pub use embeddings::EmbeddingClient;
pub use pipeline::IngestionPipeline;
pub use vector_store::{VectorRecord, VectorStoreClient};
pub use webhook::WebhookClient;

/// Upstream APIs cap batches at 100 items per request.
pub const MAX_BATCH_SIZE: usize = 100;
