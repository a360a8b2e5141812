use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Ingestion trigger API
// ============================================================================

/// Body of `POST /upsert`. The mixed camelCase spellings are part of the
/// public trigger contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngestContentRequest {
    /// Raw document text to be chunked and embedded.
    pub content: String,

    /// Maximum words per chunk. A zero limit can never partition the
    /// content, so it is rejected before any job is spawned.
    #[serde(rename = "wordLimit")]
    #[validate(range(min = 1))]
    pub word_limit: usize,

    /// Caller-chosen job identifier, echoed in every webhook notification
    /// and stamped on each stored vector as `memoryID`.
    #[serde(rename = "uniqueID")]
    pub unique_id: String,

    /// Base URL of the target vector store index.
    #[serde(rename = "pineconeURL")]
    pub pinecone_url: String,

    #[serde(rename = "pineconeAPIkey")]
    pub pinecone_api_key: String,

    #[serde(rename = "openAIAPIkey")]
    pub openai_api_key: String,

    /// Namespace the vectors are upserted into.
    pub namespace: String,

    /// Endpoint that receives one progress notification per stored batch.
    #[serde(rename = "webhookURL")]
    pub webhook_url: String,

    /// Optional tag copied into each vector's metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Immediate response to the trigger. `numTokens` is the whitespace word
/// count of the submitted content, not a tokenizer count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestContentResponse {
    pub status: String,
    #[serde(rename = "numTokens")]
    pub num_tokens: usize,
}

// ============================================================================
// Webhook notifications
// ============================================================================

/// Progress payload POSTed to the caller's webhook after each stored batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookNotification {
    /// Number of vectors in the batch that was just stored.
    pub processed: usize,
    /// Total number of chunks in the job.
    pub total: usize,
    #[serde(rename = "uniqueID")]
    pub unique_id: String,
    /// Vector store ids assigned to the vectors of this batch.
    #[serde(rename = "uniqueIDs")]
    pub unique_ids: Vec<String>,
}
