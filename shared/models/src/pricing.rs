use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Token estimates
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEstimateRequest {
    pub text: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEstimateResponse {
    pub model: String,
    /// Whitespace word count of the input text.
    pub words: usize,
    /// Exact token count under the model's encoding.
    pub tokens: usize,
    /// USD price for that many tokens.
    pub price: f64,
}

// ============================================================================
// Credit estimates
// ============================================================================

/// Inputs for a combined prompt + vector store credit estimate. Token usage
/// is approximated from the word count rather than tokenized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreditEstimateRequest {
    pub words: u64,
    /// Number of vector store pods reserved for the job.
    pub pods: u32,
    /// Hours the pods are occupied.
    pub duration_hours: f64,
    pub model: String,
    pub cloud_provider: String,
    pub storage_type: String,
    pub instance_type: String,

    /// Operator margin applied on top of the raw credit, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub margin_percent: Option<f64>,

    /// Flat infrastructure surcharge added after the margin, in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub surcharge: Option<f64>,
}

/// The raw credit plus every adjusted view of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditBreakdown {
    pub credit: f64,
    pub credit_with_margin: f64,
    pub credit_with_surcharge: f64,
    pub credit_with_margin_and_surcharge: f64,
}

// ============================================================================
// Messaging estimates
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingEstimateRequest {
    /// Either `utility` or `service_conversation`.
    pub conversation_type: String,
    pub conversations: u64,
    pub messages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingEstimateResponse {
    pub conversation_type: String,
    pub conversations: u64,
    pub messages: u64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCallEstimateRequest {
    /// One of `marketing`, `utility`, `authentication` or `service`.
    pub call_type: String,
    pub calls: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCallEstimateResponse {
    pub call_type: String,
    pub calls: u64,
    pub cost: f64,
}
