//! Exact token counting through per-model tiktoken encoders.
//!
//! Encoders are resolved once at startup from each model's `encoding`
//! field, so a bad table entry fails the service instead of a request.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tiktoken_rs::CoreBPE;

use creditmeter_config::PricingConfig;
use creditmeter_models::pricing::TokenEstimateResponse;

use crate::errors::{PricingError, PricingResult};

pub struct TokenCounter {
    config: Arc<PricingConfig>,
    encoders: HashMap<String, CoreBPE>,
}

impl TokenCounter {
    /// Resolve one encoder per configured model.
    pub fn from_config(config: Arc<PricingConfig>) -> Result<Self> {
        let mut encoders = HashMap::new();
        for (name, rate) in &config.models {
            let encoder = tiktoken_rs::get_bpe_from_model(&rate.encoding).map_err(|e| {
                anyhow!(
                    "no tiktoken encoding '{}' for model '{}': {}",
                    rate.encoding,
                    name,
                    e
                )
            })?;
            encoders.insert(name.clone(), encoder);
        }
        Ok(Self { config, encoders })
    }

    /// Word count, exact token count, and USD price of a text under a model.
    pub fn estimate(&self, text: &str, model: &str) -> PricingResult<TokenEstimateResponse> {
        let rate = self
            .config
            .model(model)
            .ok_or_else(|| PricingError::InvalidModel(model.to_string()))?;
        let encoder = self
            .encoders
            .get(model)
            .ok_or_else(|| PricingError::EncoderUnavailable(model.to_string()))?;

        let tokens = encoder.encode_with_special_tokens(text).len();
        let price = (tokens as f64 / 1000.0) * rate.cost_per_1k_tokens;

        Ok(TokenEstimateResponse {
            model: model.to_string(),
            words: text.split_whitespace().count(),
            tokens,
            price,
        })
    }
}
