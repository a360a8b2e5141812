//! Credit and token price calculators over the loaded pricing table.
//!
//! Everything here is table-driven: the calculator holds the parsed
//! `costing.yaml` and never talks to the network.

use std::sync::Arc;

use creditmeter_config::PricingConfig;
use creditmeter_models::pricing::CreditBreakdown;

use crate::errors::{PricingError, PricingResult};

/// Rule of thumb for GPT models: one word is roughly 3/4 of a token.
const TOKENS_PER_WORD: f64 = 4.0 / 3.0;

pub struct CostCalculator {
    config: Arc<PricingConfig>,
}

impl CostCalculator {
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Estimated token count for a word count, truncated like the billing
    /// ledger expects (never rounded up).
    pub fn words_to_tokens(words: u64) -> u64 {
        (words as f64 * TOKENS_PER_WORD) as u64
    }

    /// USD price for an exact token count under the given model.
    pub fn token_price(&self, model: &str, tokens: usize) -> PricingResult<f64> {
        let rate = self
            .config
            .model(model)
            .ok_or_else(|| PricingError::InvalidModel(model.to_string()))?;
        Ok((tokens as f64 / 1000.0) * rate.cost_per_1k_tokens)
    }

    /// Pod occupancy cost resolved through provider -> storage -> instance.
    pub fn vector_store_cost(
        &self,
        pods: u32,
        duration_hours: f64,
        provider: &str,
        storage_type: &str,
        instance_type: &str,
    ) -> PricingResult<f64> {
        let storages = self
            .config
            .vector_store_providers
            .get(provider)
            .ok_or_else(|| PricingError::InvalidProvider(provider.to_string()))?;
        let instances = storages
            .get(storage_type)
            .ok_or_else(|| PricingError::InvalidStorageType(storage_type.to_string()))?;
        let rate = instances
            .get(instance_type)
            .ok_or_else(|| PricingError::InvalidInstanceType(instance_type.to_string()))?;

        Ok(pods as f64 * duration_hours * rate.cost_per_hour)
    }

    /// Combined prompt + vector store credit for a word count. Token usage
    /// is approximated from words; the exact tokenizer lives elsewhere.
    #[allow(clippy::too_many_arguments)]
    pub fn credit_estimate(
        &self,
        words: u64,
        pods: u32,
        duration_hours: f64,
        model: &str,
        provider: &str,
        storage_type: &str,
        instance_type: &str,
    ) -> PricingResult<f64> {
        // Model is checked before any infrastructure input.
        let rate = self
            .config
            .model(model)
            .ok_or_else(|| PricingError::InvalidModel(model.to_string()))?;
        let vector_store_cost =
            self.vector_store_cost(pods, duration_hours, provider, storage_type, instance_type)?;

        let tokens = Self::words_to_tokens(words);
        let prompt_cost = tokens as f64 * rate.prompt_cost_per_token;

        Ok(prompt_cost + vector_store_cost)
    }

    /// Raw credit plus its margin and surcharge views.
    pub fn breakdown(credit: f64, margin_percent: f64, surcharge: f64) -> CreditBreakdown {
        let with_margin = credit * (1.0 + margin_percent / 100.0);
        CreditBreakdown {
            credit,
            credit_with_margin: with_margin,
            credit_with_surcharge: credit + surcharge,
            credit_with_margin_and_surcharge: with_margin + surcharge,
        }
    }
}
