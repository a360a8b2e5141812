//! Messaging channel cost tables.
//!
//! Unlike the model and pod tables these rates are fixed per deployment
//! region, so they ship in code rather than in `costing.yaml`.

use serde::Serialize;
use std::collections::HashMap;

use crate::errors::{PricingError, PricingResult};

/// Per-conversation and per-message rates for one conversation type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConversationRate {
    pub conversation: f64,
    pub message: f64,
}

pub struct MessagingRates {
    conversation_rates: HashMap<String, ConversationRate>,
    api_call_rates: HashMap<String, f64>,
}

impl Default for MessagingRates {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagingRates {
    pub fn new() -> Self {
        // Twilio + WhatsApp conversation rates
        let mut conversation_rates = HashMap::new();
        conversation_rates.insert(
            "utility".to_string(),
            ConversationRate {
                conversation: 0.02,
                message: 0.005,
            },
        );
        conversation_rates.insert(
            "service_conversation".to_string(),
            ConversationRate {
                conversation: 0.0022,
                message: 0.005,
            },
        );

        // WhatsApp costs in Malaysia per API call
        let mut api_call_rates = HashMap::new();
        api_call_rates.insert("marketing".to_string(), 0.086);
        api_call_rates.insert("utility".to_string(), 0.02);
        api_call_rates.insert("authentication".to_string(), 0.018);
        api_call_rates.insert("service".to_string(), 0.022);

        Self {
            conversation_rates,
            api_call_rates,
        }
    }

    /// Total cost for a number of conversations and messages of one type.
    pub fn conversation_cost(
        &self,
        conversation_type: &str,
        conversations: u64,
        messages: u64,
    ) -> PricingResult<f64> {
        let rate = self
            .conversation_rates
            .get(conversation_type)
            .ok_or_else(|| PricingError::InvalidConversationType(conversation_type.to_string()))?;

        Ok(rate.conversation * conversations as f64 + rate.message * messages as f64)
    }

    /// Total cost for a number of single API calls of one type.
    pub fn api_call_cost(&self, call_type: &str, calls: u64) -> PricingResult<f64> {
        let rate = self
            .api_call_rates
            .get(call_type)
            .ok_or_else(|| PricingError::InvalidApiCallType(call_type.to_string()))?;

        Ok(rate * calls as f64)
    }

    pub fn conversation_rates(&self) -> &HashMap<String, ConversationRate> {
        &self.conversation_rates
    }

    pub fn api_call_rates(&self) -> &HashMap<String, f64> {
        &self.api_call_rates
    }
}
