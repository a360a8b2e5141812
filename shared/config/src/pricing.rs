use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pricing table '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse pricing table '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("pricing table '{path}' is incomplete: {reason}")]
    Incomplete { path: String, reason: String },
}

/// Token pricing for a single LLM model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelRate {
    /// Tokenizer model name resolved through tiktoken.
    pub encoding: String,
    /// USD per 1000 exact tokens.
    pub cost_per_1k_tokens: f64,
    /// USD per approximated prompt token.
    pub prompt_cost_per_token: f64,
}

/// Hourly pod pricing for one instance size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstanceRate {
    pub cost_per_hour: f64,
}

/// Provider -> storage type -> instance type -> hourly rate.
pub type ProviderRates = HashMap<String, HashMap<String, HashMap<String, InstanceRate>>>;

/// The full pricing table, loaded once at service startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingConfig {
    pub models: HashMap<String, ModelRate>,
    pub vector_store_providers: ProviderRates,
}

impl PricingConfig {
    // Load from a provided path or env var PRICING_CONFIG_PATH, defaulting to ./costing.yaml
    pub fn from_path(path: Option<String>) -> Result<Self, ConfigError> {
        let default_path =
            std::env::var("PRICING_CONFIG_PATH").unwrap_or_else(|_| "costing.yaml".to_string());
        let path = path.unwrap_or(default_path);

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse_and_validate(&content, &path)?;

        info!(
            "💰 Loaded pricing table from {} ({} models, {} providers)",
            path,
            config.models.len(),
            config.vector_store_providers.len()
        );
        Ok(config)
    }

    pub fn from_env_path() -> Result<Self, ConfigError> {
        Self::from_path(None)
    }

    pub fn model(&self, name: &str) -> Option<&ModelRate> {
        self.models.get(name)
    }

    fn parse_and_validate(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_string(),
                source,
            })?;
        config.validate(path)?;
        Ok(config)
    }

    // An empty table would turn every estimate into a 400, so refuse to start on one.
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let incomplete = |reason: String| ConfigError::Incomplete {
            path: path.to_string(),
            reason,
        };

        if self.models.is_empty() {
            return Err(incomplete("no models defined".to_string()));
        }
        if self.vector_store_providers.is_empty() {
            return Err(incomplete("no vector store providers defined".to_string()));
        }
        for (provider, storages) in &self.vector_store_providers {
            if storages.is_empty() {
                return Err(incomplete(format!(
                    "provider '{}' has no storage types",
                    provider
                )));
            }
            for (storage, instances) in storages {
                if instances.is_empty() {
                    return Err(incomplete(format!(
                        "provider '{}' storage type '{}' has no instance types",
                        provider, storage
                    )));
                }
            }
        }
        Ok(())
    }
}
