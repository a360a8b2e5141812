pub mod pricing;

pub use pricing::{ConfigError, InstanceRate, ModelRate, PricingConfig};
