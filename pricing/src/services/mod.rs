pub mod calculator;
pub mod messaging;
pub mod tokenizer;

pub use calculator::CostCalculator;
pub use messaging::MessagingRates;
pub use tokenizer::TokenCounter;
