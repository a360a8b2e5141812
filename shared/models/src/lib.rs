pub mod ingestion;
pub mod pricing;
