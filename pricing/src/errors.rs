use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Invalid model. Choose either gpt-4-8k, gpt-4-32k or gpt-3.5-turbo.")]
    InvalidModel(String),

    #[error("Invalid cloud provider. Choose either aws, gcp or azure.")]
    InvalidProvider(String),

    #[error("Invalid storage type.")]
    InvalidStorageType(String),

    #[error("Invalid instance type.")]
    InvalidInstanceType(String),

    #[error("Invalid conversation type. Choose either 'utility' or 'service_conversation'.")]
    InvalidConversationType(String),

    #[error("Invalid API call type. Choose one of 'marketing', 'utility', 'authentication' or 'service'.")]
    InvalidApiCallType(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No tokenizer loaded for model '{0}'")]
    EncoderUnavailable(String),
}

impl ResponseError for PricingError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            PricingError::EncoderUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
