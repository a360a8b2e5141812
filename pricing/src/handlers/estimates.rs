use actix_web::{web, HttpResponse};
use validator::Validate;

use creditmeter_models::pricing::{
    ApiCallEstimateRequest, ApiCallEstimateResponse, CreditEstimateRequest,
    MessagingEstimateRequest, MessagingEstimateResponse, TokenEstimateRequest,
};

use crate::errors::{PricingError, PricingResult};
use crate::services::calculator::CostCalculator;
use crate::services::messaging::MessagingRates;
use crate::services::tokenizer::TokenCounter;

pub async fn estimate_tokens(
    counter: web::Data<TokenCounter>,
    request: web::Json<TokenEstimateRequest>,
) -> PricingResult<HttpResponse> {
    let estimate = counter.estimate(&request.text, &request.model)?;
    Ok(HttpResponse::Ok().json(estimate))
}

pub async fn estimate_credit(
    calculator: web::Data<CostCalculator>,
    request: web::Json<CreditEstimateRequest>,
) -> PricingResult<HttpResponse> {
    if let Err(validation_errors) = request.validate() {
        return Err(PricingError::Validation(validation_errors.to_string()));
    }

    let credit = calculator.credit_estimate(
        request.words,
        request.pods,
        request.duration_hours,
        &request.model,
        &request.cloud_provider,
        &request.storage_type,
        &request.instance_type,
    )?;
    let breakdown = CostCalculator::breakdown(
        credit,
        request.margin_percent.unwrap_or(0.0),
        request.surcharge.unwrap_or(0.0),
    );

    Ok(HttpResponse::Ok().json(breakdown))
}

pub async fn estimate_messaging(
    rates: web::Data<MessagingRates>,
    request: web::Json<MessagingEstimateRequest>,
) -> PricingResult<HttpResponse> {
    let cost = rates.conversation_cost(
        &request.conversation_type,
        request.conversations,
        request.messages,
    )?;

    Ok(HttpResponse::Ok().json(MessagingEstimateResponse {
        conversation_type: request.conversation_type.clone(),
        conversations: request.conversations,
        messages: request.messages,
        cost,
    }))
}

pub async fn estimate_api_calls(
    rates: web::Data<MessagingRates>,
    request: web::Json<ApiCallEstimateRequest>,
) -> PricingResult<HttpResponse> {
    let cost = rates.api_call_cost(&request.call_type, request.calls)?;

    Ok(HttpResponse::Ok().json(ApiCallEstimateResponse {
        call_type: request.call_type.clone(),
        calls: request.calls,
        cost,
    }))
}

/// The full rate table, for callers that want to price things themselves.
pub async fn get_rates(
    calculator: web::Data<CostCalculator>,
    rates: web::Data<MessagingRates>,
) -> HttpResponse {
    let config = calculator.config();
    HttpResponse::Ok().json(serde_json::json!({
        "models": config.models,
        "vector_store_providers": config.vector_store_providers,
        "messaging": {
            "conversations": rates.conversation_rates(),
            "api_calls": rates.api_call_rates(),
        }
    }))
}

pub fn configure_pricing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/estimates")
            .route("/tokens", web::post().to(estimate_tokens))
            .route("/credit", web::post().to(estimate_credit))
            .route("/messaging", web::post().to(estimate_messaging))
            .route("/messaging/api-calls", web::post().to(estimate_api_calls)),
    )
    .route("/rates", web::get().to(get_rates));
}
