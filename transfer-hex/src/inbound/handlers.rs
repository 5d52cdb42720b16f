//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use transfer_types::{
    Currency, ErrorMessage, ErrorResponse, ExchangeRateResponse, RateSource, TransactionRequest,
    TransactionResponse, TransferError, TransferStore,
};

use crate::TransferService;

/// Application state shared across handlers.
pub struct AppState<S: TransferStore, R: RateSource> {
    pub service: TransferService<S, R>,
}

/// Wrapper to implement IntoResponse for TransferError (orphan rule workaround).
pub struct ApiError(pub TransferError);

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, key) = match &self.0 {
            TransferError::InvalidAmount(_) => {
                (StatusCode::BAD_REQUEST, "0001", "FIELDS_VALIDATION_ERROR")
            }
            TransferError::InvalidTransfer(_) => {
                (StatusCode::BAD_REQUEST, "0004", "INVALID_TRANSFER_ERROR")
            }
            TransferError::InsufficientBalance { .. } => {
                (StatusCode::BAD_REQUEST, "0006", "INSUFFICIENT_BALANCE_ERROR")
            }
            TransferError::AccountNotFound(_) => {
                (StatusCode::NOT_FOUND, "0005", "ACCOUNT_NOT_FOUND_ERROR")
            }
            TransferError::ExchangeRateNotFound { .. } => {
                (StatusCode::NOT_FOUND, "0002", "EXCHANGE_RATE_NOT_FOUND_ERROR")
            }
            TransferError::ConsistencyConflict(_) => {
                (StatusCode::CONFLICT, "0007", "CONCURRENT_MODIFICATION_ERROR")
            }
            TransferError::ExchangeRateUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "0003",
                "EXCHANGE_RATE_SERVICE_ERROR",
            ),
            TransferError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "0000", "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse {
            error_code: format!("{}{}", status.as_u16(), code),
            error_message: ErrorMessage {
                key: key.to_string(),
                text: self.0.to_string(),
            },
            timestamp: Utc::now().timestamp_millis(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Transfer funds between two accounts.
#[tracing::instrument(
    skip(state),
    fields(from = %req.account_owner_id, to = %req.target_account_id, amount = %req.amount)
)]
pub async fn perform_transfer<S: TransferStore, R: RateSource>(
    State(state): State<Arc<AppState<S, R>>>,
    Json(req): Json<TransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .service
        .perform_transfer(req.account_owner_id, req.target_account_id, req.amount)
        .await?;
    Ok(Json(TransactionResponse::from(entry)))
}

/// Query parameters for a rate lookup.
#[derive(Debug, Deserialize)]
pub struct ExchangeRateParams {
    pub from_currency: String,
    pub to_currency: String,
}

/// Look up the current spot rate for a currency pair.
#[tracing::instrument(skip(state), fields(from = %params.from_currency, to = %params.to_currency))]
pub async fn exchange_rate<S: TransferStore, R: RateSource>(
    State(state): State<Arc<AppState<S, R>>>,
    Query(params): Query<ExchangeRateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let from = parse_currency(&params.from_currency)?;
    let to = parse_currency(&params.to_currency)?;

    let rate = state.service.exchange_rate(from, to).await?;
    Ok(Json(ExchangeRateResponse::from(rate)))
}

fn parse_currency(raw: &str) -> Result<Currency, ApiError> {
    Currency::parse(raw).map_err(ApiError)
}
