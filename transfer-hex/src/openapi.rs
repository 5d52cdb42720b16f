//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;

use transfer_types::domain::{LedgerEntryId, OwnerId, TransactionStatus};
use transfer_types::dto::{
    ErrorMessage, ErrorResponse, ExchangeRateResponse, TransactionRequest, TransactionResponse,
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Transfer funds between two accounts
#[utoipa::path(
    post,
    path = "/transfer",
    tag = "transfers",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transfer completed", body = TransactionResponse),
        (status = 400, description = "Invalid amount, same-account transfer, or insufficient balance", body = ErrorResponse),
        (status = 404, description = "Account or exchange rate not found", body = ErrorResponse),
        (status = 409, description = "Account modified concurrently, retry the transfer", body = ErrorResponse),
        (status = 500, description = "Exchange rate provider or storage failure", body = ErrorResponse)
    )
)]
async fn perform_transfer() {}

/// Look up the current spot rate for a currency pair
#[utoipa::path(
    get,
    path = "/exchange-rate",
    tag = "rates",
    params(
        ("from_currency" = String, Query, description = "Base currency code, e.g. USD"),
        ("to_currency" = String, Query, description = "Target currency code, e.g. EUR")
    ),
    responses(
        (status = 200, description = "Current spot rate", body = ExchangeRateResponse),
        (status = 400, description = "Malformed currency code", body = ErrorResponse),
        (status = 404, description = "Pair not quoted by the provider", body = ErrorResponse),
        (status = 500, description = "Exchange rate provider failure", body = ErrorResponse)
    )
)]
async fn exchange_rate() {}

/// OpenAPI documentation for the Transfer API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Transfer Service API",
        version = "1.0.0",
        description = "Account-to-account fund transfers with optional currency conversion and an immutable transaction ledger.",
        license(name = "MIT"),
    ),
    paths(health, perform_transfer, exchange_rate),
    components(
        schemas(
            TransactionRequest,
            TransactionResponse,
            ExchangeRateResponse,
            ErrorResponse,
            ErrorMessage,
            TransactionStatus,
            OwnerId,
            LedgerEntryId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transfers", description = "Account-to-account transfer operations"),
        (name = "rates", description = "Exchange rate lookups"),
    )
)]
pub struct ApiDoc;
