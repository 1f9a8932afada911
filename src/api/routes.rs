//! API Routes
//!
//! HTTP endpoint definitions.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::TokenVerifier;
use crate::config::DiscountStrategy;
use crate::domain::{format_transactions, FormattedTransaction};
use crate::error::AppError;
use crate::store::TransactionStore;

use super::middleware::{auth_middleware, logging_middleware};
use super::params;

/// Name reported by the health-check route
pub const SERVICE_NAME: &str = "pos-transactions-api";

/// Shared request state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,

    /// Present iff the bearer-token gate is enabled
    pub verifier: Option<Arc<TokenVerifier>>,

    pub discount_strategy: DiscountStrategy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

// =========================================================================
// Router
// =========================================================================

/// Build the application router.
///
/// Layer order (outermost first): trace -> cors -> logging -> auth ->
/// handler. The auth layer is only installed when a verifier is
/// configured; without one the transactions route is publicly reachable.
pub fn build_router(state: AppState) -> Router {
    let mut transactions = Router::new().route("/transactions", get(list_transactions));

    if state.verifier.is_some() {
        transactions = transactions.layer(from_fn_with_state(state.clone(), auth_middleware));
    }

    Router::new()
        // Health check (no auth)
        .route("/", get(health_check))
        .merge(transactions)
        .layer(from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =========================================================================
// GET /
// =========================================================================

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

// =========================================================================
// GET /transactions
// =========================================================================

/// List formatted transactions for the requested date range.
///
/// Parameters are validated before any connection is acquired; the raw
/// result set is mapped row-for-row, so the response length and order
/// match the query's `ORDER BY date_order ASC`.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<FormattedTransaction>>, AppError> {
    let range = params::extract_date_range(&query)?;

    let store = TransactionStore::new(state.pool.clone());
    let rows = store.fetch_in_range(&range.start, &range.end).await?;

    let records = format_transactions(&rows, state.discount_strategy);

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let body = serde_json::to_value(HealthResponse {
            status: "ok",
            service: SERVICE_NAME,
        })
        .unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "pos-transactions-api");
    }
}
