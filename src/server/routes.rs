use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{command::TransactionRequest, processor::TransactionProcessor};

use super::errors;

pub type SharedProcessor = Arc<dyn TransactionProcessor>;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BalanceResponse {
    pub amount: Decimal,
}

/// Routes mounted under `/api/v1`.
pub fn router() -> Router<SharedProcessor> {
    Router::new()
        .route(
            "/transactions",
            post(record_transaction).get(list_transactions),
        )
        .route("/balance", get(get_balance))
}

pub async fn record_transaction(
    State(processor): State<SharedProcessor>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    match processor.record_transaction(request) {
        Ok(txn) => (StatusCode::CREATED, Json(txn)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn list_transactions(State(processor): State<SharedProcessor>) -> Response {
    (StatusCode::OK, Json(processor.transactions())).into_response()
}

pub async fn get_balance(State(processor): State<SharedProcessor>) -> Response {
    let balance = BalanceResponse {
        amount: processor.balance(),
    };
    (StatusCode::OK, Json(balance)).into_response()
}
