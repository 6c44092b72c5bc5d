use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Serialize, Deserialize};
use tower_http::cors::CorsLayer;

use crate::core::{Amount, Ledger, TransactionId};
use crate::server::error::ServerError;
use crate::server::server_config::CorsConfig;

pub type SharedLedger = Arc<Ledger>;

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type JsonResult<T> = Result<Json<T>, ServerError>;

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: Amount,
}

/// Body shared by deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub username: String,
    pub amount: Amount,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub message: &'static str,
    pub transaction_id: TransactionId,
    pub new_balance: Amount,
}

#[derive(Debug, Serialize)]
pub struct NewBalanceResponse {
    pub message: &'static str,
    pub new_balance: Amount,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub username: String,
    pub balance: Amount,
}

pub fn router(ledger: SharedLedger, cors: &CorsConfig) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/authenticate", post(authenticate))
        .route("/bank-transfer", post(bank_transfer))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/balance/:username", get(balance))
        .with_state(ledger);

    if cors.permissive {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}

async fn index() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Welcome to the minibank backend!" })
}

async fn authenticate(State(ledger): State<SharedLedger>, body: JsonBody<AuthRequest>) -> JsonResult<AuthResponse> {
    let Json(request) = body?;
    let token = ledger.authenticate(&request.username, &request.password)?;
    Ok(Json(AuthResponse {
        message: "Authentication successful",
        token: token.as_str().to_owned(),
    }))
}

async fn bank_transfer(State(ledger): State<SharedLedger>, body: JsonBody<TransferRequest>) -> JsonResult<TransferResponse> {
    let Json(request) = body?;
    let receipt = ledger.transfer(&request.from_account, &request.to_account, request.amount)?;
    Ok(Json(TransferResponse {
        message: "Bank transfer successful",
        transaction_id: receipt.transaction_id,
        new_balance: receipt.new_balance,
    }))
}

async fn deposit(State(ledger): State<SharedLedger>, body: JsonBody<AmountRequest>) -> JsonResult<NewBalanceResponse> {
    let Json(request) = body?;
    let new_balance = ledger.deposit(&request.username, request.amount)?;
    Ok(Json(NewBalanceResponse { message: "Deposit successful", new_balance }))
}

async fn withdraw(State(ledger): State<SharedLedger>, body: JsonBody<AmountRequest>) -> JsonResult<NewBalanceResponse> {
    let Json(request) = body?;
    let new_balance = ledger.withdraw(&request.username, request.amount)?;
    Ok(Json(NewBalanceResponse { message: "Withdrawal successful", new_balance }))
}

async fn balance(State(ledger): State<SharedLedger>, Path(username): Path<String>) -> JsonResult<BalanceResponse> {
    let balance = ledger.get_balance(&username)?;
    Ok(Json(BalanceResponse { username, balance }))
}
