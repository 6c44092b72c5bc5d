use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::LedgerError;

pub enum ServerError {
    Ledger(LedgerError),
    /// The request body never reached the ledger.
    BadBody(JsonRejection)
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ledger(LedgerError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Ledger(LedgerError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Ledger(LedgerError::InvalidAmount { .. })
            | Self::Ledger(LedgerError::InsufficientFunds { .. })
            | Self::Ledger(LedgerError::SameAccount) => StatusCode::BAD_REQUEST,
            Self::BadBody(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::Ledger(err) => err.to_string(),
            Self::BadBody(rejection) => {
                log::debug!("rejected request body: {}", rejection);
                rejection.body_text()
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<LedgerError> for ServerError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadBody(rejection)
    }
}
