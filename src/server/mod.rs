//! HTTP adapter around the ledger.

pub mod error;
pub mod routes;
pub mod server_config;

pub use error::ServerError;
pub use routes::{router, SharedLedger};
pub use server_config::AppConfig;
