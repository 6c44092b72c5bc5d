mod core;
pub mod server;

pub use crate::core::{Ledger, LedgerError, LedgerResult, Account, AccountSeed, Amount, Pin, UserName};
pub use crate::core::{account, error, ledger};
