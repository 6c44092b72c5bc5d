pub mod account;
pub mod error;
pub mod ledger;

pub use account::{Account, AccountSeed, Amount, Pin, UserName};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, TransactionId, TransferReceipt};
