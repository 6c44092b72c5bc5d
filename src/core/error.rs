use std::fmt;

use thiserror::Error;

/// Which side of an operation an unknown username was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    User,
    Sender,
    Receiver,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = match self {
            Self::User => "User",
            Self::Sender => "Sender account",
            Self::Receiver => "Receiver account",
        };
        write!(f, "{}", disp)
    }
}

/// The balance-mutating operation that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdrawal,
    Transfer,
}

impl Operation {
    fn insufficient_funds_suffix(&self) -> &'static str {
        match self {
            Self::Withdrawal => " for withdrawal",
            _ => "",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let disp = match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Transfer => "Transfer",
        };
        write!(f, "{}", disp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Unknown username or wrong pin; the two are not told apart.
    #[error("Invalid credentials")]
    Unauthorized,
    /// Occurs when an operation names a username the ledger does not hold.
    #[error("{party} not found")]
    NotFound { party: Party },
    /// Occurs when an amount is zero, negative or not a number.
    #[error("{operation} amount must be positive")]
    InvalidAmount { operation: Operation },
    /// Occurs when a debit would take a balance below zero.
    #[error("Insufficient funds{}", .operation.insufficient_funds_suffix())]
    InsufficientFunds { operation: Operation },
    /// Occurs when a transfer names the same account on both sides.
    #[error("Sender and receiver accounts cannot be the same")]
    SameAccount,
}

pub type LedgerResult<T> = Result<T, LedgerError>;
