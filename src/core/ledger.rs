use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::core::account::{demo_accounts, Account, AccountSeed, Amount, UserName};
use crate::core::error::{LedgerError, LedgerResult, Operation, Party};

type AccountMap = HashMap<UserName, Account>;

/// Placeholder session token handed out on a successful login.
pub const AUTH_TOKEN: &str = "fake-jwt-token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    fn placeholder() -> AuthToken {
        AuthToken(AUTH_TOKEN.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier handed back for a completed transfer: `txn_` followed by six
/// random digits. Two transfers may well get the same one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    const LOWEST: u32 = 100_000;
    const HIGHEST: u32 = 999_999;

    fn random() -> TransactionId {
        let number = rand::thread_rng().gen_range(Self::LOWEST..=Self::HIGHEST);
        TransactionId(format!("txn_{}", number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub transaction_id: TransactionId,
    /// Sender's balance after the transfer.
    pub new_balance: Amount,
}

/// In-memory registry of accounts.
///
/// All accounts sit behind one lock. Each operation takes it once and holds
/// it through validation and mutation, so a transfer's debit and credit are
/// never observed apart and concurrent debits cannot overdraw an account.
/// Share it between threads as `Arc<Ledger>`.
pub struct Ledger {
    accounts: Mutex<AccountMap>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger { accounts: Mutex::new(HashMap::new()) }
    }

    /// Later seeds replace earlier ones with the same username.
    pub fn from_seeds(seeds: impl IntoIterator<Item = AccountSeed>) -> Ledger {
        let accounts = seeds.into_iter()
            .map(|seed| (seed.username, Account::new(seed.pin, seed.balance)))
            .collect();
        Ledger { accounts: Mutex::new(accounts) }
    }

    pub fn demo() -> Ledger {
        Ledger::from_seeds(demo_accounts())
    }

    // No operation panics between validating and mutating, so the map behind
    // a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, AccountMap> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn usernames(&self) -> Vec<UserName> {
        let mut names: Vec<_> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn total_balance(&self) -> Amount {
        self.lock().values().map(Account::balance).sum()
    }

    pub fn authenticate(&self, username: &str, password: &str) -> LedgerResult<AuthToken> {
        let accounts = self.lock();
        match accounts.get(username) {
            Some(account) if account.check_pin(password) => Ok(AuthToken::placeholder()),
            _ => {
                warn!("failed login attempt for {}", username);
                Err(LedgerError::Unauthorized)
            }
        }
    }

    pub fn get_balance(&self, username: &str) -> LedgerResult<Amount> {
        self.lock().get(username)
            .map(Account::balance)
            .ok_or(LedgerError::NotFound { party: Party::User })
    }

    pub fn deposit(&self, username: &str, amount: Amount) -> LedgerResult<Amount> {
        let mut accounts = self.lock();
        let account = accounts.get_mut(username)
            .ok_or(LedgerError::NotFound { party: Party::User })?;
        ensure_positive(amount, Operation::Deposit)?;

        let new_balance = account.credit(amount);
        info!("deposit of {} into {}", amount, username);
        Ok(new_balance)
    }

    pub fn withdraw(&self, username: &str, amount: Amount) -> LedgerResult<Amount> {
        let mut accounts = self.lock();
        let account = accounts.get_mut(username)
            .ok_or(LedgerError::NotFound { party: Party::User })?;
        ensure_positive(amount, Operation::Withdrawal)?;
        if !account.covers(amount) {
            debug!("withdrawal of {} from {} refused: insufficient funds", amount, username);
            return Err(LedgerError::InsufficientFunds { operation: Operation::Withdrawal });
        }

        let new_balance = account.debit(amount);
        info!("withdrawal of {} from {}", amount, username);
        Ok(new_balance)
    }

    /// Moves `amount` from `from` to `to`. Checks run in a fixed order and
    /// the first failure is returned: amount, sender, receiver, distinct
    /// accounts, sender funds.
    pub fn transfer(&self, from: &str, to: &str, amount: Amount) -> LedgerResult<TransferReceipt> {
        ensure_positive(amount, Operation::Transfer)?;

        let mut accounts = self.lock();
        Ledger::validate_transfer(&accounts, from, to, amount)?;

        let new_balance = match accounts.get_mut(from) {
            Some(sender) => sender.debit(amount),
            None => return Err(LedgerError::NotFound { party: Party::Sender }),
        };
        match accounts.get_mut(to) {
            Some(receiver) => { receiver.credit(amount); },
            None => return Err(LedgerError::NotFound { party: Party::Receiver }),
        }

        let transaction_id = TransactionId::random();
        info!("transfer {}: {} from {} to {}", transaction_id, amount, from, to);
        Ok(TransferReceipt { transaction_id, new_balance })
    }

    fn validate_transfer(accounts: &AccountMap, from: &str, to: &str, amount: Amount) -> LedgerResult<()> {
        let sender = accounts.get(from)
            .ok_or(LedgerError::NotFound { party: Party::Sender })?;
        if !accounts.contains_key(to) {
            return Err(LedgerError::NotFound { party: Party::Receiver });
        }
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        if !sender.covers(amount) {
            debug!("transfer of {} from {} refused: insufficient funds", amount, from);
            return Err(LedgerError::InsufficientFunds { operation: Operation::Transfer });
        }
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

// `!(amount > 0.0)` so NaN is refused too.
fn ensure_positive(amount: Amount, operation: Operation) -> LedgerResult<()> {
    if !(amount > 0.0) {
        debug!("{} of {} refused: amount must be positive", operation, amount);
        return Err(LedgerError::InvalidAmount { operation });
    }
    Ok(())
}
