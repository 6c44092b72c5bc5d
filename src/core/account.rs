use std::fmt;

use serde::{Serialize, Deserialize};

pub type Amount = f64;
pub type UserName = String;

/// An account's credential. Compared verbatim, never hashed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pin(String);

impl Pin {
    pub fn new(pin: &str) -> Pin {
        Pin(pin.to_owned())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin(****)")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pin: Pin,
    balance: Amount,
}

impl Account {
    pub fn new(pin: Pin, balance: Amount) -> Account {
        Account { pin, balance }
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn check_pin(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    pub(crate) fn credit(&mut self, amount: Amount) -> Amount {
        self.balance += amount;
        self.balance
    }

    /// Callers must have checked `covers(amount)` first.
    pub(crate) fn debit(&mut self, amount: Amount) -> Amount {
        self.balance -= amount;
        self.balance
    }

    pub(crate) fn covers(&self, amount: Amount) -> bool {
        self.balance >= amount
    }
}

/// One entry of the table an account ledger is seeded from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountSeed {
    pub username: UserName,
    pub pin: Pin,
    pub balance: Amount,
}

impl AccountSeed {
    pub fn new(username: &str, pin: &str, balance: Amount) -> AccountSeed {
        AccountSeed { username: username.to_owned(), pin: Pin::new(pin), balance }
    }
}

/// The three demo accounts every fresh server starts with.
pub fn demo_accounts() -> Vec<AccountSeed> {
    vec![
        AccountSeed::new("Alizy", "1234", 50000.0),
        AccountSeed::new("Shahzaib", "5678", 60000.0),
        AccountSeed::new("Aman", "9876", 70000.0),
    ]
}
