pub mod account;
pub mod bank;
pub mod error;
pub mod fee;
pub mod iban;
pub mod money;
pub mod store;
pub mod transaction;
pub mod types;
pub mod user;

#[cfg(test)]
mod testutil;

pub use account::{Account, AccountType, NewAccount};
pub use bank::{BankService, NewBankService, TransferReceipt};
pub use error::{Error, Kind, Result};
pub use store::Store;
pub use transaction::{NewTransaction, Transaction};
pub use types::{Id, Time};
pub use user::{NewUser, Role, User, UserKey};
