use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::store::{self, Store};
use crate::types::{self, Id, Time};
use crate::Result;

/// An immutable record of one leg of a money movement.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
	pub id: Id,
	/// The account this leg belongs to
	pub account_id: Id,
	pub transaction_type: Type,
	pub amount: BigDecimal,
	pub description: String,
	/// Free-form tag, used downstream only for icon selection
	pub category: String,
	pub status: Status,
	pub timestamp: Time,
	pub counterparty_iban: Option<String>,
	pub counterparty_name: Option<String>,
	pub recipient_account_id: Option<Id>,
	/// Opaque display identifier
	pub reference: String,
	/// Placeholder; nothing populates this yet
	pub fraud_alerts: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, EnumString, Display, Debug)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Type {
	/// Funds arriving in an account, including the credit leg of a transfer
	Deposit,
	Withdrawal,
	/// The debit leg of a transfer, owned by the source account
	Transfer,
}

#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, EnumString, Display, Debug)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
	Pending,
	Completed,
	Failed,
}

pub struct NewTransaction<'a> {
	pub account_id: &'a str,
	pub transaction_type: Type,
	pub amount: &'a BigDecimal,
	pub description: String,
	pub category: &'a str,
	pub counterparty_iban: Option<String>,
	pub counterparty_name: Option<String>,
	pub recipient_account_id: Option<Id>,
}

/// Data store implementation for operating on transactions
pub struct Repo {
	store: Store,
}

impl Repo {
	pub fn new(store: Store) -> Self {
		Repo { store }
	}

	fn load(&self) -> Result<Vec<Transaction>> {
		Ok(self.store.get_or(store::TRANSACTIONS, Vec::new())?)
	}

	fn save(&self, transactions: &[Transaction]) -> Result<()> {
		Ok(self.store.set(store::TRANSACTIONS, &transactions)?)
	}

	/// Append a new record. Every transaction is created `completed`;
	/// the other statuses exist for records imported from elsewhere.
	pub fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
		let mut transactions = self.load()?;

		let transaction = Transaction {
			id: types::next_id(types::TRANSACTION_PREFIX),
			account_id: new_transaction.account_id.to_string(),
			transaction_type: new_transaction.transaction_type,
			amount: new_transaction.amount.with_scale(2),
			description: new_transaction.description,
			category: new_transaction.category.to_string(),
			status: Status::Completed,
			timestamp: Utc::now(),
			counterparty_iban: new_transaction.counterparty_iban,
			counterparty_name: new_transaction.counterparty_name,
			recipient_account_id: new_transaction.recipient_account_id,
			reference: types::reference_code(),
			fraud_alerts: Vec::new(),
		};

		transactions.push(transaction.clone());
		self.save(&transactions)?;
		Ok(transaction)
	}

	/// One account's history, newest first, optionally capped at `limit`.
	pub fn find_by_account(
		&self,
		account_id: &str,
		limit: Option<usize>,
	) -> Result<Vec<Transaction>> {
		let ids = [account_id.to_string()];
		self.find_by_accounts(&ids, limit)
	}

	/// History joined across several accounts, newest first.
	pub fn find_by_accounts(
		&self,
		account_ids: &[Id],
		limit: Option<usize>,
	) -> Result<Vec<Transaction>> {
		let mut matched: Vec<Transaction> = self
			.load()?
			.into_iter()
			.filter(|t| account_ids.iter().any(|id| *id == t.account_id))
			.collect();
		matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
		if let Some(n) = limit {
			matched.truncate(n);
		}
		Ok(matched)
	}

	/// Cascade helper: drop every record owned by the given accounts.
	pub fn delete_by_accounts(&self, account_ids: &[Id]) -> Result<()> {
		let mut transactions = self.load()?;
		transactions.retain(|t| account_ids.iter().all(|id| *id != t.account_id));
		self.save(&transactions)
	}
}

impl Type {
	pub fn parse(s: &str) -> Option<Type> {
		Type::from_str(s).ok()
	}
}
