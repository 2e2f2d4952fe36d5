use bigdecimal::{BigDecimal, Zero};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::iban;
use crate::store::{self, Store};
use crate::types::{self, Id, Time};
use crate::{Error, Kind, Result};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Account {
	pub id: Id,
	pub user_id: Id,
	pub account_type: AccountType,
	/// Display-only number; the IBAN is the routing identifier.
	pub number: String,
	pub iban: String,
	pub balance: BigDecimal,
	pub currency: String,
	pub is_active: bool,
	/// Declared on the model but never consulted by transfer validation;
	/// every overdraw is rejected regardless of this flag.
	pub overdraft_protection: bool,
	pub created_at: Time,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
	Checking,
	Savings,
	Investment,
}

impl AccountType {
	pub fn as_str(&self) -> &str {
		match self {
			AccountType::Checking => "checking",
			AccountType::Savings => "savings",
			AccountType::Investment => "investment",
		}
	}
}

pub struct NewAccount {
	pub user_id: Id,
	pub account_type: AccountType,
	pub initial_balance: BigDecimal,
}

/// Data store implementation for operating on accounts
pub struct Repo {
	store: Store,
}

impl Repo {
	pub fn new(store: Store) -> Self {
		Repo { store }
	}

	fn load(&self) -> Result<Vec<Account>> {
		Ok(self.store.get_or(store::ACCOUNTS, Vec::new())?)
	}

	fn save(&self, accounts: &[Account]) -> Result<()> {
		Ok(self.store.set(store::ACCOUNTS, &accounts)?)
	}

	pub fn create(&self, new_account: NewAccount) -> Result<Account> {
		let mut accounts = self.load()?;

		// Re-draw until the IBAN is unique across the store. A silent
		// collision would alias two accounts under transfer lookup.
		let mut iban = iban::generate();
		while accounts.iter().any(|a| iban::matches(&a.iban, &iban)) {
			iban = iban::generate();
		}

		let account = Account {
			id: types::next_id(types::ACCOUNT_PREFIX),
			user_id: new_account.user_id,
			account_type: new_account.account_type,
			number: random_number(),
			iban,
			balance: new_account.initial_balance.with_scale(2),
			currency: "USD".to_string(),
			is_active: true,
			overdraft_protection: false,
			created_at: Utc::now(),
		};

		accounts.push(account.clone());
		self.save(&accounts)?;
		Ok(account)
	}

	pub fn lookup(&self, account_id: &str) -> Result<Option<Account>> {
		let accounts = self.load()?;
		Ok(accounts.into_iter().find(|a| a.id == account_id))
	}

	pub fn lookup_by_iban(&self, candidate: &str) -> Result<Option<Account>> {
		let accounts = self.load()?;
		Ok(accounts.into_iter().find(|a| iban::matches(&a.iban, candidate)))
	}

	pub fn find_by_id(&self, account_id: &str) -> Result<Account> {
		self.lookup(account_id)?
			.ok_or_else(|| Error::new(Kind::AccountNotFound))
	}

	/// A user's accounts, filtered to active ones only.
	pub fn find_by_owner(&self, user_id: &str) -> Result<Vec<Account>> {
		let accounts = self.load()?;
		Ok(accounts
			.into_iter()
			.filter(|a| a.user_id == user_id && a.is_active)
			.collect())
	}

	/// Credit `amount` to the account. Rejects non-positive amounts.
	pub fn deposit(&self, account_id: &str, amount: &BigDecimal) -> Result<Account> {
		self.apply(account_id, amount, false)
	}

	/// Debit `amount` from the account. Rejects non-positive amounts and
	/// never drives the balance below zero.
	pub fn withdraw(&self, account_id: &str, amount: &BigDecimal) -> Result<Account> {
		self.apply(account_id, amount, true)
	}

	fn apply(&self, account_id: &str, amount: &BigDecimal, debit: bool) -> Result<Account> {
		// Balances hold cent precision; a finer-grained amount would lose
		// value to rounding on one side of a transfer.
		if amount <= &BigDecimal::zero() || amount.normalized().fractional_digit_count() > 2 {
			return Err(Error::new(Kind::InvalidAmount));
		}

		let mut accounts = self.load()?;
		let account = accounts
			.iter_mut()
			.find(|a| a.id == account_id)
			.ok_or_else(|| Error::new(Kind::AccountNotFound))?;

		if debit {
			if account.balance.lt(amount) {
				return Err(Error::new(Kind::InsufficientFunds));
			}
			account.balance = (&account.balance - amount).with_scale(2);
		} else {
			account.balance = (&account.balance + amount).with_scale(2);
		}

		let updated = account.clone();
		self.save(&accounts)?;
		Ok(updated)
	}

	pub fn update(&self, account: &Account) -> Result<Account> {
		let mut accounts = self.load()?;
		let slot = accounts
			.iter_mut()
			.find(|a| a.id == account.id)
			.ok_or_else(|| Error::new(Kind::AccountNotFound))?;
		*slot = account.clone();
		self.save(&accounts)?;
		Ok(account.clone())
	}

	pub fn set_active(&self, account_id: &str, is_active: bool) -> Result<Account> {
		let mut account = self.find_by_id(account_id)?;
		account.is_active = is_active;
		self.update(&account)
	}

	/// Sum of a user's active account balances. No currency conversion.
	pub fn total_balance(&self, user_id: &str) -> Result<BigDecimal> {
		let total = self
			.find_by_owner(user_id)?
			.into_iter()
			.fold(BigDecimal::zero(), |acc, a| acc + a.balance);
		Ok(total.with_scale(2))
	}

	/// Remove every account owned by `user_id`, active or not, returning
	/// the removed ids so the caller can cascade over transactions.
	pub fn delete_by_user(&self, user_id: &str) -> Result<Vec<Id>> {
		let mut accounts = self.load()?;
		let removed: Vec<Id> = accounts
			.iter()
			.filter(|a| a.user_id == user_id)
			.map(|a| a.id.clone())
			.collect();
		accounts.retain(|a| a.user_id != user_id);
		self.save(&accounts)?;
		Ok(removed)
	}
}

fn random_number() -> String {
	let mut rng = rand::thread_rng();
	(0..10).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}
